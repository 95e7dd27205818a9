//! Soft halo synthesis around a cut-out subject.
//!
//! The halo is the subject's own silhouette: its alpha channel is blurred,
//! amplified and used as the alpha of a flat colour layer. That layer is put
//! on an empty canvas first and the subject is drawn over it, so the glow
//! only shows where the subject is transparent or translucent.
//!
//! Halo synthesis is cosmetic. Any failure yields [`GlowOutcome::Degraded`]
//! carrying the unmodified subject and the reason, never an error.

use image::{Luma, Rgba};
use imageproc::{definitions::Image, map::map_colors};

use crate::config::GlowConfig;
use crate::error::HaloSynthesisError;
use crate::portrait_card::blend::CompositeExt;
use crate::portrait_card::blur::BlurMaskExt;
use crate::utils::{round_to_u8, scaled_extent};

/// Result of running the glow stage.
#[derive(Debug, Clone, PartialEq)]
pub enum GlowOutcome {
    /// The halo was composited behind the subject.
    Applied(Image<Rgba<u8>>),
    /// The halo could not be built; the subject is returned as it came in.
    Degraded(Image<Rgba<u8>>, HaloSynthesisError),
}

impl GlowOutcome {
    /// Returns the image regardless of how the stage went.
    pub fn into_image(self) -> Image<Rgba<u8>> {
        match self {
            Self::Applied(image) | Self::Degraded(image, _) => image,
        }
    }

    pub fn image(&self) -> &Image<Rgba<u8>> {
        match self {
            Self::Applied(image) | Self::Degraded(image, _) => image,
        }
    }

    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(..))
    }

    /// The reason the halo was skipped, if it was.
    pub const fn degradation(&self) -> Option<&HaloSynthesisError> {
        match self {
            Self::Applied(_) => None,
            Self::Degraded(_, reason) => Some(reason),
        }
    }
}

/// Extracts the alpha channel as a single-channel mask.
pub fn alpha_mask(image: &Image<Rgba<u8>>) -> Image<Luma<u8>> {
    map_colors(image, |Rgba([_, _, _, alpha])| Luma([alpha]))
}

/// Multiplies every mask value by `factor`, rounding and clamping at 255.
///
/// # Errors
///
/// * `HaloSynthesisError::InvalidAmplification` - `factor` is negative or not finite
pub fn amplify_mask(
    mask: &Image<Luma<u8>>,
    factor: f32,
) -> Result<Image<Luma<u8>>, HaloSynthesisError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(HaloSynthesisError::InvalidAmplification(factor));
    }
    let factor = f64::from(factor);
    Ok(map_colors(mask, |Luma([value])| {
        Luma([round_to_u8(f64::from(value) * factor)])
    }))
}

/// Builds a flat `color` layer whose alpha is `mask`.
///
/// # Errors
///
/// * `HaloSynthesisError::MaskDimensionMismatch` - `mask` is not `size`
pub fn halo_layer(
    mask: &Image<Luma<u8>>,
    size: (u32, u32),
    color: [u8; 3],
) -> Result<Image<Rgba<u8>>, HaloSynthesisError> {
    if mask.dimensions() != size {
        return Err(HaloSynthesisError::MaskDimensionMismatch {
            expected: size,
            actual: mask.dimensions(),
        });
    }
    let [red, green, blue] = color;
    Ok(map_colors(mask, |Luma([alpha])| Rgba([red, green, blue, alpha])))
}

/// Composites a blurred silhouette halo behind a subject.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlowSynthesizer {
    config: GlowConfig,
}

impl GlowSynthesizer {
    pub const fn new(config: GlowConfig) -> Self {
        Self { config }
    }

    /// Blur radius used for a subject of the given size.
    pub fn radius_for(&self, width: u32, height: u32) -> u32 {
        scaled_extent(width.min(height), self.config.radius_fraction)
    }

    /// Runs the stage. Never fails; see [`GlowOutcome`].
    pub fn synthesize(&self, subject: Image<Rgba<u8>>) -> GlowOutcome {
        match self.build(&subject) {
            Ok(glowing) => GlowOutcome::Applied(glowing),
            Err(reason) => GlowOutcome::Degraded(subject, reason),
        }
    }

    fn build(&self, subject: &Image<Rgba<u8>>) -> Result<Image<Rgba<u8>>, HaloSynthesisError> {
        let (width, height) = subject.dimensions();
        if width == 0 || height == 0 {
            return Err(HaloSynthesisError::EmptyImage { width, height });
        }

        let blurred = alpha_mask(subject).blur_mask(self.radius_for(width, height))?;
        let amplified = amplify_mask(&blurred, self.config.amplification)?;
        let halo = halo_layer(&amplified, (width, height), self.config.color)?;

        let mut canvas: Image<Rgba<u8>> = Image::new(width, height);
        canvas
            .composite_mut(&halo, 0, 0, self.config.halo_blend)
            .composite_mut(subject, 0, 0, self.config.subject_blend);
        Ok(canvas)
    }
}
