use image::Luma;
use imageproc::{definitions::Image, filter::gaussian_blur_f32};

use crate::config::MAX_BLUR_RADIUS;
use crate::error::HaloSynthesisError;

/// Trait for smoothing a single-channel mask with a Gaussian kernel.
///
/// The radius is the standard deviation of the kernel in pixels. Edges are
/// handled by clamping to the nearest pixel, so a uniform mask stays uniform.
pub trait BlurMaskExt {
    /// Blurs the mask, returning a new one of the same size.
    ///
    /// # Errors
    ///
    /// * `HaloSynthesisError::EmptyImage` - The mask has zero area
    /// * `HaloSynthesisError::RadiusOutOfRange` - `radius` is 0 or above the supported maximum
    fn blur_mask(&self, radius: u32) -> Result<Image<Luma<u8>>, HaloSynthesisError>;
}

impl BlurMaskExt for Image<Luma<u8>> {
    fn blur_mask(&self, radius: u32) -> Result<Image<Luma<u8>>, HaloSynthesisError> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Err(HaloSynthesisError::EmptyImage { width, height });
        }
        if radius == 0 || radius > MAX_BLUR_RADIUS {
            return Err(HaloSynthesisError::RadiusOutOfRange {
                radius,
                max: MAX_BLUR_RADIUS,
            });
        }

        Ok(gaussian_blur_f32(self, radius as f32))
    }
}
