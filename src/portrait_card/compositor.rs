use image::Rgba;
use imageproc::definitions::Image;

use crate::config::{GlowConfig, LayoutConfig};
use crate::error::{CardError, HaloSynthesisError};
use crate::portrait_card::blend::{BlendMode, CompositeExt};
use crate::portrait_card::glow::GlowSynthesizer;
use crate::portrait_card::placement::{CardLayout, PlacementRect};
use crate::portrait_card::resize::ResizeInsideExt;

/// Finished card raster and how it was put together.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub card: Image<Rgba<u8>>,
    pub layout: CardLayout,
    pub placement: PlacementRect,
    /// Why the halo was skipped, if it was.
    pub glow_degradation: Option<HaloSynthesisError>,
}

/// Places a processed subject onto a background template.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Compositor {
    layout: LayoutConfig,
    glow: GlowSynthesizer,
}

impl Compositor {
    pub const fn new(layout: LayoutConfig, glow: GlowConfig) -> Self {
        Self {
            layout,
            glow: GlowSynthesizer::new(glow),
        }
    }

    /// Resizes `subject` into the card's illustration band, adds the halo and
    /// draws it over a copy of `template`.
    ///
    /// The template itself is never modified.
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The subject or the template has
    ///   zero area, or the template is too small to hold a band
    pub fn compose(
        &self,
        subject: Image<Rgba<u8>>,
        template: &Image<Rgba<u8>>,
    ) -> Result<Composition, CardError> {
        let layout = CardLayout::for_card(template.width(), template.height(), &self.layout)?;

        let resized = subject.resize_inside(
            layout.max_avatar_width,
            layout.max_avatar_height,
            self.layout.enlarge,
        )?;
        tracing::debug!(
            width = resized.width(),
            height = resized.height(),
            "resized subject"
        );

        let outcome = self.glow.synthesize(resized);
        let glow_degradation = outcome.degradation().cloned();
        let avatar = outcome.into_image();

        let placement = layout.place(avatar.width(), avatar.height());
        let mut card = template.clone();
        card.composite_mut(
            &avatar,
            i64::from(placement.left),
            i64::from(placement.top),
            BlendMode::Over,
        );

        Ok(Composition {
            card,
            layout,
            placement,
            glow_degradation,
        })
    }
}
