//! Post-processing and card compositing for generated portraits.
//!
//! A generated portrait arrives as an encoded raster with a light backdrop.
//! [`CardPipeline`] turns it into a finished trading-card style PNG:
//!
//! 1. border-connected near-white background is made transparent
//!    ([`RemoveBackgroundExt`]),
//! 2. the subject is cropped to its visible pixels ([`TrimAlphaExt`]),
//! 3. the bottom edge is faded out ([`FeatherBottomEdgeExt`]),
//! 4. colour is reduced to grey ([`GreyscaleExt`]),
//! 5. the subject is resized into the card's illustration band, given a
//!    soft halo ([`GlowSynthesizer`]) and drawn over a background template
//!    picked from the caller's identifier ([`BackgroundSelector`]),
//! 6. the card is encoded as PNG.
//!
//! Every stage is also usable on its own as an extension trait on
//! [`Image`].

mod config;
mod error;
mod pipeline;
mod portrait_card;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{
    FeatherConfig, GlowConfig, GreyscaleConfig, LayoutConfig, PipelineConfig, SegmentationConfig,
    TemplateConfig, TrimConfig, DEFAULT_TEMPLATE_COUNT, MAX_BLUR_RADIUS,
};
pub use error::{CardError, HaloSynthesisError, Result};
pub use imageproc::definitions::Image;
pub use pipeline::{CardOutput, CardPipeline};
pub use portrait_card::blend::{blend_pixel, BlendMode, CompositeExt};
pub use portrait_card::blur::BlurMaskExt;
pub use portrait_card::codec::{decode_image, encode_png};
pub use portrait_card::compositor::{Composition, Compositor};
pub use portrait_card::ensure_alpha::EnsureAlphaExt;
pub use portrait_card::feather::{FeatherBand, FeatherBottomEdgeExt};
pub use portrait_card::glow::{alpha_mask, amplify_mask, halo_layer, GlowOutcome, GlowSynthesizer};
pub use portrait_card::greyscale::{luma, GreyscaleExt};
pub use portrait_card::placement::{CardLayout, PlacementRect};
pub use portrait_card::premultiply::{PremultiplyAlphaExt, UnpremultiplyAlphaExt};
pub use portrait_card::resize::{fit_inside, ResizeInsideExt};
pub use portrait_card::segment::{
    border_connected_background, is_background_candidate, RemoveBackgroundExt,
};
pub use portrait_card::selector::{identifier_score, select_template_index, BackgroundSelector};
pub use portrait_card::template::TemplateSet;
pub use portrait_card::trim::TrimAlphaExt;
