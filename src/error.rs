use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by every fatal pipeline operation.
pub type Result<T> = std::result::Result<T, CardError>;

/// Error type for the card pipeline
///
/// Every variant is fatal: the pipeline aborts and no partial output is
/// returned. Recoverable halo failures use [`HaloSynthesisError`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// Input bytes are not a decodable raster
    #[error("Failed to decode input raster: {0}")]
    Decode(String),

    /// A stage received a zero-area buffer
    ///
    /// The glow stage never reports this; it degrades instead.
    #[error("{stage}: image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions {
        /// Name of the stage that rejected the buffer
        stage: &'static str,
        width: u32,
        height: u32,
    },

    /// The selected background template could not be read or decoded
    #[error("Failed to load template `{name}` from {path:?}: {reason}")]
    TemplateLoad {
        name: String,
        path: PathBuf,
        reason: String,
    },

    /// The final raster could not be encoded
    #[error("Failed to encode output raster: {0}")]
    Encode(String),

    /// The pipeline configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Error type for halo synthesis
///
/// Only ever observed through [`GlowOutcome::Degraded`](crate::GlowOutcome),
/// never propagated as a pipeline failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HaloSynthesisError {
    /// The subject has zero width or height
    #[error("Cannot synthesize a halo for an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    /// The derived blur radius is outside the supported range
    #[error("Halo blur radius {radius} is outside the supported range 1..={max}")]
    RadiusOutOfRange { radius: u32, max: u32 },

    /// The amplification factor cannot be applied
    #[error("Halo amplification {0} must be finite and non-negative")]
    InvalidAmplification(f32),

    /// The halo mask does not cover the subject
    #[error("Halo mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    MaskDimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },
}
