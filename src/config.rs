//! Pipeline configuration.
//!
//! All tuned constants live here and are handed to [`CardPipeline`](crate::CardPipeline)
//! at construction time. Every struct deserializes with defaults, so a JSON
//! file only has to name the values it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CardError;
use crate::portrait_card::blend::BlendMode;

/// Number of templates in the reference configuration.
pub const DEFAULT_TEMPLATE_COUNT: usize = 5;

/// Largest sigma the halo blur accepts.
pub const MAX_BLUR_RADIUS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub templates: TemplateConfig,
    pub segmentation: SegmentationConfig,
    pub trim: TrimConfig,
    pub feather: FeatherConfig,
    pub greyscale: GreyscaleConfig,
    pub glow: GlowConfig,
    pub layout: LayoutConfig,
}

/// Where templates live and in which order they are selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub directory: PathBuf,
    pub names: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets/templates"),
            names: (1..=DEFAULT_TEMPLATE_COUNT)
                .map(|index| format!("template-{index:02}.png"))
                .collect(),
        }
    }
}

/// Thresholds for the near-white background candidate test.
///
/// A pixel is a candidate iff `max(R,G,B) >= min_brightness` and
/// `max(R,G,B) - min(R,G,B) <= max_chroma`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    pub min_brightness: u8,
    pub max_chroma: u8,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_brightness: 220,
            max_chroma: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// Pixels with alpha above this value count as content.
    pub alpha_threshold: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatherConfig {
    /// Fraction of the height at which the fade begins.
    pub start_fraction: f64,
}

impl Default for FeatherConfig {
    fn default() -> Self {
        Self {
            start_fraction: 0.78,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreyscaleConfig {
    pub enabled: bool,
}

impl Default for GreyscaleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Halo tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Blur radius as a fraction of `min(width, height)`.
    pub radius_fraction: f64,
    /// Multiplier applied to the blurred mask before clamping to 255.
    pub amplification: f32,
    /// Halo colour; the blurred mask becomes its alpha.
    pub color: [u8; 3],
    /// How the halo layer lands on the empty canvas.
    pub halo_blend: BlendMode,
    /// How the subject lands on top of the halo.
    pub subject_blend: BlendMode,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            radius_fraction: 0.12,
            amplification: 2.0,
            color: [255, 255, 255],
            halo_blend: BlendMode::Screen,
            subject_blend: BlendMode::Over,
        }
    }
}

/// Card geometry, as fractions of the template dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub illustration_bottom_fraction: f64,
    pub min_top_fraction: f64,
    pub max_width_fraction: f64,
    /// Allow the subject to grow past its natural size to fill the box.
    pub enlarge: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            illustration_bottom_fraction: 0.62,
            min_top_fraction: 0.15,
            max_width_fraction: 0.6,
            enlarge: false,
        }
    }
}

impl PipelineConfig {
    /// Parses a (possibly partial) JSON configuration and validates it.
    ///
    /// # Errors
    ///
    /// * `CardError::Config` - The JSON is malformed or a value is out of range
    pub fn from_json_str(json: &str) -> Result<Self, CardError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// * `CardError::Config` - The file is unreadable, malformed, or invalid
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CardError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CardError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Checks every value the stages rely on.
    ///
    /// # Errors
    ///
    /// * `CardError::Config` - Describes the first offending value
    pub fn validate(&self) -> Result<(), CardError> {
        if self.templates.names.is_empty() {
            return Err(CardError::Config(
                "at least one template name is required".to_string(),
            ));
        }

        check_fraction("feather.start_fraction", self.feather.start_fraction)?;
        check_fraction("glow.radius_fraction", self.glow.radius_fraction)?;
        check_fraction(
            "layout.illustration_bottom_fraction",
            self.layout.illustration_bottom_fraction,
        )?;
        check_fraction("layout.min_top_fraction", self.layout.min_top_fraction)?;
        check_fraction("layout.max_width_fraction", self.layout.max_width_fraction)?;

        if self.layout.min_top_fraction >= self.layout.illustration_bottom_fraction {
            return Err(CardError::Config(format!(
                "layout.min_top_fraction ({}) must be below layout.illustration_bottom_fraction ({})",
                self.layout.min_top_fraction, self.layout.illustration_bottom_fraction
            )));
        }

        if !self.glow.amplification.is_finite() || self.glow.amplification < 0.0 {
            return Err(CardError::Config(format!(
                "glow.amplification must be finite and non-negative, got {}",
                self.glow.amplification
            )));
        }

        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> Result<(), CardError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(CardError::Config(format!(
            "{name} must be in (0, 1], got {value}"
        )))
    }
}
