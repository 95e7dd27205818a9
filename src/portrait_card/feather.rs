use image::Rgba;
use imageproc::definitions::Image;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::config::FeatherConfig;
use crate::error::CardError;
use crate::utils::{round_to_u8, scaled_extent, validate_non_empty_image};

/// The rows over which the bottom edge fades out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatherBand {
    /// First row that may lose alpha.
    pub start: u32,
    /// Last row; fully transparent after feathering.
    pub end: u32,
}

impl FeatherBand {
    /// Computes the band for an image of the given height.
    pub fn for_height(height: u32, config: &FeatherConfig) -> Self {
        Self {
            start: scaled_extent(height, config.start_fraction),
            end: height.saturating_sub(1),
        }
    }

    /// Remaining opacity factor for row `y`, or `None` above the band.
    #[inline]
    pub fn fade(&self, y: u32) -> Option<f64> {
        if y < self.start {
            return None;
        }
        let span = f64::from(self.end.saturating_sub(self.start).max(1));
        let t = f64::from(y - self.start) / span;
        Some(1.0 - t)
    }
}

/// Trait for fading out the bottom band of an RGBA image.
pub trait FeatherBottomEdgeExt {
    /// Scales alpha linearly from full at the band start to zero on the last row.
    ///
    /// Fully transparent pixels and rows above the band are left unchanged.
    ///
    /// This consumes the original image.
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The image has zero area
    fn feather_bottom_edge(self, config: &FeatherConfig) -> Result<Image<Rgba<u8>>, CardError>;

    /// In-place variant of [`feather_bottom_edge`](Self::feather_bottom_edge).
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The image has zero area
    fn feather_bottom_edge_mut(&mut self, config: &FeatherConfig) -> Result<&mut Self, CardError>;
}

impl FeatherBottomEdgeExt for Image<Rgba<u8>> {
    fn feather_bottom_edge(mut self, config: &FeatherConfig) -> Result<Self, CardError> {
        self.feather_bottom_edge_mut(config)?;
        Ok(self)
    }

    fn feather_bottom_edge_mut(&mut self, config: &FeatherConfig) -> Result<&mut Self, CardError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height, "feather")?;

        let band = FeatherBand::for_height(height, config);
        if band.start >= height {
            return Ok(self);
        }

        let row_len = width as usize * 4;
        let band_offset = band.start as usize * row_len;
        let rows = &mut (**self)[band_offset..];

        let fade_row = |(row_index, row): (usize, &mut [u8])| {
            let Some(fade) = band.fade(band.start + row_index as u32) else {
                return;
            };
            for pixel in row.chunks_exact_mut(4) {
                if pixel[3] != 0 {
                    pixel[3] = round_to_u8(f64::from(pixel[3]) * fade);
                }
            }
        };

        #[cfg(feature = "rayon")]
        rows.par_chunks_mut(row_len).enumerate().for_each(fade_row);
        #[cfg(not(feature = "rayon"))]
        rows.chunks_mut(row_len).enumerate().for_each(fade_row);

        Ok(self)
    }
}
