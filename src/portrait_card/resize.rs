use image::{imageops, imageops::FilterType, Rgba};
use imageproc::definitions::Image;

use crate::error::CardError;
use crate::portrait_card::premultiply::{PremultiplyAlphaExt, UnpremultiplyAlphaExt};
use crate::utils::{round_half_up, validate_non_empty_image};

/// Computes the size an image takes when fitted inside a bounding box.
///
/// The aspect ratio is preserved. Unless `enlarge` is set the scale never
/// exceeds 1, so an image that already fits keeps its natural size. Each
/// side is at least one pixel and never exceeds the box.
///
/// # Errors
///
/// * `CardError::InvalidDimensions` - The source or the box has zero area
pub fn fit_inside(
    size: (u32, u32),
    bounds: (u32, u32),
    enlarge: bool,
) -> Result<(u32, u32), CardError> {
    let (width, height) = size;
    let (max_width, max_height) = bounds;
    validate_non_empty_image(width, height, "resize")?;
    validate_non_empty_image(max_width, max_height, "resize bounds")?;

    let scale_x = f64::from(max_width) / f64::from(width);
    let scale_y = f64::from(max_height) / f64::from(height);
    let mut scale = scale_x.min(scale_y);
    if !enlarge {
        scale = scale.min(1.0);
    }

    let fitted = |side: u32, limit: u32| -> u32 {
        (round_half_up(f64::from(side) * scale) as u32).clamp(1, limit.max(1))
    };

    Ok((fitted(width, max_width), fitted(height, max_height)))
}

/// Trait for aspect-preserving "fit inside" resizing of RGBA images.
pub trait ResizeInsideExt {
    /// Resizes the image to fit within `(max_width, max_height)`.
    ///
    /// Returns the scaled content at its fitted size (no padding).
    /// Resampling uses Lanczos3 on premultiplied data. When the fitted size
    /// equals the current size the image is returned untouched.
    ///
    /// This consumes the original image.
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The image or the box has zero area
    fn resize_inside(
        self,
        max_width: u32,
        max_height: u32,
        enlarge: bool,
    ) -> Result<Image<Rgba<u8>>, CardError>;
}

impl ResizeInsideExt for Image<Rgba<u8>> {
    fn resize_inside(
        self,
        max_width: u32,
        max_height: u32,
        enlarge: bool,
    ) -> Result<Image<Rgba<u8>>, CardError> {
        let (new_width, new_height) =
            fit_inside(self.dimensions(), (max_width, max_height), enlarge)?;
        if (new_width, new_height) == self.dimensions() {
            return Ok(self);
        }

        let premultiplied = self.to_premultiplied_f32();
        let resized = imageops::resize(&premultiplied, new_width, new_height, FilterType::Lanczos3);
        Ok(resized.to_straight_u8())
    }
}
