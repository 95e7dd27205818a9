use image::{DynamicImage, Rgba};
use imageproc::definitions::Image;

/// Trait for promoting any decoded image to 8-bit RGBA.
///
/// Images without an alpha channel gain a fully opaque one. Applying the
/// conversion to an image that is already RGBA8 returns it untouched.
pub trait EnsureAlphaExt {
    /// Converts the image to `Image<Rgba<u8>>`.
    ///
    /// This consumes the original image.
    ///
    /// # Examples
    /// ```
    /// use image::{DynamicImage, Rgb, RgbImage};
    /// use portrait_card::EnsureAlphaExt;
    ///
    /// let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([10, 20, 30])));
    /// let rgba = rgb.ensure_alpha();
    /// assert_eq!(rgba.get_pixel(0, 0).0, [10, 20, 30, 255]);
    /// ```
    fn ensure_alpha(self) -> Image<Rgba<u8>>;
}

impl EnsureAlphaExt for DynamicImage {
    fn ensure_alpha(self) -> Image<Rgba<u8>> {
        match self {
            Self::ImageRgba8(image) => image,
            other => other.into_rgba8(),
        }
    }
}

impl EnsureAlphaExt for Image<Rgba<u8>> {
    fn ensure_alpha(self) -> Image<Rgba<u8>> {
        self
    }
}
