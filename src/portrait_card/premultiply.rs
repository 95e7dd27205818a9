use image::Rgba;
use imageproc::{definitions::Image, map::map_colors};

use crate::utils::round_to_u8;

/// Trait for moving straight-alpha RGBA8 images to and from premultiplied
/// floating point.
///
/// Premultiplied data is what resampling filters must operate on: a fully
/// transparent pixel then contributes nothing to its neighbours, so edges
/// do not pick up the (arbitrary) colour stored under zero alpha.
pub trait PremultiplyAlphaExt {
    /// Returns a premultiplied copy with every channel normalized to `[0, 1]`.
    fn to_premultiplied_f32(&self) -> Image<Rgba<f32>>;
}

/// Trait for returning premultiplied floating point images to straight RGBA8.
pub trait UnpremultiplyAlphaExt {
    /// Divides colour by alpha and quantizes to 8 bits.
    ///
    /// Pixels whose alpha quantizes to zero become `[0, 0, 0, 0]`.
    fn to_straight_u8(&self) -> Image<Rgba<u8>>;
}

impl PremultiplyAlphaExt for Image<Rgba<u8>> {
    fn to_premultiplied_f32(&self) -> Image<Rgba<f32>> {
        map_colors(self, |Rgba([red, green, blue, alpha])| {
            let alpha = f32::from(alpha) / 255.0;
            Rgba([
                f32::from(red) / 255.0 * alpha,
                f32::from(green) / 255.0 * alpha,
                f32::from(blue) / 255.0 * alpha,
                alpha,
            ])
        })
    }
}

impl UnpremultiplyAlphaExt for Image<Rgba<f32>> {
    fn to_straight_u8(&self) -> Image<Rgba<u8>> {
        map_colors(self, |Rgba([red, green, blue, alpha])| {
            let alpha_u8 = round_to_u8(f64::from(alpha) * 255.0);
            if alpha_u8 == 0 {
                return Rgba([0, 0, 0, 0]);
            }
            let alpha = f64::from(alpha);
            let unpremultiply = |channel: f32| round_to_u8(f64::from(channel) / alpha * 255.0);
            Rgba([
                unpremultiply(red),
                unpremultiply(green),
                unpremultiply(blue),
                alpha_u8,
            ])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_rgba_image, images_approx_equal};

    #[test]
    fn opaque_pixels_survive_round_trip() {
        let mut image: Image<Rgba<u8>> = Image::new(2, 1);
        image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
        image.put_pixel(1, 0, Rgba([0, 255, 7, 255]));

        let back = image.to_premultiplied_f32().to_straight_u8();
        assert_eq!(back, image);
    }

    #[test]
    fn premultiplied_colour_scales_with_alpha() {
        let image = create_test_rgba_image();
        let premultiplied = image.to_premultiplied_f32();

        let Rgba([red, _, _, alpha]) = *premultiplied.get_pixel(1, 0);
        assert!((alpha - 128.0 / 255.0).abs() < 1e-6);
        assert!((red - (100.0 / 255.0) * (128.0 / 255.0)).abs() < 1e-6);
    }

    #[test]
    fn transparent_pixels_lose_their_colour() {
        let image = create_test_rgba_image();
        let back = image.to_premultiplied_f32().to_straight_u8();
        assert_eq!(back.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn semi_transparent_pixels_round_trip_closely() {
        let mut image = create_test_rgba_image();
        // Fully transparent colour is not recoverable.
        image.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let back = image.to_premultiplied_f32().to_straight_u8();
        assert!(images_approx_equal(&image, &back, 1.0));
    }
}
