//! Test utilities for portrait-card
//!
//! Fixture builders and tolerant comparisons shared by the unit tests.
//! Only compiled when running tests.

use image::{Pixel, Primitive, Rgba};
use imageproc::definitions::Image;

/// Near-white backdrop typical of generated portraits.
pub const BACKDROP: Rgba<u8> = Rgba([248, 247, 250, 255]);

/// Creates a test RGBA image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values including alpha:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates a portrait-like image: an opaque `subject` rectangle
/// `[x0, y0, x1, y1)` on a [`BACKDROP`].
pub fn create_backdrop_portrait(
    width: u32,
    height: u32,
    subject: [u32; 4],
    color: Rgba<u8>,
) -> Image<Rgba<u8>> {
    let [x0, y0, x1, y1] = subject;
    Image::from_fn(width, height, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            color
        } else {
            BACKDROP
        }
    })
}

/// Compares two pixel values with a tolerance for rounding differences.
///
/// # Returns
/// `true` if all subpixel values are within the tolerance, `false` otherwise
pub fn pixels_approx_equal<P>(expected: P, actual: P, tolerance: f32) -> bool
where
    P: Pixel,
    P::Subpixel: Primitive,
    f32: From<P::Subpixel>,
{
    expected
        .channels()
        .iter()
        .zip(actual.channels())
        .all(|(e, a)| (f32::from(*e) - f32::from(*a)).abs() <= tolerance)
}

/// Compares two images pixel by pixel with a tolerance.
///
/// # Returns
/// `true` if all pixels are within tolerance and dimensions match, `false` otherwise
pub fn images_approx_equal<P>(expected: &Image<P>, actual: &Image<P>, tolerance: f32) -> bool
where
    P: Pixel,
    P::Subpixel: Primitive,
    f32: From<P::Subpixel>,
{
    expected.dimensions() == actual.dimensions()
        && expected
            .pixels()
            .zip(actual.pixels())
            .all(|(e, a)| pixels_approx_equal(*e, *a, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgba_image_with_valid_input_creates_image() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 0]));
    }

    #[test]
    fn backdrop_portrait_places_subject() {
        let image = create_backdrop_portrait(6, 4, [1, 1, 3, 2], Rgba([1, 2, 3, 255]));
        assert_eq!(image.get_pixel(0, 0), &BACKDROP);
        assert_eq!(image.get_pixel(2, 1), &Rgba([1, 2, 3, 255]));
        assert_eq!(image.get_pixel(3, 1), &BACKDROP);
    }

    #[test]
    fn pixels_approx_equal_with_tolerant_comparison_returns_true() {
        let pixel1 = Rgba([100u8, 150, 200, 255]);
        let pixel2 = Rgba([101u8, 149, 201, 255]);
        let pixel3 = Rgba([105u8, 145, 205, 255]);

        assert!(pixels_approx_equal(pixel1, pixel2, 1.5));
        assert!(!pixels_approx_equal(pixel1, pixel3, 1.5));
    }

    #[test]
    fn images_approx_equal_with_tolerant_comparison_returns_true() {
        let image1 = create_test_rgba_image();
        let mut image2 = create_test_rgba_image();
        image2.put_pixel(0, 0, Rgba([201, 150, 100, 255]));

        assert!(images_approx_equal(&image1, &image2, 1.5));
        assert!(!images_approx_equal(&image1, &image2, 0.5));
    }
}
