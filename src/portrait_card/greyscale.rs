use image::Rgba;
use imageproc::definitions::Image;

use crate::utils::round_to_u8;

/// Rec.709 luma coefficients.
const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Grey value for an RGB triple.
#[inline]
pub fn luma(red: u8, green: u8, blue: u8) -> u8 {
    round_to_u8(
        LUMA_WEIGHTS[0] * f64::from(red)
            + LUMA_WEIGHTS[1] * f64::from(green)
            + LUMA_WEIGHTS[2] * f64::from(blue),
    )
}

/// Trait for replacing colour with grey while keeping alpha.
pub trait GreyscaleExt {
    /// Converts every pixel to grey; alpha is unchanged.
    ///
    /// This consumes the original image.
    fn greyscale(self) -> Self;

    /// Converts every pixel to grey in place.
    fn greyscale_mut(&mut self) -> &mut Self;
}

impl GreyscaleExt for Image<Rgba<u8>> {
    fn greyscale(mut self) -> Self {
        self.greyscale_mut();
        self
    }

    fn greyscale_mut(&mut self) -> &mut Self {
        self.pixels_mut().for_each(|pixel| {
            let Rgba([red, green, blue, alpha]) = *pixel;
            let grey = luma(red, green, blue);
            *pixel = Rgba([grey, grey, grey, alpha]);
        });
        self
    }
}
