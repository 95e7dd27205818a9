//! Removal of border-connected near-white backgrounds.
//!
//! Generated portraits often come back with a light, nearly grey backdrop
//! instead of real transparency. This stage classifies such pixels as
//! *candidates*, then clears exactly the candidates that are reachable from
//! the image border through other candidates (4-connectivity). Candidate
//! islands enclosed by the subject, such as highlights or white clothing,
//! stay opaque.
//!
//! The search uses an explicit worklist and a visited set indexed by
//! `y * width + x`, so memory is bounded by the pixel count and the stack
//! depth does not depend on the image size.

use std::collections::VecDeque;

use image::Rgba;
use imageproc::definitions::Image;
use itertools::chain;

use crate::config::SegmentationConfig;
use crate::error::CardError;
use crate::utils::validate_non_empty_image;

/// Returns whether a pixel belongs to the near-white candidate class.
///
/// Fully transparent pixels are never candidates.
#[inline]
pub fn is_background_candidate(pixel: Rgba<u8>, config: &SegmentationConfig) -> bool {
    let Rgba([red, green, blue, alpha]) = pixel;
    if alpha == 0 {
        return false;
    }
    let max_channel = red.max(green).max(blue);
    let min_channel = red.min(green).min(blue);
    max_channel >= config.min_brightness && max_channel - min_channel <= config.max_chroma
}

/// Computes the background mask: `true` for every border-reachable candidate.
///
/// The returned vector is indexed by `y * width + x`. A zero-area image
/// yields an empty mask.
pub fn border_connected_background(image: &Image<Rgba<u8>>, config: &SegmentationConfig) -> Vec<bool> {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let candidate: Vec<bool> = image
        .pixels()
        .map(|&pixel| is_background_candidate(pixel, config))
        .collect();
    let mut background = vec![false; w * h];
    let mut worklist = VecDeque::new();

    let visit = |index: usize, background: &mut Vec<bool>, worklist: &mut VecDeque<usize>| {
        if candidate[index] && !background[index] {
            background[index] = true;
            worklist.push_back(index);
        }
    };

    let border = chain!(
        0..w,
        (0..w).map(|x| (h - 1) * w + x),
        (0..h).map(|y| y * w),
        (0..h).map(|y| y * w + w - 1),
    );
    for index in border {
        visit(index, &mut background, &mut worklist);
    }

    while let Some(index) = worklist.pop_front() {
        let (x, y) = (index % w, index / w);
        if x + 1 < w {
            visit(index + 1, &mut background, &mut worklist);
        }
        if x > 0 {
            visit(index - 1, &mut background, &mut worklist);
        }
        if y + 1 < h {
            visit(index + w, &mut background, &mut worklist);
        }
        if y > 0 {
            visit(index - w, &mut background, &mut worklist);
        }
    }

    background
}

/// Trait for clearing the border-connected near-white background.
pub trait RemoveBackgroundExt {
    /// Sets alpha to 0 on every border-reachable candidate pixel.
    ///
    /// Colour is never touched and no alpha value is ever raised.
    ///
    /// This consumes the original image.
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The image has zero area
    ///
    /// # Examples
    /// ```
    /// use image::Rgba;
    /// use portrait_card::{Image, RemoveBackgroundExt, SegmentationConfig};
    ///
    /// # fn example() -> Result<(), portrait_card::CardError> {
    /// let mut image: Image<Rgba<u8>> = Image::from_pixel(5, 5, Rgba([250, 250, 250, 255]));
    /// image.put_pixel(2, 2, Rgba([30, 30, 30, 255]));
    ///
    /// let cleaned = image.remove_background(&SegmentationConfig::default())?;
    /// assert_eq!(cleaned.get_pixel(0, 0)[3], 0);
    /// assert_eq!(cleaned.get_pixel(2, 2)[3], 255);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    fn remove_background(self, config: &SegmentationConfig) -> Result<Image<Rgba<u8>>, CardError>;

    /// In-place variant of [`remove_background`](Self::remove_background).
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The image has zero area
    fn remove_background_mut(&mut self, config: &SegmentationConfig) -> Result<&mut Self, CardError>;
}

impl RemoveBackgroundExt for Image<Rgba<u8>> {
    fn remove_background(mut self, config: &SegmentationConfig) -> Result<Self, CardError> {
        self.remove_background_mut(config)?;
        Ok(self)
    }

    fn remove_background_mut(&mut self, config: &SegmentationConfig) -> Result<&mut Self, CardError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height, "segment")?;

        let background = border_connected_background(self, config);
        self.pixels_mut()
            .zip(background)
            .filter(|(_, is_background)| *is_background)
            .for_each(|(pixel, _)| pixel[3] = 0);

        Ok(self)
    }
}
