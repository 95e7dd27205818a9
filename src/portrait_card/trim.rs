use image::{GenericImageView, Rgba};
use imageproc::definitions::Image;

/// Trait for cropping an RGBA image to the bounding box of its visible content.
pub trait TrimAlphaExt {
    /// Finds the minimal box containing every pixel with alpha above `threshold`.
    ///
    /// Returns `[x, y, width, height]`, or `None` when no pixel qualifies.
    fn content_bounds(&self, threshold: u8) -> Option<[u32; 4]>;

    /// Crops the image to [`content_bounds`](Self::content_bounds).
    ///
    /// An image without any qualifying pixel is returned unchanged, since
    /// there is nothing to crop to.
    ///
    /// This consumes the original image.
    fn trim_alpha(self, threshold: u8) -> Self;
}

impl TrimAlphaExt for Image<Rgba<u8>> {
    fn content_bounds(&self, threshold: u8) -> Option<[u32; 4]> {
        let (width, height) = self.dimensions();
        let mut bounds = [width, height, 0, 0]; // [x1, y1, x2, y2]
        let mut found = false;

        for (x, y, pixel) in self.enumerate_pixels() {
            if pixel[3] > threshold {
                update_bounds(&mut bounds, x, y);
                found = true;
            }
        }

        found.then(|| {
            [
                bounds[0],
                bounds[1],
                bounds[2] - bounds[0] + 1,
                bounds[3] - bounds[1] + 1,
            ]
        })
    }

    fn trim_alpha(self, threshold: u8) -> Self {
        match self.content_bounds(threshold) {
            Some([x, y, w, h]) if (w, h) != self.dimensions() => {
                self.view(x, y, w, h).to_image()
            }
            _ => self,
        }
    }
}

fn update_bounds(bounds: &mut [u32; 4], x: u32, y: u32) {
    bounds[0] = bounds[0].min(x);
    bounds[1] = bounds[1].min(y);
    bounds[2] = bounds[2].max(x);
    bounds[3] = bounds[3].max(y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_block(width: u32, height: u32, block: [u32; 4], alpha: u8) -> Image<Rgba<u8>> {
        let [bx, by, bw, bh] = block;
        Image::from_fn(width, height, |x, y| {
            if (bx..bx + bw).contains(&x) && (by..by + bh).contains(&y) {
                Rgba([90, 80, 70, alpha])
            } else {
                Rgba([255, 255, 255, 0])
            }
        })
    }

    #[test]
    fn crops_to_visible_block() {
        let image = image_with_block(10, 8, [2, 3, 4, 2], 255);
        assert_eq!(image.content_bounds(0), Some([2, 3, 4, 2]));

        let trimmed = image.trim_alpha(0);
        assert_eq!(trimmed.dimensions(), (4, 2));
        assert!(trimmed.pixels().all(|p| p.0 == [90, 80, 70, 255]));
    }

    #[test]
    fn threshold_excludes_faint_pixels() {
        let mut image = image_with_block(6, 6, [1, 1, 2, 2], 255);
        image.put_pixel(5, 5, Rgba([0, 0, 0, 3]));
        assert_eq!(image.content_bounds(0), Some([1, 1, 5, 5]));
        assert_eq!(image.content_bounds(3), Some([1, 1, 2, 2]));
    }

    #[test]
    fn fully_transparent_image_is_unchanged() {
        let image: Image<Rgba<u8>> = Image::new(5, 4);
        assert_eq!(image.content_bounds(0), None);
        assert_eq!(image.clone().trim_alpha(0), image);
    }

    #[test]
    fn fully_visible_image_is_unchanged() {
        let image = image_with_block(3, 3, [0, 0, 3, 3], 10);
        assert_eq!(image.clone().trim_alpha(0), image);
    }
}
