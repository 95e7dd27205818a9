//! Straight-alpha compositing with separable blend modes.
//!
//! Both modes share the general source-over formula:
//!
//! ```text
//! αr = αs + αd · (1 - αs)
//! Cr = [αs · (1 - αd) · Cs + αd · (1 - αs) · Cd + αs · αd · B(Cd, Cs)] / αr
//! ```
//!
//! with `B(Cd, Cs) = Cs` for [`BlendMode::Over`] and
//! `B(Cd, Cs) = Cs + Cd - Cs · Cd` for [`BlendMode::Screen`]. Where the
//! destination is transparent both modes reduce to copying the source, so
//! the order in which layers are stacked decides the result.

use image::Rgba;
use imageproc::definitions::Image;
use serde::{Deserialize, Serialize};

use crate::utils::round_to_u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Normal source-over.
    #[default]
    Over,
    /// Lightening blend: `1 - (1 - Cs)(1 - Cd)` where both layers overlap.
    Screen,
}

impl BlendMode {
    #[inline]
    fn mix(self, destination: f64, source: f64) -> f64 {
        match self {
            Self::Over => source,
            Self::Screen => source + destination - source * destination,
        }
    }
}

/// Composites one straight-alpha pixel onto another.
pub fn blend_pixel(destination: Rgba<u8>, source: Rgba<u8>, mode: BlendMode) -> Rgba<u8> {
    if source[3] == 0 {
        return destination;
    }

    let source_alpha = f64::from(source[3]) / 255.0;
    let destination_alpha = f64::from(destination[3]) / 255.0;
    let result_alpha = source_alpha + destination_alpha * (1.0 - source_alpha);

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let cs = f64::from(source[channel]) / 255.0;
        let cd = f64::from(destination[channel]) / 255.0;
        let premultiplied = source_alpha * (1.0 - destination_alpha) * cs
            + destination_alpha * (1.0 - source_alpha) * cd
            + source_alpha * destination_alpha * mode.mix(cd, cs);
        out[channel] = round_to_u8(premultiplied / result_alpha * 255.0);
    }
    out[3] = round_to_u8(result_alpha * 255.0);
    Rgba(out)
}

/// Trait for drawing one RGBA layer onto another.
pub trait CompositeExt {
    /// Draws `layer` with its top-left corner at `(left, top)` in place.
    ///
    /// Parts of the layer that fall outside the canvas are clipped.
    fn composite_mut(
        &mut self,
        layer: &Image<Rgba<u8>>,
        left: i64,
        top: i64,
        mode: BlendMode,
    ) -> &mut Self;

    /// Consuming variant of [`composite_mut`](Self::composite_mut).
    fn composite(self, layer: &Image<Rgba<u8>>, left: i64, top: i64, mode: BlendMode) -> Self
    where
        Self: Sized;
}

impl CompositeExt for Image<Rgba<u8>> {
    fn composite_mut(
        &mut self,
        layer: &Image<Rgba<u8>>,
        left: i64,
        top: i64,
        mode: BlendMode,
    ) -> &mut Self {
        let (canvas_width, canvas_height) = self.dimensions();
        let (layer_width, layer_height) = layer.dimensions();

        let x_start = left.max(0);
        let y_start = top.max(0);
        let x_end = (left + i64::from(layer_width)).min(i64::from(canvas_width));
        let y_end = (top + i64::from(layer_height)).min(i64::from(canvas_height));

        for y in y_start..y_end {
            for x in x_start..x_end {
                let source = *layer.get_pixel((x - left) as u32, (y - top) as u32);
                let destination = self.get_pixel_mut(x as u32, y as u32);
                *destination = blend_pixel(*destination, source, mode);
            }
        }
        self
    }

    fn composite(mut self, layer: &Image<Rgba<u8>>, left: i64, top: i64, mode: BlendMode) -> Self {
        self.composite_mut(layer, left, top, mode);
        self
    }
}
