use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, Rgba};
use imageproc::definitions::Image;

use crate::error::CardError;
use crate::portrait_card::ensure_alpha::EnsureAlphaExt;

/// Decodes an encoded raster into straight-alpha RGBA.
///
/// The format is guessed from the content. Inputs without an alpha channel
/// come back fully opaque.
///
/// # Errors
///
/// * `CardError::Decode` - The bytes are not a supported raster
pub fn decode_image(bytes: &[u8]) -> Result<Image<Rgba<u8>>, CardError> {
    let decoded = image::load_from_memory(bytes).map_err(|err| CardError::Decode(err.to_string()))?;
    Ok(decoded.ensure_alpha())
}

/// Encodes an RGBA raster as PNG at maximum compression.
///
/// # Errors
///
/// * `CardError::Encode` - The encoder rejected the buffer
pub fn encode_png(image: &Image<Rgba<u8>>) -> Result<Vec<u8>, CardError> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|err| CardError::Encode(err.to_string()))?;
    Ok(bytes)
}
