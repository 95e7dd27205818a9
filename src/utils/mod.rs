//! Internal utility functions for portrait-card.
//!
//! This module contains common functionality used across different card stages.

use crate::error::CardError;

/// Rounds half-way values up (towards positive infinity).
///
/// All geometry and alpha contracts in this crate are expressed with this
/// rounding, which differs from [`f64::round`] only for negative halves.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds and clamps a value into the `u8` range.
#[inline]
pub fn round_to_u8(value: f64) -> u8 {
    round_half_up(value).clamp(0.0, 255.0) as u8
}

/// Rounds `extent * fraction` and converts to a pixel count.
#[inline]
pub fn scaled_extent(extent: u32, fraction: f64) -> u32 {
    round_half_up(f64::from(extent) * fraction).max(0.0) as u32
}

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
/// * `stage` - Name of the stage, reported in the error
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise `CardError::InvalidDimensions`
pub fn validate_non_empty_image(width: u32, height: u32, stage: &'static str) -> Result<(), CardError> {
    if width == 0 || height == 0 {
        Err(CardError::InvalidDimensions {
            stage,
            width,
            height,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(1.49), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(2.0), 2.0);
    }

    #[test]
    fn test_round_to_u8() {
        assert_eq!(round_to_u8(-3.0), 0);
        assert_eq!(round_to_u8(127.5), 128);
        assert_eq!(round_to_u8(300.0), 255);
    }

    #[test]
    fn test_scaled_extent() {
        assert_eq!(scaled_extent(1800, 0.62), 1116);
        assert_eq!(scaled_extent(1800, 0.15), 270);
        assert_eq!(scaled_extent(1200, 0.6), 720);
        assert_eq!(scaled_extent(10, 0.78), 8);
    }

    #[test]
    fn test_validate_non_empty_image() {
        assert!(validate_non_empty_image(100, 100, "test").is_ok());
        assert!(validate_non_empty_image(1, 1, "test").is_ok());
        assert!(validate_non_empty_image(0, 100, "test").is_err());
        assert!(validate_non_empty_image(100, 0, "test").is_err());
        assert_eq!(
            validate_non_empty_image(0, 0, "feather"),
            Err(CardError::InvalidDimensions {
                stage: "feather",
                width: 0,
                height: 0
            })
        );
    }
}
