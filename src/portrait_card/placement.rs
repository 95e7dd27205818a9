use crate::config::LayoutConfig;
use crate::error::CardError;
use crate::utils::{round_half_up, scaled_extent, validate_non_empty_image};

/// Vertical band and width budget the subject must fit into on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub card_width: u32,
    pub card_height: u32,
    /// Lowest row the subject may reach; template art starts below it.
    pub illustration_bottom: u32,
    /// Highest row the subject may start at.
    pub min_top: u32,
    pub max_avatar_width: u32,
    pub max_avatar_height: u32,
}

/// Where the subject lands on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CardLayout {
    /// Derives the layout for a template of the given size.
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The template, or the band derived
    ///   from it, has zero area
    pub fn for_card(card_width: u32, card_height: u32, config: &LayoutConfig) -> Result<Self, CardError> {
        validate_non_empty_image(card_width, card_height, "layout")?;

        let illustration_bottom = scaled_extent(card_height, config.illustration_bottom_fraction);
        let min_top = scaled_extent(card_height, config.min_top_fraction);
        let max_avatar_width = scaled_extent(card_width, config.max_width_fraction);
        let max_avatar_height = illustration_bottom.saturating_sub(min_top);
        validate_non_empty_image(max_avatar_width, max_avatar_height, "layout band")?;

        Ok(Self {
            card_width,
            card_height,
            illustration_bottom,
            min_top,
            max_avatar_width,
            max_avatar_height,
        })
    }

    /// Centres a subject of the given size horizontally on the card and
    /// vertically inside `[min_top, illustration_bottom]`.
    pub fn place(&self, avatar_width: u32, avatar_height: u32) -> PlacementRect {
        let horizontal = (f64::from(self.card_width) - f64::from(avatar_width)) / 2.0;
        let left = round_half_up(horizontal).max(0.0) as u32;

        let min_top = f64::from(self.min_top);
        let free_space = f64::from(self.illustration_bottom) - min_top - f64::from(avatar_height);
        let top = round_half_up(min_top + free_space / 2.0).max(min_top) as u32;

        PlacementRect {
            left,
            top,
            width: avatar_width,
            height: avatar_height,
        }
    }
}

impl PlacementRect {
    pub const fn right(&self) -> u32 {
        self.left + self.width
    }

    pub const fn bottom(&self) -> u32 {
        self.top + self.height
    }
}
