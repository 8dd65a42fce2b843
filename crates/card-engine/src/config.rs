//! Card template configuration.

use crate::CardError;
use crate::text::TextStyle;

/// Card width of the standard ranking template.
pub const DEFAULT_CARD_WIDTH: u32 = 500;

/// Card height of the standard ranking template.
pub const DEFAULT_CARD_HEIGHT: u32 = 500;

/// Every tunable of the card template, passed explicitly to the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub card_width: u32,
    pub card_height: u32,
    /// Radius of the final rounded-corner alpha mask.
    pub corner_radius: u32,
    /// Opacity applied to the background logo watermark.
    pub logo_opacity: f32,
    /// Horizontal margin the winner name must stay within, on both sides.
    pub text_margin: u32,
    /// Distance from the bottom edge to the top of the winner name.
    pub name_bottom_offset: u32,
    /// Smallest font size the fitter shrinks to before splitting lines.
    pub min_font_size: f32,
    /// Amount the fitter shrinks the font size per step.
    pub font_size_step: f32,
    /// Top-left corner of the rank label.
    pub rank_position: (i32, i32),
    pub text_style: TextStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            card_width: DEFAULT_CARD_WIDTH,
            card_height: DEFAULT_CARD_HEIGHT,
            corner_radius: 30,
            logo_opacity: 0.5,
            text_margin: 50,
            name_bottom_offset: 80,
            min_font_size: 30.0,
            font_size_step: 5.0,
            rank_position: (10, 10),
            text_style: TextStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Build the default template at a custom card size.
    pub fn with_size(width: u32, height: u32) -> Result<Self, CardError> {
        let config = Self {
            card_width: width,
            card_height: height,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the card is large enough to hold the text margins.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.card_width <= self.text_margin * 2 || self.card_height == 0 {
            return Err(CardError::InvalidDimensions {
                width: self.card_width,
                height: self.card_height,
            });
        }
        Ok(())
    }

    /// Width budget for the winner name.
    pub fn text_max_width(&self) -> u32 {
        self.card_width - self.text_margin * 2
    }

    /// Size of one character portrait slot: half the card wide, full height.
    pub fn portrait_size(&self) -> (u32, u32) {
        ((self.card_width / 2).max(1), self.card_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_template() {
        let config = RenderConfig::default();
        assert_eq!((config.card_width, config.card_height), (500, 500));
        assert_eq!(config.text_max_width(), 400);
        assert_eq!(config.portrait_size(), (250, 500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_size_rejects_cards_narrower_than_margins() {
        assert!(RenderConfig::with_size(100, 500).is_err());
        assert!(RenderConfig::with_size(101, 500).is_ok());
        assert!(RenderConfig::with_size(500, 0).is_err());
    }
}
