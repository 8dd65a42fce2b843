//! Ranking card composition.
//!
//! Layer order, bottom to top: black canvas, faded logo, accent band,
//! rainbow band, portraits, name bars, text. The rounded-corner mask is
//! applied last as the card's alpha channel.

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::CardError;
use crate::compose;
use crate::config::RenderConfig;
use crate::resize::{force_resize, resize_with_opacity};
use crate::shapes::{
    accent_square_overlay, diagonal_gradient_overlay, draw_text_bars, rounded_rect_mask,
};
use crate::text::{FontSet, draw_winner_info};

/// Inset of the left portrait from the card edge; the right portrait starts
/// this far before the left one ends.
const PAIRED_INSET: i32 = 50;

/// Solo layout: first copy sits this far left of centre.
const SOLO_CENTER_SHIFT: i32 = 300;

/// Solo layout: x of the second copy, which starts one portrait height down.
const SOLO_SECOND_X: i32 = 500;

/// Shared, read-only inputs for every card of a run.
#[derive(Debug, Clone)]
pub struct CardAssets {
    pub logo: DynamicImage,
    pub fonts: FontSet,
}

/// How the portrait slots are filled, decided when identifiers are resolved.
#[derive(Debug, Clone)]
pub enum PortraitPlacement {
    /// Two characters side by side; `right` is drawn over `left`.
    Paired {
        left: DynamicImage,
        right: DynamicImage,
    },
    /// One character shown in both slots.
    Solo { image: DynamicImage },
}

/// Slot offsets for the solo layout on a canvas of `canvas_width`.
pub fn solo_positions(canvas_width: u32, portrait: (u32, u32)) -> [(i32, i32); 2] {
    let (pw, ph) = (portrait.0 as i32, portrait.1 as i32);
    let center_x = (canvas_width as i32 - pw).div_euclid(2);
    [(center_x - SOLO_CENTER_SHIFT, 0), (SOLO_SECOND_X, ph)]
}

/// Force the portraits into half-width, full-height slots and paste them,
/// each through its own alpha.
pub fn paste_portraits(
    canvas: &mut RgbaImage,
    placement: &PortraitPlacement,
    config: &RenderConfig,
) {
    let (pw, ph) = config.portrait_size();

    match placement {
        PortraitPlacement::Paired { left, right } => {
            let left = force_resize(left, pw, ph);
            let right = force_resize(right, pw, ph);
            compose::paste_alpha(canvas, &left, PAIRED_INSET, 0);
            compose::paste_alpha(canvas, &right, left.width() as i32 - PAIRED_INSET, 0);
        }
        PortraitPlacement::Solo { image } => {
            let portrait = force_resize(image, pw, ph);
            for (x, y) in solo_positions(canvas.width(), portrait.dimensions()) {
                compose::paste_alpha(canvas, &portrait, x, y);
            }
        }
    }
}

/// Build one finished card.
///
/// The result is always exactly `card_width` x `card_height`, whatever the
/// portrait sizes, with all four corners transparent.
pub fn compose_card(
    assets: &CardAssets,
    placement: &PortraitPlacement,
    winner_name: &str,
    rank: u32,
    config: &RenderConfig,
) -> Result<RgbaImage, CardError> {
    config.validate()?;
    let (width, height) = (config.card_width, config.card_height);
    debug!(rank, width, height, "Composing card");

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));

    let logo = resize_with_opacity(&assets.logo, width, config.logo_opacity);
    let logo_y = (height as i32 - logo.height() as i32).div_euclid(2);
    compose::paste_alpha(&mut canvas, &logo, 0, logo_y);

    accent_square_overlay(width, height).apply(&mut canvas);
    diagonal_gradient_overlay(width, height).apply(&mut canvas);

    paste_portraits(&mut canvas, placement, config);
    draw_text_bars(&mut canvas);

    let fitted = draw_winner_info(&mut canvas, winner_name, rank, &assets.fonts, config);
    debug!(
        rank,
        font_size = fitted.font.size(),
        lines = fitted.lines.len(),
        "Drew winner info"
    );

    let mask = rounded_rect_mask(width, height, config.corner_radius);
    compose::put_alpha(&mut canvas, &mask);

    Ok(canvas)
}
