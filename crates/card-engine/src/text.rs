//! Text fitting and outlined text rendering for ranking cards.
//!
//! The winner name is shrunk step by step until it fits the card's width
//! budget; if it still overflows at the floor size it is split once at the
//! first whitespace. Text is drawn as shadow, then a stamped outline, then
//! the fill.

use std::fmt;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::debug;

use crate::config::RenderConfig;

/// Extra pixels between lines of a split name.
pub const LINE_SPACING: u32 = 4;

/// An immutable typeface at one pixel size.
///
/// Resizing produces a new handle; the typeface data is shared.
#[derive(Clone)]
pub struct FontHandle {
    font: FontArc,
    size: f32,
}

impl FontHandle {
    pub fn new(font: FontArc, size: f32) -> Self {
        Self { font, size }
    }

    /// Same typeface at a different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            font: self.font.clone(),
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    pub fn scale(&self) -> PxScale {
        PxScale::from(self.size)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle").field("size", &self.size).finish()
    }
}

/// The two preset sizes every card uses.
#[derive(Debug, Clone)]
pub struct FontSet {
    /// Starting size for the winner name.
    pub name: FontHandle,
    /// Size for the rank label.
    pub rank: FontHandle,
}

impl FontSet {
    pub fn new(font: FontArc, name_size: f32, rank_size: f32) -> Self {
        Self {
            name: FontHandle::new(font.clone(), name_size),
            rank: FontHandle::new(font, rank_size),
        }
    }
}

/// Colours and offsets of the shadow + outline + fill effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub fill: Rgba<u8>,
    pub outline: Rgba<u8>,
    pub shadow: Rgba<u8>,
    /// Outline is stamped at every offset in `-thickness..=thickness`.
    pub thickness: i32,
    pub shadow_offset: (i32, i32),
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill: Rgba([255, 255, 255, 255]),
            outline: Rgba([0, 0, 0, 255]),
            shadow: Rgba([255, 220, 220, 255]),
            thickness: 3,
            shadow_offset: (4, 4),
        }
    }
}

/// Result of fitting a string into a width budget.
#[derive(Debug, Clone)]
pub struct FittedText {
    pub font: FontHandle,
    /// One line, or two when the name was split at its first whitespace.
    pub lines: Vec<String>,
    /// Width of the widest line.
    pub width: u32,
    /// Height of the unsplit text at the final size.
    pub height: u32,
}

impl FittedText {
    pub fn is_split(&self) -> bool {
        self.lines.len() > 1
    }
}

/// Pixel size of the rendered bounding box of a single line.
pub fn measure_text(font: &FontHandle, text: &str) -> (u32, u32) {
    text_size(font.scale(), font.font(), text)
}

/// Compute the line height for the given font.
pub fn line_height(font: &FontHandle) -> u32 {
    let scaled = font.font().as_scaled(font.scale());
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Split at the first run of whitespace into (head word, remainder).
///
/// Returns `None` when there is nothing after the first word.
pub fn split_first_word(text: &str) -> Option<(String, String)> {
    let trimmed = text.trim_start();
    let idx = trimmed.find(char::is_whitespace)?;
    let (head, rest) = trimmed.split_at(idx);
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    Some((head.to_string(), rest.to_string()))
}

/// Shrink `text` until it fits `max_width`, splitting once at the floor.
///
/// The size drops by `step` while the text overflows and the size is above
/// `min_size`, so the loop always ends. A single word that overflows at the
/// floor is left on one line.
pub fn fit_text(
    font: &FontHandle,
    text: &str,
    max_width: u32,
    min_size: f32,
    step: f32,
) -> FittedText {
    let min_size = min_size.max(1.0);
    let step = step.max(1.0);

    let mut handle = font.clone();
    let (mut width, mut height) = measure_text(&handle, text);

    while width > max_width && handle.size() > min_size {
        handle = handle.with_size((handle.size() - step).max(min_size));
        (width, height) = measure_text(&handle, text);
    }

    let lines = match split_first_word(text) {
        Some((head, rest)) if width > max_width => {
            debug!(size = handle.size(), width, max_width, "Splitting name over two lines");
            vec![head, rest]
        }
        _ => vec![text.to_string()],
    };

    if lines.len() > 1 {
        width = lines
            .iter()
            .map(|line| measure_text(&handle, line).0)
            .max()
            .unwrap_or(0);
    }

    debug!(size = handle.size(), width, height, "Fitted text");
    FittedText {
        font: handle,
        lines,
        width,
        height,
    }
}

/// Top-left corner for the fitted name block.
///
/// Centred horizontally, pulled back inside the side margins when centring
/// would cross one, and lifted by half a line when the name is split.
pub fn text_origin(
    canvas_width: u32,
    canvas_height: u32,
    block_width: u32,
    line_height: u32,
    split: bool,
    config: &RenderConfig,
) -> (i32, i32) {
    let left = config.text_margin as i32;
    let right = canvas_width as i32 - config.text_margin as i32;
    let block_width = block_width as i32;

    let mut x = (canvas_width as i32 - block_width).div_euclid(2);
    if x < left {
        x = left;
    } else if x + block_width > right {
        x = right - block_width;
    }

    let lift = if split { line_height as i32 / 2 } else { 0 };
    let y = canvas_height as i32 - config.name_bottom_offset as i32 - lift;
    (x, y)
}

fn draw_lines(
    canvas: &mut RgbaImage,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    font: &FontHandle,
    lines: &[String],
) {
    let advance = (line_height(font) + LINE_SPACING) as i32;
    for (i, line) in lines.iter().enumerate() {
        let line_y = y + advance * i as i32;
        draw_text_mut(canvas, color, x, line_y, font.scale(), font.font(), line);
    }
}

/// Draw text with a drop shadow and a thick stamped outline.
///
/// The outline is the text drawn at every integer offset inside a square of
/// side `2 * thickness + 1`; the fill goes on last.
pub fn draw_text_with_effects(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    lines: &[String],
    font: &FontHandle,
    style: &TextStyle,
) {
    let (sx, sy) = style.shadow_offset;
    draw_lines(canvas, style.shadow, x + sx, y + sy, font, lines);

    let t = style.thickness.max(0);
    for dx in -t..=t {
        for dy in -t..=t {
            draw_lines(canvas, style.outline, x + dx, y + dy, font, lines);
        }
    }

    draw_lines(canvas, style.fill, x, y, font, lines);
}

/// Draw the fitted winner name near the bottom and `"{rank}."` top-left.
///
/// The rank label uses the rank handle as-is; it never goes through fitting.
pub fn draw_winner_info(
    canvas: &mut RgbaImage,
    name: &str,
    rank: u32,
    fonts: &FontSet,
    config: &RenderConfig,
) -> FittedText {
    let fitted = fit_text(
        &fonts.name,
        name,
        config.text_max_width(),
        config.min_font_size,
        config.font_size_step,
    );
    let (x, y) = text_origin(
        canvas.width(),
        canvas.height(),
        fitted.width,
        fitted.height,
        fitted.is_split(),
        config,
    );
    draw_text_with_effects(canvas, x, y, &fitted.lines, &fitted.font, &config.text_style);

    let (rx, ry) = config.rank_position;
    let label = vec![format!("{rank}.")];
    draw_text_with_effects(canvas, rx, ry, &label, &fonts.rank, &config.text_style);

    fitted
}
