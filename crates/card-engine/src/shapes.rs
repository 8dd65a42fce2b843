//! Decorative layers: diagonal bands, text backdrop bars, rounded masks.

use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use tracing::debug;

use crate::compose;
use crate::gradient::{gradient_size, make_gradient};
use crate::rotate::{rotate_expand, threshold_mask};

/// Rotation of the rainbow band, counter-clockwise.
pub const GRADIENT_ANGLE: f32 = 45.0;

/// Rotation of the accent band; a couple of degrees off the gradient so the
/// two bands read as separate stripes.
pub const ACCENT_ANGLE: f32 = -47.0;

pub const ACCENT_COLOR: Rgba<u8> = Rgba([173, 216, 230, 255]);

/// Accent band shift right of the gradient band.
const ACCENT_NUDGE_X: i32 = 10;

/// Accent band shift down, applied on top of the horizontal nudge.
const ACCENT_NUDGE_Y: i32 = 5;

const BAR_HEIGHT: f32 = 100.0;
const BAR_RADIUS: u32 = 20;
pub const BAR_FRONT_COLOR: Rgba<u8> = Rgba([0, 0, 139, 255]);
pub const BAR_BACK_COLOR: Rgba<u8> = Rgba([255, 255, 0, 255]);

/// A rotated layer with its binary stencil and where it goes on the canvas.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub image: RgbaImage,
    pub mask: GrayImage,
    pub position: (i32, i32),
}

impl Overlay {
    fn from_rotated(image: RgbaImage, position: (i32, i32)) -> Self {
        let mask = threshold_mask(&image);
        Self {
            image,
            mask,
            position,
        }
    }

    /// Paste the layer through its stencil.
    pub fn apply(&self, canvas: &mut RgbaImage) {
        compose::paste(
            canvas,
            &self.image,
            self.position.0,
            self.position.1,
            Some(&self.mask),
        );
    }
}

/// Offset that puts the centre of a rotated `size` square near the canvas
/// origin: minus half the square's diagonal on both axes.
pub fn diagonal_origin(size: u32) -> i32 {
    let diagonal = (2.0 * f64::from(size).powi(2)).sqrt();
    -((diagonal / 2.0) as i32)
}

/// Rainbow gradient square rotated 45 degrees into the top-left corner.
pub fn diagonal_gradient_overlay(canvas_width: u32, canvas_height: u32) -> Overlay {
    let size = gradient_size(canvas_width, canvas_height);
    let gradient = DynamicImage::ImageRgb8(make_gradient(size, size)).to_rgba8();
    let rotated = rotate_expand(&gradient, GRADIENT_ANGLE);
    let origin = diagonal_origin(size);
    debug!(size, origin, "Built gradient overlay");
    Overlay::from_rotated(rotated, (origin, origin))
}

/// Solid light-blue square of the same size, turned the other way and
/// nudged right and down from the gradient band.
pub fn accent_square_overlay(canvas_width: u32, canvas_height: u32) -> Overlay {
    let size = gradient_size(canvas_width, canvas_height);
    let square = RgbaImage::from_pixel(size, size, ACCENT_COLOR);
    let rotated = rotate_expand(&square, ACCENT_ANGLE);
    let x = diagonal_origin(size) + ACCENT_NUDGE_X;
    let y = x + ACCENT_NUDGE_Y;
    debug!(size, x, y, "Built accent overlay");
    Overlay::from_rotated(rotated, (x, y))
}

/// Whether (`x`, `y`) lies inside a `w` x `h` rectangle with corner radius `r`.
pub fn rounded_rect_contains(x: i32, y: i32, w: i32, h: i32, r: i32) -> bool {
    if x < 0 || y < 0 || x >= w || y >= h {
        return false;
    }
    let r = r.min(w / 2).min(h / 2);
    if r <= 0 || (x >= r && x < w - r) || (y >= r && y < h - r) {
        return true;
    }
    let cx = if x < r { r - 1 } else { w - r };
    let cy = if y < r { r - 1 } else { h - r };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

/// Fill the rounded rectangle spanning `x0..=x1`, `y0..=y1` (clipped).
pub fn fill_rounded_rect(
    img: &mut RgbaImage,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    radius: u32,
    color: Rgba<u8>,
) {
    let (w, h) = (x1 - x0 + 1, y1 - y0 + 1);
    if w <= 0 || h <= 0 {
        return;
    }
    let r = radius as i32;
    let max_x = img.width() as i32;
    let max_y = img.height() as i32;

    for py in y0.max(0)..=y1.min(max_y - 1) {
        for px in x0.max(0)..=x1.min(max_x - 1) {
            if rounded_rect_contains(px - x0, py - y0, w, h, r) {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Two stacked rounded bars along the bottom edge as the name backdrop.
///
/// The yellow bar sits behind, shifted right by a tenth of the canvas width
/// and down by a twentieth of the bar height; the dark blue bar is drawn on
/// top without offset.
pub fn draw_text_bars(canvas: &mut RgbaImage) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let bar_width = w + 10.0;
    let start_x = (w - bar_width) / 2.0 + 30.0;
    let end_x = start_x + bar_width;
    let bottom_y = h - 0.02 * h;
    let top_y = bottom_y - BAR_HEIGHT;
    let back_dx = w * 0.1;
    let back_dy = BAR_HEIGHT * 0.05;

    let corner = |x: f32, y: f32| (x.round() as i32, y.round() as i32);

    fill_rounded_rect(
        canvas,
        corner(start_x + back_dx, top_y + back_dy),
        corner(end_x + back_dx, bottom_y + back_dy),
        BAR_RADIUS,
        BAR_BACK_COLOR,
    );
    fill_rounded_rect(
        canvas,
        corner(start_x, top_y),
        corner(end_x, bottom_y),
        BAR_RADIUS,
        BAR_FRONT_COLOR,
    );
}

/// Single-channel rounded-rectangle mask covering a whole `width` x `height`
/// canvas: 255 inside, 0 in the clipped corners.
pub fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let (w, h, r) = (width as i32, height as i32, radius as i32);
    GrayImage::from_fn(width, height, |x, y| {
        if rounded_rect_contains(x as i32, y as i32, w, h, r) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}
