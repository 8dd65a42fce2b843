//! Pastel rainbow gradient generation.

use image::{Rgb, RgbImage};
use tracing::debug;

/// Pastel rainbow ramp: red, orange, yellow, green, blue, indigo, violet.
pub const PASTEL_RAMP: [Rgb<u8>; 7] = [
    Rgb([255, 102, 102]),
    Rgb([255, 178, 102]),
    Rgb([255, 255, 102]),
    Rgb([178, 255, 102]),
    Rgb([102, 178, 255]),
    Rgb([178, 102, 255]),
    Rgb([255, 102, 178]),
];

/// Interpolate the ramp at `position` in `[0, 1]`.
///
/// The ramp is split into `len - 1` equal segments; the fraction inside the
/// bracketing segment weights the two stops and each channel is truncated.
/// Positions at or past the end return the last stop.
pub fn color_at(ramp: &[Rgb<u8>], position: f64) -> Rgb<u8> {
    let Some(last) = ramp.last() else {
        return Rgb([0, 0, 0]);
    };
    let segments = (ramp.len() - 1) as f64;
    let scaled = position.max(0.0) * segments;
    let idx = scaled as usize;

    if idx + 1 >= ramp.len() {
        return *last;
    }

    let frac = scaled - idx as f64;
    let (from, to) = (ramp[idx], ramp[idx + 1]);
    // Stays within the two stops; equal channels come out exact
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac) as u8;

    Rgb([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
    ])
}

/// Build a vertical gradient: row `y` is filled with `color_at(y / height)`.
pub fn make_gradient(width: u32, height: u32) -> RgbImage {
    let (width, height) = (width.max(1), height.max(1));
    let mut img = RgbImage::new(width, height);

    for y in 0..height {
        let color = color_at(&PASTEL_RAMP, f64::from(y) / f64::from(height));
        for x in 0..width {
            img.put_pixel(x, y, color);
        }
    }

    img
}

/// Side length of the square gradient for a canvas.
///
/// `floor((width + height^2)^0.45)`, at least 1.
pub fn gradient_size(canvas_width: u32, canvas_height: u32) -> u32 {
    let base = f64::from(canvas_width) + f64::from(canvas_height).powi(2);
    let size = base.powf(0.45) as u32;
    debug!(canvas_width, canvas_height, size, "Computed gradient size");
    size.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_at_endpoints_are_exact() {
        assert_eq!(color_at(&PASTEL_RAMP, 0.0), PASTEL_RAMP[0]);
        assert_eq!(color_at(&PASTEL_RAMP, 1.0), PASTEL_RAMP[6]);
    }

    #[test]
    fn color_at_middle_stop_is_exact() {
        assert_eq!(color_at(&PASTEL_RAMP, 0.5), PASTEL_RAMP[3]);
    }

    #[test]
    fn color_at_between_stops_is_convex_combination() {
        for step in 1..600 {
            let position = f64::from(step) / 600.0;
            let idx = (position * 6.0) as usize;
            let color = color_at(&PASTEL_RAMP, position);
            if idx >= 6 {
                continue;
            }
            let (a, b) = (PASTEL_RAMP[idx], PASTEL_RAMP[idx + 1]);
            for c in 0..3 {
                let lo = a[c].min(b[c]);
                let hi = a[c].max(b[c]);
                assert!(
                    (lo..=hi).contains(&color[c]),
                    "channel {c} at {position}: {} not in {lo}..={hi}",
                    color[c]
                );
            }
        }
    }

    #[test]
    fn color_at_keeps_shared_channels_exact() {
        // Red and orange share R = 255 and B = 102
        for position in [1.0 / 150.0, 0.05, 0.1, 0.16] {
            let color = color_at(&PASTEL_RAMP, position);
            assert_eq!(color[0], 255, "red at {position}");
            assert_eq!(color[2], 102, "blue at {position}");
        }
    }

    #[test]
    fn color_at_midpoint_truncates() {
        // Halfway between orange (255,178,102) and yellow (255,255,102)
        let color = color_at(&PASTEL_RAMP, 0.25);
        assert_eq!(color, Rgb([255, 216, 102]));
    }

    #[test]
    fn make_gradient_rows_are_uniform() {
        let img = make_gradient(8, 12);
        assert_eq!(img.dimensions(), (8, 12));
        assert_eq!(*img.get_pixel(0, 0), PASTEL_RAMP[0]);
        for y in 0..12 {
            let first = *img.get_pixel(0, y);
            for x in 1..8 {
                assert_eq!(*img.get_pixel(x, y), first);
            }
        }
        // Colour changes down the image
        assert_ne!(*img.get_pixel(0, 11), PASTEL_RAMP[0]);
    }

    #[test]
    fn gradient_size_matches_template() {
        assert_eq!(gradient_size(500, 500), 268);
        assert_eq!(gradient_size(0, 0), 1);
    }
}
