//! Rotation with canvas expansion and hard-threshold stencils.
//!
//! Overlays are rotated by arbitrary angles onto a transparent canvas large
//! enough to hold the whole result, then a binary mask picks out every pixel
//! that is not black.

use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use tracing::debug;

use crate::compose;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const EDGE_EPSILON: f64 = 1e-9;

/// Canvas size needed to hold a `width` x `height` image rotated by `degrees`.
///
/// The four corners are rotated about the centre and the extremes rounded
/// outwards, so the result always contains the whole rotated image.
pub fn expanded_size(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let (w, h) = (f64::from(width), f64::from(height));
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (sin, cos) = f64::from(degrees).to_radians().sin_cos();

    let mut xs = [0.0f64; 4];
    let mut ys = [0.0f64; 4];
    for (i, (x, y)) in [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)].into_iter().enumerate() {
        let (dx, dy) = (x - cx, y - cy);
        xs[i] = cx + dx * cos + dy * sin;
        ys[i] = cy - dx * sin + dy * cos;
    }

    // Trig noise must not push an exact edge into the next pixel
    let span = |v: &[f64; 4]| {
        let max = v.iter().copied().fold(f64::MIN, f64::max);
        let min = v.iter().copied().fold(f64::MAX, f64::min);
        ((max - EDGE_EPSILON).ceil() - (min + EDGE_EPSILON).floor()) as u32
    };

    (span(&xs).max(1), span(&ys).max(1))
}

/// Rotate counter-clockwise by `degrees`, expanding the canvas to fit.
///
/// Uncovered pixels are fully transparent black. Nearest-neighbour sampling
/// keeps edges hard.
pub fn rotate_expand(img: &RgbaImage, degrees: f32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (new_w, new_h) = expanded_size(w, h, degrees);
    debug!(w, h, new_w, new_h, degrees, "Rotating with expansion");

    let mut padded = RgbaImage::from_pixel(new_w, new_h, TRANSPARENT);
    let offset_x = (new_w as i32 - w as i32) / 2;
    let offset_y = (new_h as i32 - h as i32) / 2;
    compose::paste(&mut padded, img, offset_x, offset_y, None);

    // imageproc turns clockwise for positive angles
    rotate_about_center(
        &padded,
        -degrees.to_radians(),
        Interpolation::Nearest,
        TRANSPARENT,
    )
}

/// Binary stencil: 255 wherever the pixel's brightness is above zero.
pub fn threshold_mask(img: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y).to_luma()[0] > 0 {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([173, 216, 230, 255]))
    }

    #[test]
    fn test_expanded_size_zero_and_right_angles() {
        assert_eq!(expanded_size(10, 20, 0.0), (10, 20));
        assert_eq!(expanded_size(10, 20, 90.0), (20, 10));
    }

    #[test]
    fn test_expanded_size_diagonal() {
        // 268 * sqrt(2) = 379.01, rounded outwards on both sides
        assert_eq!(expanded_size(268, 268, 45.0), (380, 380));
        let (w, h) = expanded_size(268, 268, -47.0);
        assert!(w >= 379 && h >= 379);
    }

    #[test]
    fn test_rotate_expand_keeps_center_and_clears_corners() {
        let rotated = rotate_expand(&solid(100), 45.0);
        let (w, h) = rotated.dimensions();
        assert!(w > 100 && h > 100);

        assert_eq!(rotated.get_pixel(w / 2, h / 2)[3], 255);
        assert_eq!(*rotated.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*rotated.get_pixel(w - 1, 0), TRANSPARENT);
        assert_eq!(*rotated.get_pixel(0, h - 1), TRANSPARENT);
        assert_eq!(*rotated.get_pixel(w - 1, h - 1), TRANSPARENT);
    }

    #[test]
    fn test_rotate_expand_zero_is_identity() {
        let mut img = solid(6);
        img.put_pixel(1, 2, Rgba([1, 2, 3, 255]));
        let rotated = rotate_expand(&img, 0.0);
        assert_eq!(rotated, img);
    }

    #[test]
    fn test_threshold_mask_is_binary() {
        let rotated = rotate_expand(&solid(64), 45.0);
        let mask = threshold_mask(&rotated);
        assert_eq!(mask.dimensions(), rotated.dimensions());
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));

        let (w, h) = mask.dimensions();
        assert_eq!(mask.get_pixel(w / 2, h / 2)[0], 255);
        assert_eq!(mask.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_threshold_mask_black_is_excluded() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([40, 40, 40, 255]));
        let mask = threshold_mask(&img);
        assert_eq!(mask.get_pixel(0, 0)[0], 0);
        assert_eq!(mask.get_pixel(1, 0)[0], 255);
    }
}
