//! Compositing primitives: masked paste and alpha replacement.
//!
//! Offsets are signed so layers can hang off any edge of the destination;
//! whatever falls outside is clipped.

use image::{GrayImage, Rgba, RgbaImage};

/// Paste `src` onto `dst` with its top-left corner at (`x`, `y`).
///
/// Without a mask every covered pixel is replaced, alpha included. With a
/// mask (same size as `src`) each channel, alpha included, is interpolated
/// between destination and source by the mask value.
pub fn paste(dst: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32, mask: Option<&GrayImage>) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let Some((tx, ty)) = target(dst, x, y, sx, sy) else {
            continue;
        };
        let weight = match mask {
            Some(m) if sx < m.width() && sy < m.height() => m.get_pixel(sx, sy)[0],
            Some(_) => 0,
            None => 255,
        };
        put_weighted(dst, tx, ty, pixel, weight);
    }
}

/// Paste `src` using its own alpha channel as the mask.
pub fn paste_alpha(dst: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        if let Some((tx, ty)) = target(dst, x, y, sx, sy) {
            put_weighted(dst, tx, ty, pixel, pixel[3]);
        }
    }
}

/// Replace the alpha channel of `img` with `mask`.
///
/// Pixels outside the mask keep their alpha.
pub fn put_alpha(img: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if x < mask.width() && y < mask.height() {
            pixel[3] = mask.get_pixel(x, y)[0];
        }
    }
}

fn target(dst: &RgbaImage, x: i32, y: i32, sx: u32, sy: u32) -> Option<(u32, u32)> {
    let tx = i64::from(x) + i64::from(sx);
    let ty = i64::from(y) + i64::from(sy);
    if tx < 0 || ty < 0 || tx >= i64::from(dst.width()) || ty >= i64::from(dst.height()) {
        return None;
    }
    Some((tx as u32, ty as u32))
}

fn put_weighted(dst: &mut RgbaImage, x: u32, y: u32, src: &Rgba<u8>, weight: u8) {
    match weight {
        0 => {}
        255 => dst.put_pixel(x, y, *src),
        w => {
            let bg = *dst.get_pixel(x, y);
            dst.put_pixel(x, y, blend_pixel(&bg, src, w));
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, weight: u8) -> Rgba<u8> {
    let w = u32::from(weight);
    let inv = 255 - w;
    let mix = |f: u8, b: u8| ((u32::from(f) * w + u32::from(b) * inv + 127) / 255) as u8;
    Rgba([
        mix(fg[0], bg[0]),
        mix(fg[1], bg[1]),
        mix(fg[2], bg[2]),
        mix(fg[3], bg[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn paste_does_not_panic_on_out_of_bounds() {
        let mut base = RgbaImage::new(100, 100);
        let top = RgbaImage::from_pixel(50, 50, RED);
        paste(&mut base, &top, 80, 80, None);
        paste(&mut base, &top, -40, -45, None);
        paste(&mut base, &top, -500, 500, None);

        assert_eq!(*base.get_pixel(99, 99), RED);
        assert_eq!(*base.get_pixel(9, 4), RED);
        assert_eq!(*base.get_pixel(10, 5), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn paste_without_mask_replaces_alpha() {
        let mut base = RgbaImage::from_pixel(4, 4, BLACK);
        let top = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 0]));
        paste(&mut base, &top, 1, 1, None);
        assert_eq!(*base.get_pixel(1, 1), Rgba([1, 2, 3, 0]));
        assert_eq!(*base.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn paste_with_binary_mask_copies_selected_pixels_only() {
        let mut base = RgbaImage::from_pixel(2, 1, BLACK);
        let top = RgbaImage::from_pixel(2, 1, RED);
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(1, 0, Luma([255]));
        paste(&mut base, &top, 0, 0, Some(&mask));
        assert_eq!(*base.get_pixel(0, 0), BLACK);
        assert_eq!(*base.get_pixel(1, 0), RED);
    }

    #[test]
    fn paste_alpha_blends_partial_coverage() {
        let mut base = RgbaImage::from_pixel(1, 1, BLACK);
        let top = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        paste_alpha(&mut base, &top, 0, 0);
        let px = base.get_pixel(0, 0);
        assert_eq!(px[0], 128);
        assert!(px[3] > 128);
    }

    #[test]
    fn paste_alpha_skips_transparent_pixels() {
        let mut base = RgbaImage::from_pixel(1, 1, BLACK);
        let top = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0]));
        paste_alpha(&mut base, &top, 0, 0);
        assert_eq!(*base.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn put_alpha_replaces_channel() {
        let mut img = RgbaImage::from_pixel(2, 1, RED);
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(0, 0, Luma([77]));
        put_alpha(&mut img, &mask);
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 77]));
        assert_eq!(*img.get_pixel(1, 0), Rgba([255, 0, 0, 0]));
    }
}
