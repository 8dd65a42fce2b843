//! Asset resizing: logo watermarks and character portraits.
//!
//! Logos keep their aspect ratio and get an opacity multiplier; portraits are
//! fitted into a box and later force-resized into the card's portrait slot.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// Resize an image to a target width while maintaining aspect ratio.
///
/// Uses Lanczos3 filtering. Returns the original image unchanged if it
/// already matches the target width.
pub fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    let (orig_w, orig_h) = (img.width(), img.height());
    let width = width.max(1);

    if orig_w == width {
        debug!(width, "Image already at target width, skipping resize");
        return img.clone();
    }

    let ratio = f64::from(width) / f64::from(orig_w);
    let new_height = (f64::from(orig_h) * ratio).round() as u32;
    let new_height = new_height.max(1);

    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height,
        "Resizing image to target width"
    );

    img.resize_exact(width, new_height, FilterType::Lanczos3)
}

/// Scale the alpha channel of every pixel by `opacity`, truncating.
///
/// `opacity` is clamped to `[0, 1]`, so the result never exceeds the input
/// alpha and fully transparent pixels stay transparent.
pub fn apply_opacity(img: &mut RgbaImage, opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    for pixel in img.pixels_mut() {
        pixel[3] = (f32::from(pixel[3]) * opacity) as u8;
    }
}

/// Resize a logo to `target_width` (aspect preserved) and fade it.
pub fn resize_with_opacity(img: &DynamicImage, target_width: u32, opacity: f32) -> RgbaImage {
    let mut rgba = resize_to_width(img, target_width).to_rgba8();
    apply_opacity(&mut rgba, opacity);
    rgba
}

/// Fit a character portrait into a `box_w` x `box_h` box.
///
/// Height is fitted first; when that makes the portrait wider than the box,
/// the width is pinned instead and the height derived from it. Sizes are
/// truncated, never rounded.
pub fn fit_portrait(img: &DynamicImage, box_w: u32, box_h: u32) -> DynamicImage {
    let (orig_w, orig_h) = (f64::from(img.width()), f64::from(img.height()));
    let (box_w, box_h) = (box_w.max(1), box_h.max(1));

    let height_fit_w = (f64::from(box_h) / orig_h * orig_w) as u32;
    let (new_w, new_h) = if height_fit_w > box_w {
        (box_w, (f64::from(box_w) / orig_w * orig_h) as u32)
    } else {
        (height_fit_w, box_h)
    };
    let (new_w, new_h) = (new_w.max(1), new_h.max(1));

    debug!(
        orig_w = img.width(),
        orig_h = img.height(),
        new_w,
        new_h,
        "Fitting portrait into box"
    );

    img.resize_exact(new_w, new_h, FilterType::Lanczos3)
}

/// Resize to exactly `width` x `height`, ignoring aspect ratio.
pub fn force_resize(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    img.resize_exact(width.max(1), height.max(1), FilterType::Lanczos3)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};

    /// Create a test DynamicImage with given dimensions.
    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let gray = GrayImage::from_pixel(width, height, Luma([128]));
        DynamicImage::ImageLuma8(gray)
    }

    #[test]
    fn test_resize_to_width_downscale() {
        let img = create_test_image(800, 600);
        let result = resize_to_width(&img, 400);
        assert_eq!(result.width(), 400);
        assert_eq!(result.height(), 300);
    }

    #[test]
    fn test_resize_to_width_same_width() {
        let img = create_test_image(384, 500);
        let result = resize_to_width(&img, 384);
        assert_eq!(result.width(), 384);
        assert_eq!(result.height(), 500);
    }

    #[test]
    fn test_resize_with_opacity_preserves_aspect() {
        for &(w, h, target) in &[(1000, 333, 500), (7, 13, 500), (640, 480, 960), (3, 1000, 17)] {
            let img = create_test_image(w, h);
            let result = resize_with_opacity(&img, target, 0.5);
            let expected = (f64::from(target) * f64::from(h) / f64::from(w)).round() as i64;
            assert_eq!(result.width(), target);
            assert!(
                (i64::from(result.height()) - expected).abs() <= 1,
                "{w}x{h} -> {target}: got height {}, expected {expected}",
                result.height()
            );
        }
    }

    #[test]
    fn test_resize_preserves_non_zero_dimensions() {
        let img = create_test_image(1000, 1);
        let result = resize_with_opacity(&img, 10, 1.0);
        assert_eq!(result.width(), 10);
        assert!(result.height() >= 1, "Height should be at least 1");
    }

    #[test]
    fn test_apply_opacity_truncates_and_is_bounded() {
        let mut img = RgbaImage::new(4, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 101]));
        img.put_pixel(2, 0, Rgba([10, 20, 30, 0]));
        img.put_pixel(3, 0, Rgba([10, 20, 30, 1]));
        apply_opacity(&mut img, 0.5);

        assert_eq!(img.get_pixel(0, 0)[3], 127);
        assert_eq!(img.get_pixel(1, 0)[3], 50);
        assert_eq!(img.get_pixel(2, 0)[3], 0);
        assert_eq!(img.get_pixel(3, 0)[3], 0);
        // Colour channels are untouched
        assert_eq!(&img.get_pixel(0, 0).0[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_apply_opacity_is_monotonic() {
        let mut previous = 0u8;
        for step in 0..=10 {
            let opacity = step as f32 / 10.0;
            let mut img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 200]));
            apply_opacity(&mut img, opacity);
            let alpha = img.get_pixel(0, 0)[3];
            assert!(alpha >= previous);
            assert!(alpha <= 200);
            previous = alpha;
        }
        assert_eq!(previous, 200);
    }

    #[test]
    fn test_fit_portrait_tall_image_fits_height() {
        let img = create_test_image(200, 400);
        let result = fit_portrait(&img, 500, 500);
        assert_eq!((result.width(), result.height()), (250, 500));
    }

    #[test]
    fn test_fit_portrait_wide_image_pins_width() {
        let img = create_test_image(1000, 200);
        let result = fit_portrait(&img, 500, 500);
        assert_eq!((result.width(), result.height()), (500, 100));
    }

    #[test]
    fn test_fit_portrait_extreme_ratios_stay_non_zero() {
        let wide = fit_portrait(&create_test_image(1000, 10), 500, 500);
        assert_eq!(wide.width(), 500);
        assert_eq!(wide.height(), 5);

        let thin = fit_portrait(&create_test_image(10, 1000), 500, 500);
        assert_eq!(thin.width(), 5);
        assert_eq!(thin.height(), 500);

        let sliver = fit_portrait(&create_test_image(1, 5000), 500, 500);
        assert!(sliver.width() >= 1);
    }

    #[test]
    fn test_force_resize_ignores_aspect() {
        let img = create_test_image(10, 1000);
        let result = force_resize(&img, 250, 500);
        assert_eq!(result.dimensions(), (250, 500));
    }
}
