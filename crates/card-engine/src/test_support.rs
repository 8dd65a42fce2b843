//! Shared helpers for unit tests.

use ab_glyph::FontArc;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// First installed system font. Panics when none of the candidates exist.
pub fn test_font() -> FontArc {
    FONT_CANDIDATES
        .iter()
        .filter_map(|path| std::fs::read(path).ok())
        .find_map(|data| FontArc::try_from_vec(data).ok())
        .expect("test font: install DejaVu Sans or Liberation Sans")
}
