//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        "LEADERBOARD_PATH",
        "ranking.txt",
        "Leaderboard file; prompts are used when it does not exist",
    ),
    ("RENDERS_DIR", "renders", "Portrait root, one sub-directory per character"),
    ("LOGO_PATH", "logo/logo.png", "Watermark logo"),
    (
        "FONT_PATH",
        "font/RussoOne-Regular.ttf",
        "Card font file, or `system` for the first installed system font",
    ),
    ("OUTPUT_DIR", "rankings", "Output directory, recreated every run"),
    ("CARD_WIDTH", "500", "Card width in pixels"),
    ("CARD_HEIGHT", "500", "Card height in pixels"),
    ("CORNER_RADIUS", "30", "Card corner radius in pixels"),
    ("NAME_FONT_SIZE", "60", "Starting size of the winner name"),
    ("RANK_FONT_SIZE", "80", "Size of the rank label"),
    ("SOLO_CHARACTERS", "ptx,gold", "Characters shown alone in both portrait slots"),
    ("BLANK_CHARACTER", "blank", "Placeholder for an empty second character"),
    ("PARALLEL_RENDER", "true", "Render cards concurrently"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Every known key, in declaration order.
pub fn setting_keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|&(key, _, _)| key)
}
