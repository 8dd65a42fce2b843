//! Asset loading: logo, character portraits, card font and the roster scan.

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use card_engine::{PortraitPlacement, RenderConfig, fit_portrait};
use image::DynamicImage;
use leaderboard::{PortraitSelection, Roster, SoloRules};

/// Portrait file inside each character directory.
const PORTRAIT_FILE: &str = "1.png";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("{kind} not found: {}", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid font {}: {source}", .path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Character identifiers are the sub-directory names of `renders_dir`.
pub fn scan_roster(renders_dir: &Path, rules: SoloRules) -> Result<Roster, AssetError> {
    if !renders_dir.is_dir() {
        return Err(AssetError::NotFound {
            kind: "Renders directory",
            path: renders_dir.to_path_buf(),
        });
    }

    let mut characters = Vec::new();
    for entry in std::fs::read_dir(renders_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            characters.push(name.to_string());
        }
    }

    let roster = Roster::new(characters, rules);
    tracing::info!(
        count = roster.characters().len(),
        dir = %renders_dir.display(),
        "Scanned character roster"
    );
    Ok(roster)
}

/// Decode an image file, reporting a missing file as `NotFound`.
pub fn load_image(kind: &'static str, path: &Path) -> Result<DynamicImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound {
            kind,
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), "Loading {kind}");
    image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// `FONT_PATH` value that selects the first usable system font.
pub const SYSTEM_FONT: &str = "system";

/// Load the configured font file. Only the literal `system` searches the
/// platform font directories.
pub fn load_font(path: &Path) -> Result<FontArc, AssetError> {
    if path == Path::new(SYSTEM_FONT) {
        return load_system_font();
    }
    if !path.is_file() {
        return Err(AssetError::NotFound {
            kind: "Font",
            path: path.to_path_buf(),
        });
    }

    let data = std::fs::read(path)?;
    tracing::info!(path = %path.display(), "Using configured font");
    FontArc::try_from_vec(data).map_err(|source| AssetError::Font {
        path: path.to_path_buf(),
        source,
    })
}

fn load_system_font() -> Result<FontArc, AssetError> {
    for candidate in system_font_candidates() {
        let Ok(data) = std::fs::read(candidate) else {
            continue;
        };
        if let Ok(font) = FontArc::try_from_vec(data) {
            tracing::info!(path = %candidate, "Using system font");
            return Ok(font);
        }
    }

    Err(AssetError::NotFound {
        kind: "System font",
        path: PathBuf::from(SYSTEM_FONT),
    })
}

pub fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\arial.ttf",
            "C:\\Windows\\Fonts\\segoeui.ttf",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        ]
    }
}

/// Path of a character's portrait, `<renders_dir>/<id>/1.png`.
pub fn portrait_path(renders_dir: &Path, id: &str) -> PathBuf {
    renders_dir.join(id).join(PORTRAIT_FILE)
}

/// Load a portrait and fit it inside the card box, preserving aspect ratio.
pub fn load_portrait(
    renders_dir: &Path,
    id: &str,
    config: &RenderConfig,
) -> Result<DynamicImage, AssetError> {
    let image = load_image("Portrait", &portrait_path(renders_dir, id))?;
    Ok(fit_portrait(&image, config.card_width, config.card_height))
}

/// Load the portraits a selection needs and wrap them in the engine's
/// placement.
pub fn load_placement(
    renders_dir: &Path,
    selection: &PortraitSelection,
    config: &RenderConfig,
) -> Result<PortraitPlacement, AssetError> {
    Ok(match selection {
        PortraitSelection::Paired { left, right } => PortraitPlacement::Paired {
            left: load_portrait(renders_dir, left, config)?,
            right: load_portrait(renders_dir, right, config)?,
        },
        PortraitSelection::Solo(id) => PortraitPlacement::Solo {
            image: load_portrait(renders_dir, id, config)?,
        },
    })
}
