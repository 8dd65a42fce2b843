//! Output directory: one `<rank>.png` per card plus `composite.png`.

use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};

pub const SHEET_FILE: &str = "composite.png";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Remove any previous run's output and create an empty directory.
pub fn prepare_output_dir(dir: &Path) -> Result<(), OutputError> {
    if dir.exists() {
        tracing::info!(dir = %dir.display(), "Clearing previous output");
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

pub fn card_path(dir: &Path, rank: u32) -> PathBuf {
    dir.join(format!("{rank}.png"))
}

pub fn sheet_path(dir: &Path) -> PathBuf {
    dir.join(SHEET_FILE)
}

pub fn save_card(dir: &Path, rank: u32, card: &RgbaImage) -> Result<PathBuf, OutputError> {
    save_png(card_path(dir, rank), card)
}

pub fn save_sheet(dir: &Path, sheet: &RgbaImage) -> Result<PathBuf, OutputError> {
    save_png(sheet_path(dir), sheet)
}

fn save_png(path: PathBuf, image: &RgbaImage) -> Result<PathBuf, OutputError> {
    match image.save(&path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Image saved");
            Ok(path)
        }
        Err(source) => Err(OutputError::Encode { path, source }),
    }
}

/// Read back cards for ranks 1, 2, ... up to `max`, stopping at the first
/// rank without a file.
pub fn load_cards(dir: &Path, max: usize) -> Vec<DynamicImage> {
    let mut cards = Vec::new();
    for rank in 1..=max {
        let path = card_path(dir, rank as u32);
        match image::open(&path) {
            Ok(card) => cards.push(card),
            Err(e) => {
                tracing::warn!(rank, path = %path.display(), "Sheet slot left empty: {e}");
                break;
            }
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn prepare_clears_previous_output() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("rankings");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("9.png"), b"old").unwrap();

        prepare_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn cards_load_back_in_rank_order_until_gap() {
        let dir = tempfile::tempdir().unwrap();
        for (rank, shade) in [(1, 10), (2, 20), (4, 40)] {
            let card = RgbaImage::from_pixel(8, 8, Rgba([shade, 0, 0, 255]));
            save_card(dir.path(), rank, &card).unwrap();
        }

        let cards = load_cards(dir.path(), 8);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].to_rgba8().get_pixel(0, 0)[0], 20);
    }

    #[test]
    fn paths_follow_naming_convention() {
        let dir = Path::new("rankings");
        assert_eq!(card_path(dir, 3), PathBuf::from("rankings/3.png"));
        assert_eq!(sheet_path(dir), PathBuf::from("rankings/composite.png"));
    }
}
