//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;

use anyhow::bail;
use card_engine::{CardError, RenderConfig};
use leaderboard::SoloRules;

use super::defaults::{DEFAULT_SETTINGS, get_default};
use super::validation::validate_setting;

/// Runtime configuration for one generation run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub leaderboard_path: PathBuf,
    pub renders_dir: PathBuf,
    pub logo_path: PathBuf,
    pub font_path: PathBuf,
    pub output_dir: PathBuf,
    pub card_width: u32,
    pub card_height: u32,
    pub corner_radius: u32,
    pub name_font_size: f32,
    pub rank_font_size: f32,
    pub solo_characters: Vec<String>,
    pub blank_character: String,
    pub parallel_render: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            leaderboard_path: "ranking.txt".into(),
            renders_dir: "renders".into(),
            logo_path: "logo/logo.png".into(),
            font_path: "font/RussoOne-Regular.ttf".into(),
            output_dir: "rankings".into(),
            card_width: 500,
            card_height: 500,
            corner_radius: 30,
            name_font_size: 60.0,
            rank_font_size: 80.0,
            solo_characters: vec!["ptx".into(), "gold".into()],
            blank_character: "blank".into(),
            parallel_render: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset or empty keys. Every value is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> Result<String, anyhow::Error> {
            let value = lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .or_else(|| get_default(key).map(str::to_string))
                .unwrap_or_default();
            if let Err(msg) = validate_setting(key, &value) {
                let about = DEFAULT_SETTINGS.get(key).map_or("", |d| d.description);
                bail!("Invalid setting {key}='{value}' ({about}): {msg}");
            }
            Ok(value)
        };

        Ok(Self {
            leaderboard_path: g("LEADERBOARD_PATH")?.into(),
            renders_dir: g("RENDERS_DIR")?.into(),
            logo_path: g("LOGO_PATH")?.into(),
            font_path: g("FONT_PATH")?.into(),
            output_dir: g("OUTPUT_DIR")?.into(),
            card_width: g("CARD_WIDTH")?.parse()?,
            card_height: g("CARD_HEIGHT")?.parse()?,
            corner_radius: g("CORNER_RADIUS")?.parse()?,
            name_font_size: g("NAME_FONT_SIZE")?.parse()?,
            rank_font_size: g("RANK_FONT_SIZE")?.parse()?,
            solo_characters: parse_list(&g("SOLO_CHARACTERS")?),
            blank_character: g("BLANK_CHARACTER")?,
            parallel_render: g("PARALLEL_RENDER")? == "true",
        })
    }

    pub fn solo_rules(&self) -> SoloRules {
        SoloRules {
            reserved: self.solo_characters.clone(),
            blank: self.blank_character.clone(),
        }
    }

    /// Card template at the configured size and corner radius.
    pub fn render_config(&self) -> Result<RenderConfig, CardError> {
        let mut config = RenderConfig::with_size(self.card_width, self.card_height)?;
        config.corner_radius = self.corner_radius;
        Ok(config)
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}
