//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").unwrap());
static RE_IDENTIFIER_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[A-Za-z0-9_\-]+\s*(,\s*[A-Za-z0-9_\-]+\s*)*$").unwrap()
});

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "LEADERBOARD_PATH" | "RENDERS_DIR" | "LOGO_PATH" | "FONT_PATH" | "OUTPUT_DIR" => {
            if value.trim().is_empty() {
                return Err("path must not be empty".into());
            }
        }
        "CARD_WIDTH" | "CARD_HEIGHT" => validate_int_range(value, 200, 4000)?,
        "CORNER_RADIUS" => validate_int_range(value, 0, 500)?,
        "NAME_FONT_SIZE" | "RANK_FONT_SIZE" => validate_int_range(value, 8, 400)?,
        "SOLO_CHARACTERS" => {
            if !value.is_empty() && !RE_IDENTIFIER_LIST.is_match(value) {
                return Err("must be a comma-separated list of character names".into());
            }
        }
        "BLANK_CHARACTER" => {
            if !RE_IDENTIFIER.is_match(value) {
                return Err("must be a single character name".into());
            }
        }
        "PARALLEL_RENDER" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
