use crate::config::AppConfig;

/// Foundation init: environment, then validated configuration.
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load()?;
    tracing::info!(
        leaderboard = %config.leaderboard_path.display(),
        output = %config.output_dir.display(),
        width = config.card_width,
        height = config.card_height,
        "Settings loaded"
    );
    Ok(config)
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}
