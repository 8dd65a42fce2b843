//! End-to-end generation run: placements in, card files and sheet out.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use card_engine::{
    CardAssets, FontSet, RenderConfig, SHEET_SLOTS, SheetLayout, assemble_sheet, compose_card,
};
use image::DynamicImage;
use leaderboard::{CardRecord, PortraitSelection, Roster, parse_leaderboard};
use tokio::task::JoinSet;

use super::prompt::PromptSession;
use super::{assets, output};
use crate::config::AppConfig;

/// Ranks asked for interactively.
pub const PROMPT_RANKS: u32 = 8;

/// Files written by a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Card files in rank order.
    pub cards: Vec<PathBuf>,
    pub sheet: Option<PathBuf>,
}

struct CardJob {
    record: CardRecord,
    selection: PortraitSelection,
}

/// Read-only state shared by every card worker.
struct RenderContext {
    assets: CardAssets,
    config: RenderConfig,
    renders_dir: PathBuf,
    output_dir: PathBuf,
}

/// Full run: scan the roster, gather placements, render.
pub async fn run(config: &AppConfig) -> anyhow::Result<RunSummary> {
    let roster = assets::scan_roster(&config.renders_dir, config.solo_rules())?;
    let records = load_records(config, &roster).await?;
    generate(config, &roster, records).await
}

/// Placements from the leaderboard file, or from stdin prompts when the file
/// does not exist.
pub async fn load_records(config: &AppConfig, roster: &Roster) -> anyhow::Result<Vec<CardRecord>> {
    let path = &config.leaderboard_path;
    if path.is_file() {
        tracing::info!(path = %path.display(), "Reading leaderboard file");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(parse_leaderboard(&content)?);
    }

    tracing::info!(path = %path.display(), "No leaderboard file, prompting for placements");
    let roster = roster.clone();
    let records = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        PromptSession::new(stdin.lock(), std::io::stdout(), &roster).collect(PROMPT_RANKS)
    })
    .await??;
    Ok(records)
}

/// Render every record and assemble the sheet.
///
/// All records are resolved against the roster before the output directory
/// is touched. Cards already written stay on disk if a later one fails.
pub async fn generate(
    config: &AppConfig,
    roster: &Roster,
    records: Vec<CardRecord>,
) -> anyhow::Result<RunSummary> {
    if records.is_empty() {
        tracing::warn!("No placements to render");
        return Ok(RunSummary::default());
    }

    let selections = roster.resolve_all(&records)?;
    let jobs: Vec<CardJob> = records
        .into_iter()
        .zip(selections)
        .map(|(record, selection)| CardJob { record, selection })
        .collect();

    let render_config = config.render_config()?;
    let logo = assets::load_image("Logo", &config.logo_path)?;
    let font = assets::load_font(&config.font_path)?;
    let fonts = FontSet::new(font, config.name_font_size, config.rank_font_size);

    output::prepare_output_dir(&config.output_dir)?;

    let ctx = Arc::new(RenderContext {
        assets: CardAssets {
            logo: logo.clone(),
            fonts,
        },
        config: render_config,
        renders_dir: config.renders_dir.clone(),
        output_dir: config.output_dir.clone(),
    });

    let mut rendered = if config.parallel_render {
        render_parallel(&ctx, jobs).await?
    } else {
        jobs.iter()
            .map(|job| render_card(&ctx, job))
            .collect::<anyhow::Result<Vec<_>>>()?
    };
    rendered.sort_by_key(|(rank, _)| *rank);

    let sheet = build_sheet(&ctx.output_dir, &logo)?;

    Ok(RunSummary {
        cards: rendered.into_iter().map(|(_, path)| path).collect(),
        sheet,
    })
}

fn render_card(ctx: &RenderContext, job: &CardJob) -> anyhow::Result<(u32, PathBuf)> {
    let CardJob { record, selection } = job;
    let placement = assets::load_placement(&ctx.renders_dir, selection, &ctx.config)?;
    let card = compose_card(
        &ctx.assets,
        &placement,
        &record.winner_name,
        record.rank,
        &ctx.config,
    )?;
    let path = output::save_card(&ctx.output_dir, record.rank, &card)?;
    Ok((record.rank, path))
}

/// One blocking worker per card; returns once every worker has finished.
async fn render_parallel(
    ctx: &Arc<RenderContext>,
    jobs: Vec<CardJob>,
) -> anyhow::Result<Vec<(u32, PathBuf)>> {
    let mut set = JoinSet::new();
    for job in jobs {
        let ctx = Arc::clone(ctx);
        set.spawn_blocking(move || render_card(&ctx, &job));
    }

    let mut rendered = Vec::with_capacity(set.len());
    while let Some(result) = set.join_next().await {
        rendered.push(result??);
    }
    Ok(rendered)
}

/// Assemble the sheet from the card files on disk.
fn build_sheet(dir: &std::path::Path, logo: &DynamicImage) -> anyhow::Result<Option<PathBuf>> {
    let cards = output::load_cards(dir, SHEET_SLOTS);
    if cards.is_empty() {
        tracing::warn!("No first-place card, skipping composite sheet");
        return Ok(None);
    }
    let sheet = assemble_sheet(&cards, logo, &SheetLayout::default())?;
    Ok(Some(output::save_sheet(dir, &sheet)?))
}
