use color_eyre::Result;
use serde_json::json;
use trackflix_core::{CatalogService, MediaStore};
use trackflix_models::{MediaId, ProgressUpdate, WatchStatus};

use super::prompts;
use crate::output::Output;

pub fn run_progress<S: MediaStore>(
    catalog: &mut CatalogService<S>,
    id: MediaId,
    season: u32,
    episode: u32,
    output: &Output,
) -> Result<ProgressUpdate> {
    let outcome = catalog.update_progress(id, season, episode)?;

    if output.is_json() {
        output.json(&json!({ "id": id, "season": season, "episode": episode, "result": outcome }));
        return Ok(outcome);
    }

    match outcome {
        ProgressUpdate::Applied { percentage, status } => {
            output.success(format!(
                "Now at S{}E{:02}: {:.2}% watched ({})",
                season, episode, percentage, status
            ));
        }
        ProgressUpdate::Rejected => {
            let media = catalog.require(id)?;
            let bounds = media
                .as_series()
                .map(|s| format!(" (valid: seasons 1-{}, episodes 1-{})", s.total_seasons, s.episodes_per_season))
                .unwrap_or_default();
            output.warn(format!(
                "S{}E{:02} is outside '{}'{}; progress unchanged",
                season, episode, media.title, bounds
            ));
        }
        ProgressUpdate::NotASeries => {}
    }
    Ok(outcome)
}

pub fn run_watched<S: MediaStore>(catalog: &mut CatalogService<S>, id: MediaId, output: &Output) -> Result<()> {
    let media = catalog.mark_watched(id)?;
    if output.is_json() {
        output.json(&json!({ "type": "watched", "media": media }));
    } else {
        output.success(format!("Marked '{}' as watched", media.title));
    }
    Ok(())
}

pub fn run_rate<S: MediaStore>(
    catalog: &mut CatalogService<S>,
    id: MediaId,
    rating: f64,
    comment: Option<String>,
    output: &Output,
) -> Result<()> {
    catalog.rate(id, rating, comment.as_deref())?;
    let media = catalog.require(id)?;
    if output.is_json() {
        output.json(&json!({ "type": "rated", "id": id, "rating": media.rating, "comment": media.comment }));
    } else {
        output.success(format!("Rated '{}' {:.1}/5", media.title, media.rating));
    }
    Ok(())
}

pub fn run_status<S: MediaStore>(
    catalog: &mut CatalogService<S>,
    id: MediaId,
    status: WatchStatus,
    output: &Output,
) -> Result<()> {
    catalog.set_status(id, status)?;
    if output.is_json() {
        output.json(&json!({ "type": "status", "id": id, "status": status }));
    } else {
        output.success(format!("Status of {} set to {}", id, status));
    }
    Ok(())
}

/// Returns `false` when the user declines the confirmation.
pub fn run_delete<S: MediaStore>(
    catalog: &mut CatalogService<S>,
    id: MediaId,
    yes: bool,
    output: &Output,
) -> Result<bool> {
    let media = catalog.require(id)?;
    if !yes {
        prompts::ensure_interactive("--yes")?;
        if !prompts::prompt_yes_no(&format!("Delete '{}'?", media), Some(false))? {
            output.info("Nothing deleted");
            return Ok(false);
        }
    }

    let removed = catalog.delete(id)?;
    if output.is_json() {
        output.json(&json!({ "type": "deleted", "media": removed }));
    } else {
        output.success(format!("Deleted '{}'", removed.title));
    }
    Ok(true)
}
