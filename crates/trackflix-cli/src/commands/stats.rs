use color_eyre::Result;
use serde_json::json;
use trackflix_core::{CatalogService, GoalTier, MediaStore, Statistics};

use super::render;
use crate::output::Output;

pub fn run_stats<S: MediaStore>(catalog: &CatalogService<S>, output: &Output) -> Result<Statistics> {
    let stats = catalog.statistics()?;

    if output.is_json() {
        output.json(&json!({
            "statistics": stats,
            "completion_rate": stats.completion_rate(),
            "goal": stats.goal_tier(),
        }));
        return Ok(stats);
    }

    output.table(&render::stats_table(&stats));
    let goals: Vec<String> = GoalTier::ALL
        .iter()
        .map(|tier| format!("{} {:.0}%", tier, tier.threshold()))
        .collect();
    output.info(format!("Completion goals: {}", goals.join(" / ")));
    Ok(stats)
}
