use clap::{ArgAction, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use trackflix_config::Config;

use super::AppContext;
use crate::output::Output;

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },

    /// Print where the config file lives
    Path,
}

fn config_table(ctx: &AppContext) -> Table {
    let config = &ctx.config;
    let defaults = &config.defaults;
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Configuration").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    let config_file = ctx.paths.config_file();
    let file_state = if config_file.exists() {
        config_file.display().to_string()
    } else {
        format!("{} {}", config_file.display(), "(not created, using defaults)".dimmed())
    };

    let rows = [
        ("Config file", file_state),
        ("Database", ctx.database_path().display().to_string()),
        ("Export directory", ctx.paths.export_dir().display().to_string()),
        ("Default status", defaults.status.to_string()),
        (
            "Default year",
            defaults.year.map(|y| y.to_string()).unwrap_or_else(|| "current year".to_string()),
        ),
        ("Movie duration", format!("{} min", defaults.movie_duration)),
        ("Seasons", defaults.seasons.to_string()),
        ("Episodes / season", defaults.episodes_per_season.to_string()),
        ("Episode length", format!("{} min", defaults.episode_duration)),
        ("Log level", config.logging.level.clone()),
        (
            "Log file",
            config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn run_config(action: ConfigAction, ctx: &AppContext, output: &Output) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if output.is_json() {
                output.json(&json!({
                    "config_file": ctx.paths.config_file(),
                    "database": ctx.database_path(),
                    "config": ctx.config,
                }));
            } else {
                output.table(&config_table(ctx));
            }
        }
        ConfigAction::Init { force } => {
            let path = ctx.paths.config_file();
            if path.exists() && !force {
                return Err(eyre!(
                    "{} already exists; pass --force to overwrite it",
                    path.display()
                ));
            }
            ctx.paths
                .ensure_directories()
                .map_err(|e| eyre!("Failed to create directories: {}", e))?;
            Config::default()
                .save_to_file(&path)
                .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;
            output.success(format!("Wrote default configuration to {}", path.display()));
        }
        ConfigAction::Path => {
            if output.is_json() {
                output.json(&json!({
                    "config_file": ctx.paths.config_file(),
                    "data_dir": ctx.paths.data_dir(),
                    "log_dir": ctx.paths.log_dir(),
                    "database": ctx.database_path(),
                }));
            } else {
                output.info(ctx.paths.config_file().display().to_string());
            }
        }
    }
    Ok(())
}
