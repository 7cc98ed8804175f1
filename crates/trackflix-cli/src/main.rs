use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use std::path::PathBuf;
use trackflix_config::{Config, PathManager};
use trackflix_core::StatusFilter;
use trackflix_models::{MediaId, WatchStatus};

use commands::add::{MovieArgs, SeriesArgs};
use commands::config::ConfigAction;
use commands::list::ListScope;
use commands::{add, config, export, list, menu, stats, update, AppContext};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "trackflix")]
#[command(about = "TrackFlix - Keep track of the movies and series you watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this data file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a movie or a series
    #[command(long_about = "Add a movie or a series to the catalog. Fields given as flags are used as-is; without --title every field is prompted for, pre-filled from the [defaults] config section.")]
    Add {
        #[command(subcommand)]
        kind: AddCommands,
    },
    /// List the catalog
    List {
        /// Which part of the catalog to list
        #[arg(value_enum, default_value = "all")]
        scope: ListScope,

        /// Only entries with this status (planned, watching, completed or all)
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Only titles containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Show every field of one entry
    Show { id: MediaId },
    /// Move a series to a season and episode
    #[command(long_about = "Record the last watched episode of a series. The completion percentage and status follow from the position; positions outside the series are ignored.")]
    Progress {
        id: MediaId,
        season: u32,
        episode: u32,
    },
    /// Mark a movie as watched
    Watched { id: MediaId },
    /// Rate an entry from 0 to 5
    Rate {
        id: MediaId,
        rating: f64,

        /// Replace the comment (kept as-is when omitted)
        #[arg(long)]
        comment: Option<String>,
    },
    /// Set the status of a movie (series follow their progress)
    Status { id: MediaId, status: WatchStatus },
    /// Delete an entry
    Delete {
        id: MediaId,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Catalog statistics and completion goals
    Stats,
    /// Export the catalog to CSV
    Export {
        /// Output file (defaults to a dated file in the data directory)
        path: Option<PathBuf>,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigAction>,
    },
    /// Interactive main menu (default)
    Menu,
}

#[derive(Subcommand)]
enum AddCommands {
    /// Add a movie
    Movie(MovieArgs),
    /// Add a series
    Series(SeriesArgs),
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| eyre!("Failed to load {}: {}", paths.config_file().display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext {
        paths,
        config,
        db_override: cli.db,
    };

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Add { kind } => {
            let mut catalog = ctx.open_catalog()?;
            let defaults = &ctx.config.defaults;
            match kind {
                AddCommands::Movie(args) => add::run_add_movie(&mut catalog, args, defaults, &output)?,
                AddCommands::Series(args) => add::run_add_series(&mut catalog, args, defaults, &output)?,
            };
            Ok(())
        }
        Commands::List { scope, status, search } => {
            let catalog = ctx.open_catalog()?;
            list::run_list(&catalog, &list::build_query(scope, status, search), &output)
        }
        Commands::Show { id } => list::run_show(&ctx.open_catalog()?, id, &output),
        Commands::Progress { id, season, episode } => {
            update::run_progress(&mut ctx.open_catalog()?, id, season, episode, &output)?;
            Ok(())
        }
        Commands::Watched { id } => update::run_watched(&mut ctx.open_catalog()?, id, &output),
        Commands::Rate { id, rating, comment } => update::run_rate(&mut ctx.open_catalog()?, id, rating, comment, &output),
        Commands::Status { id, status } => update::run_status(&mut ctx.open_catalog()?, id, status, &output),
        Commands::Delete { id, yes } => {
            update::run_delete(&mut ctx.open_catalog()?, id, yes, &output)?;
            Ok(())
        }
        Commands::Stats => {
            stats::run_stats(&ctx.open_catalog()?, &output)?;
            Ok(())
        }
        Commands::Export { path } => {
            export::run_export(&ctx.open_catalog()?, path, &ctx.paths.export_dir(), &output)?;
            Ok(())
        }
        Commands::Config { cmd } => config::run_config(cmd.unwrap_or(ConfigAction::Show), &ctx, &output),
        Commands::Menu => menu::Menu::new(ctx.open_catalog()?, &ctx, &output).run(),
    }
}
