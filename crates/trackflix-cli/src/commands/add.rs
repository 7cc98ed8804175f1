use chrono::Datelike;
use clap::Args;
use color_eyre::Result;
use trackflix_config::DefaultsConfig;
use trackflix_core::{CatalogService, MediaStore};
use trackflix_models::{
    max_release_year, parse_genres, update_progress, Media, MediaId, ProgressUpdate, ValidationError,
    WatchStatus, EARLIEST_RELEASE_YEAR,
};

use super::prompts;
use crate::output::Output;

const MAX_MOVIE_DURATION: u32 = 500;
const MAX_SEASONS: u32 = 50;
const MAX_EPISODES_PER_SEASON: u32 = 100;
const MAX_EPISODE_DURATION: u32 = 180;

#[derive(Args, Debug, Default, Clone)]
pub struct MovieArgs {
    /// Title (if not provided, will prompt for every field)
    #[arg(long)]
    pub title: Option<String>,

    /// Release year
    #[arg(long)]
    pub year: Option<i32>,

    /// Comma-separated genres, e.g. "Drama, Thriller"
    #[arg(long)]
    pub genres: Option<String>,

    /// Runtime in minutes
    #[arg(long)]
    pub duration: Option<u32>,

    #[arg(long)]
    pub director: Option<String>,

    /// Initial status: planned, watching or completed
    #[arg(long)]
    pub status: Option<WatchStatus>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct SeriesArgs {
    /// Title (if not provided, will prompt for every field)
    #[arg(long)]
    pub title: Option<String>,

    /// Release year
    #[arg(long)]
    pub year: Option<i32>,

    /// Comma-separated genres, e.g. "Drama, Thriller"
    #[arg(long)]
    pub genres: Option<String>,

    #[arg(long)]
    pub seasons: Option<u32>,

    #[arg(long)]
    pub episodes: Option<u32>,

    /// Episode length in minutes
    #[arg(long)]
    pub episode_duration: Option<u32>,

    /// Season already reached (requires --episode)
    #[arg(long, requires = "episode")]
    pub season: Option<u32>,

    /// Episode already reached within --season
    #[arg(long, requires = "season")]
    pub episode: Option<u32>,
}

fn default_year(defaults: &DefaultsConfig) -> i32 {
    defaults.year.unwrap_or_else(|| chrono::Local::now().year())
}

pub fn build_movie(title: String, args: &MovieArgs, defaults: &DefaultsConfig) -> Media {
    let mut movie = Media::movie(
        title,
        args.year.unwrap_or_else(|| default_year(defaults)),
        args.genres.as_deref().map(parse_genres).unwrap_or_default(),
        args.duration.unwrap_or(defaults.movie_duration),
        args.director.clone().filter(|d| !d.trim().is_empty()),
    );
    movie.status = args.status.unwrap_or(defaults.status);
    movie
}

/// Series start at S1E01; a given starting position goes through the progress engine
/// so the status matches it.
pub fn build_series(title: String, args: &SeriesArgs, defaults: &DefaultsConfig) -> Result<Media> {
    let mut series = Media::series(
        title,
        args.year.unwrap_or_else(|| default_year(defaults)),
        args.genres.as_deref().map(parse_genres).unwrap_or_default(),
        args.seasons.unwrap_or(defaults.seasons),
        args.episodes.unwrap_or(defaults.episodes_per_season),
        Some(args.episode_duration.unwrap_or(defaults.episode_duration)),
    );

    if let (Some(season), Some(episode)) = (args.season, args.episode) {
        series.validate()?;
        if update_progress(&mut series, season, episode) == ProgressUpdate::Rejected {
            return Err(ValidationError::PositionOutOfRange { season, episode }.into());
        }
    }
    Ok(series)
}

fn prompt_movie_args(args: &MovieArgs, defaults: &DefaultsConfig, output: &Output) -> Result<(String, MovieArgs)> {
    let title = prompts::prompt_required_string("Title", None, output)?;
    let year = prompts::prompt_number(
        "Release year",
        Some(args.year.unwrap_or_else(|| default_year(defaults))),
        EARLIEST_RELEASE_YEAR,
        max_release_year(),
        output,
    )?;
    let genres = prompts::prompt_string("Genres (comma-separated)", args.genres.as_deref())?;
    let duration = prompts::prompt_number(
        "Duration (minutes)",
        Some(args.duration.unwrap_or(defaults.movie_duration)),
        1,
        MAX_MOVIE_DURATION,
        output,
    )?;
    let director = prompts::prompt_string("Director (optional)", args.director.as_deref())?;

    let statuses: Vec<&str> = WatchStatus::ALL.iter().map(|s| s.label()).collect();
    let initial = args.status.unwrap_or(defaults.status);
    let default_index = WatchStatus::ALL.iter().position(|s| *s == initial).unwrap_or(0);
    let status = WatchStatus::ALL[prompts::prompt_select("Status", &statuses, default_index)?];

    Ok((
        title,
        MovieArgs {
            title: None,
            year: Some(year),
            genres: Some(genres),
            duration: Some(duration),
            director: Some(director),
            status: Some(status),
        },
    ))
}

fn prompt_series_args(args: &SeriesArgs, defaults: &DefaultsConfig, output: &Output) -> Result<(String, SeriesArgs)> {
    let title = prompts::prompt_required_string("Title", None, output)?;
    let year = prompts::prompt_number(
        "Release year",
        Some(args.year.unwrap_or_else(|| default_year(defaults))),
        EARLIEST_RELEASE_YEAR,
        max_release_year(),
        output,
    )?;
    let genres = prompts::prompt_string("Genres (comma-separated)", args.genres.as_deref())?;
    let seasons = prompts::prompt_number(
        "Number of seasons",
        Some(args.seasons.unwrap_or(defaults.seasons)),
        1,
        MAX_SEASONS,
        output,
    )?;
    let episodes = prompts::prompt_number(
        "Episodes per season",
        Some(args.episodes.unwrap_or(defaults.episodes_per_season)),
        1,
        MAX_EPISODES_PER_SEASON,
        output,
    )?;
    let episode_duration = prompts::prompt_number(
        "Episode length (minutes)",
        Some(args.episode_duration.unwrap_or(defaults.episode_duration)),
        1,
        MAX_EPISODE_DURATION,
        output,
    )?;

    Ok((
        title,
        SeriesArgs {
            title: None,
            year: Some(year),
            genres: Some(genres),
            seasons: Some(seasons),
            episodes: Some(episodes),
            episode_duration: Some(episode_duration),
            season: args.season,
            episode: args.episode,
        },
    ))
}

pub fn run_add_movie<S: MediaStore>(
    catalog: &mut CatalogService<S>,
    args: MovieArgs,
    defaults: &DefaultsConfig,
    output: &Output,
) -> Result<MediaId> {
    let movie = match args.title.clone() {
        Some(title) => build_movie(title, &args, defaults),
        None => {
            prompts::ensure_interactive("--title")?;
            let (title, prompted) = prompt_movie_args(&args, defaults, output)?;
            build_movie(title, &prompted, defaults)
        }
    };

    let id = catalog.add(&movie)?;
    report_added(id, &movie, output);
    Ok(id)
}

pub fn run_add_series<S: MediaStore>(
    catalog: &mut CatalogService<S>,
    args: SeriesArgs,
    defaults: &DefaultsConfig,
    output: &Output,
) -> Result<MediaId> {
    let series = match args.title.clone() {
        Some(title) => build_series(title, &args, defaults)?,
        None => {
            prompts::ensure_interactive("--title")?;
            let (title, prompted) = prompt_series_args(&args, defaults, output)?;
            build_series(title, &prompted, defaults)?
        }
    };

    let id = catalog.add(&series)?;
    report_added(id, &series, output);
    Ok(id)
}

fn report_added(id: MediaId, media: &Media, output: &Output) {
    if output.is_json() {
        let mut stored = media.clone();
        stored.id = Some(id);
        output.json(&serde_json::json!({ "type": "added", "media": stored }));
    } else {
        output.success(format!("Added {} '{}' (id {})", media.kind(), media.title, id));
    }
}
