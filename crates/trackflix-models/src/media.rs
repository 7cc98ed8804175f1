use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rating::validate_rating;
use crate::status::WatchStatus;
use crate::validation::{max_release_year, ValidationError, EARLIEST_RELEASE_YEAR};

/// Identifier assigned by the store when a record is first persisted.
pub type MediaId = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" | "film" => Ok(MediaKind::Movie),
            "series" | "show" | "tv" => Ok(MediaKind::Series),
            other => Err(format!("unknown media kind: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    /// Runtime in minutes
    pub duration: u32,
    pub director: Option<String>,
    /// Set when the movie is marked watched
    pub watched_date: Option<DateTime<Utc>>,
}

/// Season/episode configuration and current position of a series.
///
/// Every season is assumed to have the same number of episodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesDetails {
    pub total_seasons: u32,
    pub episodes_per_season: u32,
    pub current_season: u32,
    pub current_episode: u32,
    /// Minutes per episode
    pub episode_duration: Option<u32>,
}

impl SeriesDetails {
    /// New series start at the first episode of the first season.
    pub fn new(total_seasons: u32, episodes_per_season: u32, episode_duration: Option<u32>) -> Self {
        Self {
            total_seasons,
            episodes_per_season,
            current_season: 1,
            current_episode: 1,
            episode_duration,
        }
    }

    pub fn total_episodes(&self) -> u64 {
        u64::from(self.total_seasons) * u64::from(self.episodes_per_season)
    }

    pub fn contains(&self, season: u32, episode: u32) -> bool {
        (1..=self.total_seasons).contains(&season) && (1..=self.episodes_per_season).contains(&episode)
    }

    /// Short position label, e.g. `S2E05`.
    pub fn position_label(&self) -> String {
        format!("S{}E{:02}", self.current_season, self.current_episode)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaDetails {
    Movie(MovieDetails),
    Series(SeriesDetails),
}

/// A trackable catalog entry: shared attributes plus a per-kind payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Media {
    pub id: Option<MediaId>,
    pub title: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub rating: f64,
    pub comment: String,
    pub status: WatchStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub details: MediaDetails,
}

impl Media {
    fn with_details(title: impl Into<String>, year: i32, genres: Vec<String>, details: MediaDetails) -> Self {
        Self {
            id: None,
            title: title.into(),
            year,
            genres,
            rating: 0.0,
            comment: String::new(),
            status: WatchStatus::Planned,
            created_at: None,
            details,
        }
    }

    pub fn movie(
        title: impl Into<String>,
        year: i32,
        genres: Vec<String>,
        duration: u32,
        director: Option<String>,
    ) -> Self {
        Self::with_details(
            title,
            year,
            genres,
            MediaDetails::Movie(MovieDetails {
                duration,
                director,
                watched_date: None,
            }),
        )
    }

    pub fn series(
        title: impl Into<String>,
        year: i32,
        genres: Vec<String>,
        total_seasons: u32,
        episodes_per_season: u32,
        episode_duration: Option<u32>,
    ) -> Self {
        Self::with_details(
            title,
            year,
            genres,
            MediaDetails::Series(SeriesDetails::new(total_seasons, episodes_per_season, episode_duration)),
        )
    }

    pub fn kind(&self) -> MediaKind {
        match self.details {
            MediaDetails::Movie(_) => MediaKind::Movie,
            MediaDetails::Series(_) => MediaKind::Series,
        }
    }

    pub fn as_movie(&self) -> Option<&MovieDetails> {
        match &self.details {
            MediaDetails::Movie(movie) => Some(movie),
            MediaDetails::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&SeriesDetails> {
        match &self.details {
            MediaDetails::Series(series) => Some(series),
            MediaDetails::Movie(_) => None,
        }
    }

    pub fn genres_text(&self) -> String {
        self.genres.join(", ")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let max_year = max_release_year();
        if self.year < EARLIEST_RELEASE_YEAR || self.year > max_year {
            return Err(ValidationError::InvalidYear {
                year: self.year,
                max: max_year,
            });
        }

        validate_rating(self.rating)?;

        match &self.details {
            MediaDetails::Movie(movie) => {
                if movie.duration == 0 {
                    return Err(ValidationError::InvalidDuration);
                }
            }
            MediaDetails::Series(series) => {
                if series.total_seasons == 0 || series.episodes_per_season == 0 {
                    return Err(ValidationError::InvalidSeriesShape);
                }
                if series.episode_duration == Some(0) {
                    return Err(ValidationError::InvalidDuration);
                }
                if !series.contains(series.current_season, series.current_episode) {
                    return Err(ValidationError::PositionOutOfRange {
                        season: series.current_season,
                        episode: series.current_episode,
                    });
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            MediaDetails::Movie(movie) => write!(f, "{} ({}) - {}min", self.title, self.year, movie.duration),
            MediaDetails::Series(series) => write!(f, "{} ({}) - {}", self.title, self.year, series.position_label()),
        }
    }
}

/// Split a comma-separated genre list, dropping blanks.
pub fn parse_genres(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}
