use chrono::{Datelike, Utc};
use thiserror::Error;

/// First year a motion picture was recorded.
pub const EARLIEST_RELEASE_YEAR: i32 = 1888;

/// Latest accepted release year: announced titles up to two years out.
pub fn max_release_year() -> i32 {
    Utc::now().year() + 2
}

/// Input rejected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("invalid year {year}: must be between {} and {max}", EARLIEST_RELEASE_YEAR)]
    InvalidYear { year: i32, max: i32 },
    #[error("rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),
    #[error("duration must be a positive number of minutes")]
    InvalidDuration,
    #[error("series must have at least one season and one episode per season")]
    InvalidSeriesShape,
    #[error("position S{season}E{episode} is outside the series bounds")]
    PositionOutOfRange { season: u32, episode: u32 },
}
