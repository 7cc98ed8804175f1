pub mod media;
pub mod progress;
pub mod rating;
pub mod status;
pub mod validation;

pub use media::{parse_genres, Media, MediaDetails, MediaId, MediaKind, MovieDetails, SeriesDetails};
pub use progress::{compute_progress_percentage, mark_movie_watched, mark_movie_watched_at, update_progress, ProgressUpdate};
pub use rating::{validate_rating, MAX_RATING, MIN_RATING};
pub use status::{ParseStatusError, WatchStatus};
pub use validation::{max_release_year, ValidationError, EARLIEST_RELEASE_YEAR};
