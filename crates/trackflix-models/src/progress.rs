//! Episodic progress and status derivation.
//!
//! A series' watched fraction is computed from its season/episode position,
//! and its status follows from that fraction. Everything here is pure
//! computation over the values passed in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::media::{Media, MediaDetails, SeriesDetails};
use crate::status::WatchStatus;

/// Outcome of [`update_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProgressUpdate {
    /// Position stored; carries the recomputed percentage and resulting status.
    Applied { percentage: f64, status: WatchStatus },
    /// Season or episode outside the series bounds; nothing changed.
    Rejected,
    /// The record is a movie; nothing changed.
    NotASeries,
}

impl ProgressUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, ProgressUpdate::Applied { .. })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of the series watched, rounded to two decimals.
///
/// A series with zero total episodes reports 0. The current position is not
/// clamped: bounds are enforced when progress is written, not here.
pub fn compute_progress_percentage(series: &SeriesDetails) -> f64 {
    let per_season = i64::from(series.episodes_per_season);
    let total = i64::from(series.total_seasons) * per_season;
    if total == 0 {
        return 0.0;
    }

    let watched = (i64::from(series.current_season) - 1) * per_season + i64::from(series.current_episode);
    round2(watched as f64 / total as f64 * 100.0)
}

fn derive_status(percentage: f64, previous: WatchStatus) -> WatchStatus {
    if percentage >= 100.0 {
        WatchStatus::Completed
    } else if percentage > 0.0 {
        WatchStatus::Watching
    } else {
        previous
    }
}

/// Move a series to `(season, episode)` and re-derive its status.
///
/// Out-of-range positions are rejected without touching the record, so the
/// last valid position is kept. Calling twice with the same arguments leaves
/// the same state.
pub fn update_progress(media: &mut Media, season: u32, episode: u32) -> ProgressUpdate {
    let MediaDetails::Series(series) = &mut media.details else {
        return ProgressUpdate::NotASeries;
    };

    if !series.contains(season, episode) {
        return ProgressUpdate::Rejected;
    }

    series.current_season = season;
    series.current_episode = episode;

    let percentage = compute_progress_percentage(series);
    media.status = derive_status(percentage, media.status);

    ProgressUpdate::Applied {
        percentage,
        status: media.status,
    }
}

/// Mark a movie completed as of now. Returns `false` for series.
pub fn mark_movie_watched(media: &mut Media) -> bool {
    mark_movie_watched_at(media, Utc::now())
}

pub fn mark_movie_watched_at(media: &mut Media, at: DateTime<Utc>) -> bool {
    let MediaDetails::Movie(movie) = &mut media.details else {
        return false;
    };
    movie.watched_date = Some(at);
    media.status = WatchStatus::Completed;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_series(total_seasons: u32, episodes_per_season: u32) -> Media {
        Media::series("Test Show", 2020, vec!["Drama".to_string()], total_seasons, episodes_per_season, Some(45))
    }

    fn details(media: &Media) -> &SeriesDetails {
        media.as_series().unwrap()
    }

    fn at(media: &Media, season: u32, episode: u32) -> f64 {
        let mut details = details(media).clone();
        details.current_season = season;
        details.current_episode = episode;
        compute_progress_percentage(&details)
    }

    #[test]
    fn test_first_episode_percentage() {
        for (seasons, episodes) in [(1, 1), (1, 12), (2, 10), (5, 22), (7, 3)] {
            let series = create_series(seasons, episodes);
            let expected = round2(1.0 / f64::from(seasons * episodes) * 100.0);
            assert_eq!(compute_progress_percentage(details(&series)), expected);
        }
    }

    #[test]
    fn test_last_episode_is_exactly_100() {
        for (seasons, episodes) in [(1, 1), (1, 12), (2, 10), (3, 7), (9, 13)] {
            let series = create_series(seasons, episodes);
            assert_eq!(at(&series, seasons, episodes), 100.0);
        }
    }

    #[test]
    fn test_zero_total_is_zero() {
        let series = create_series(0, 10);
        assert_eq!(at(&series, 4, 9), 0.0);
        let series = create_series(3, 0);
        assert_eq!(at(&series, 1, 1), 0.0);
    }

    #[test]
    fn test_read_path_does_not_clamp() {
        let series = create_series(1, 10);
        assert_eq!(at(&series, 2, 10), 200.0);
    }

    #[test]
    fn test_rounding_two_decimals() {
        let series = create_series(1, 12);
        assert_eq!(compute_progress_percentage(details(&series)), 8.33);
        assert_eq!(at(&series, 1, 2), 16.67);
    }

    #[test]
    fn test_update_progress_scenario() {
        let mut series = create_series(2, 10);

        let update = update_progress(&mut series, 1, 5);
        assert_eq!(
            update,
            ProgressUpdate::Applied {
                percentage: 25.0,
                status: WatchStatus::Watching
            }
        );
        assert_eq!(series.status, WatchStatus::Watching);
        assert_eq!(compute_progress_percentage(details(&series)), 25.0);

        let update = update_progress(&mut series, 2, 10);
        assert_eq!(
            update,
            ProgressUpdate::Applied {
                percentage: 100.0,
                status: WatchStatus::Completed
            }
        );
        assert_eq!(series.status, WatchStatus::Completed);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut series = create_series(1, 12);
        let before = series.clone();

        assert_eq!(update_progress(&mut series, 1, 13), ProgressUpdate::Rejected);
        assert_eq!(series, before);
        assert_eq!(compute_progress_percentage(details(&series)), 8.33);

        assert_eq!(update_progress(&mut series, 0, 1), ProgressUpdate::Rejected);
        assert_eq!(update_progress(&mut series, 2, 1), ProgressUpdate::Rejected);
        assert_eq!(update_progress(&mut series, 1, 0), ProgressUpdate::Rejected);
        assert_eq!(series, before);
    }

    #[test]
    fn test_out_of_range_keeps_last_valid_position() {
        let mut series = create_series(3, 8);
        update_progress(&mut series, 2, 4);
        let before = series.clone();

        update_progress(&mut series, 4, 1);
        assert_eq!(series, before);
        assert_eq!(details(&series).position_label(), "S2E04");
        assert_eq!(series.status, WatchStatus::Watching);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut series = create_series(4, 6);
        let first = update_progress(&mut series, 3, 2);
        let after_first = series.clone();
        let second = update_progress(&mut series, 3, 2);
        assert_eq!(first, second);
        assert_eq!(series, after_first);
    }

    #[test]
    fn test_completed_does_not_regress() {
        let mut series = create_series(1, 4);
        update_progress(&mut series, 1, 4);
        assert_eq!(series.status, WatchStatus::Completed);

        // Moving back below 100% re-derives Watching; no dedicated reset exists.
        update_progress(&mut series, 1, 2);
        assert_eq!(series.status, WatchStatus::Watching);
    }

    #[test]
    fn test_zero_percentage_keeps_status() {
        assert_eq!(derive_status(0.0, WatchStatus::Planned), WatchStatus::Planned);
        assert_eq!(derive_status(0.0, WatchStatus::Completed), WatchStatus::Completed);
        assert_eq!(derive_status(50.0, WatchStatus::Planned), WatchStatus::Watching);
        assert_eq!(derive_status(100.0, WatchStatus::Watching), WatchStatus::Completed);
    }

    #[test]
    fn test_update_progress_on_movie() {
        let mut movie = Media::movie("Heat", 1995, vec![], 170, None);
        let before = movie.clone();
        assert_eq!(update_progress(&mut movie, 1, 1), ProgressUpdate::NotASeries);
        assert_eq!(movie, before);
    }

    #[test]
    fn test_mark_movie_watched() {
        let mut movie = Media::movie("Heat", 1995, vec![], 170, None);
        assert!(mark_movie_watched(&mut movie));
        assert_eq!(movie.status, WatchStatus::Completed);
        assert!(movie.as_movie().unwrap().watched_date.is_some());
    }

    #[test]
    fn test_mark_movie_watched_again_updates_timestamp() {
        let mut movie = Media::movie("Heat", 1995, vec![], 170, None);
        let first = Utc::now() - Duration::days(2);
        let second = Utc::now();

        mark_movie_watched_at(&mut movie, first);
        mark_movie_watched_at(&mut movie, second);
        assert_eq!(movie.status, WatchStatus::Completed);
        assert_eq!(movie.as_movie().unwrap().watched_date, Some(second));
    }

    #[test]
    fn test_mark_watched_on_series() {
        let mut series = create_series(1, 3);
        assert!(!mark_movie_watched(&mut series));
        assert_eq!(series.status, WatchStatus::Planned);
    }
}
