//! SQLite-backed [`MediaStore`].

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};
use trackflix_models::{
    parse_genres, Media, MediaDetails, MediaId, MediaKind, MovieDetails, SeriesDetails, WatchStatus,
};

use crate::filter::title_contains;
use crate::schema;
use crate::store::{empty_status_counts, MediaStore, StoreError, StoreResult};

const MOVIE_SELECT: &str = "SELECT m.id, m.title, m.year, m.genres, m.rating, m.comment, m.status, m.created_at,
                mv.duration, mv.director, mv.watched_date
         FROM media m JOIN movies mv ON m.id = mv.media_id";

const SERIES_SELECT: &str = "SELECT m.id, m.title, m.year, m.genres, m.rating, m.comment, m.status, m.created_at,
                s.total_seasons, s.total_episodes, s.current_season, s.current_episode, s.episode_duration
         FROM media m JOIN series s ON m.id = s.media_id";

const ORDER_BY_TITLE: &str = "ORDER BY m.title COLLATE NOCASE, m.id";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a data file at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        schema::prepare(&conn)?;
        info!("Opened media database at {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database with the full schema. Useful for testing.
    pub fn open_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::prepare(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn kind_of(&self, id: MediaId) -> StoreResult<Option<MediaKind>> {
        let kind: Option<String> = self
            .conn
            .query_row("SELECT media_type FROM media WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;

        Ok(kind.and_then(|k| match k.parse::<MediaKind>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                warn!("Skipping media {} with unreadable type: {}", id, e);
                None
            }
        }))
    }

    fn query_movies(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<Vec<Media>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_movie)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn query_series(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<Vec<Media>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_series)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

impl MediaStore for SqliteStore {
    fn create(&mut self, media: &Media) -> StoreResult<MediaId> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO media (title, year, genres, rating, comment, status, media_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                media.title,
                media.year,
                media.genres_text(),
                media.rating,
                media.comment,
                media.status.as_str(),
                media.kind().as_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();

        match &media.details {
            MediaDetails::Movie(movie) => {
                tx.execute(
                    "INSERT INTO movies (media_id, duration, director, watched_date)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        id,
                        movie.duration,
                        movie.director,
                        movie.watched_date.map(|d| d.to_rfc3339()),
                    ],
                )?;
            }
            MediaDetails::Series(series) => {
                tx.execute(
                    "INSERT INTO series (media_id, total_seasons, total_episodes,
                                         current_season, current_episode, episode_duration)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        id,
                        series.total_seasons,
                        series.episodes_per_season,
                        series.current_season,
                        series.current_episode,
                        series.episode_duration,
                    ],
                )?;
            }
        }

        tx.commit()?;
        debug!("Created {} {} '{}'", media.kind(), id, media.title);
        Ok(id)
    }

    fn get(&self, id: MediaId) -> StoreResult<Option<Media>> {
        let Some(kind) = self.kind_of(id)? else {
            return Ok(None);
        };

        let found = match kind {
            MediaKind::Movie => self.query_movies(&format!("{MOVIE_SELECT} WHERE m.id = ?1"), params![id])?,
            MediaKind::Series => self.query_series(&format!("{SERIES_SELECT} WHERE m.id = ?1"), params![id])?,
        };

        match found.into_iter().next() {
            Some(media) => Ok(Some(media)),
            None => Err(StoreError::MissingDetails { id, kind }),
        }
    }

    fn list_all(&self, kind: MediaKind) -> StoreResult<Vec<Media>> {
        match kind {
            MediaKind::Movie => self.query_movies(&format!("{MOVIE_SELECT} {ORDER_BY_TITLE}"), []),
            MediaKind::Series => self.query_series(&format!("{SERIES_SELECT} {ORDER_BY_TITLE}"), []),
        }
    }

    fn search_title(&self, needle: &str) -> StoreResult<Vec<Media>> {
        // SQLite's LIKE only folds ASCII, so match in Rust
        let mut results = Vec::new();
        for kind in [MediaKind::Movie, MediaKind::Series] {
            results.extend(
                self.list_all(kind)?
                    .into_iter()
                    .filter(|m| title_contains(&m.title, needle)),
            );
        }
        Ok(results)
    }

    fn count_by_kind(&self, kind: MediaKind) -> StoreResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM media WHERE media_type = ?1",
            params![kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_by_status(&self) -> StoreResult<BTreeMap<WatchStatus, u64>> {
        let mut stmt = self.conn.prepare("SELECT status, COUNT(*) FROM media GROUP BY status")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?)))?;

        let mut counts = empty_status_counts();
        for row in rows {
            let (status, count) = row?;
            let status = status.as_deref().map(read_status).unwrap_or(WatchStatus::Planned);
            *counts.entry(status).or_insert(0) += count as u64;
        }
        Ok(counts)
    }

    fn update_rating(&mut self, id: MediaId, rating: f64, comment: &str) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE media SET rating = ?2, comment = ?3 WHERE id = ?1",
            params![id, rating, comment],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn update_status(&mut self, id: MediaId, status: WatchStatus) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE media SET status = ?2 WHERE id = ?1",
            params![id, status.as_str()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn save_progress(&mut self, id: MediaId, season: u32, episode: u32, status: WatchStatus) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE series SET current_season = ?2, current_episode = ?3 WHERE media_id = ?1",
            params![id, season, episode],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tx.execute(
            "UPDATE media SET status = ?2 WHERE id = ?1",
            params![id, status.as_str()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn mark_watched(&mut self, id: MediaId, watched_date: DateTime<Utc>) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE movies SET watched_date = ?2 WHERE media_id = ?1",
            params![id, watched_date.to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tx.execute(
            "UPDATE media SET status = ?2 WHERE id = ?1",
            params![id, WatchStatus::Completed.as_str()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete(&mut self, id: MediaId) -> StoreResult<()> {
        // Older data files were created without ON DELETE CASCADE
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM movies WHERE media_id = ?1", params![id])?;
        tx.execute("DELETE FROM series WHERE media_id = ?1", params![id])?;
        let changed = tx.execute("DELETE FROM media WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tx.commit()?;
        debug!("Deleted media {}", id);
        Ok(())
    }
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

/// Unknown status text in older data files reads as planned.
fn read_status(value: &str) -> WatchStatus {
    value.parse().unwrap_or_else(|e| {
        warn!("Reading unknown status as planned: {}", e);
        WatchStatus::Planned
    })
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Accepts RFC 3339, SQLite's `CURRENT_TIMESTAMP` format, and naive ISO 8601 (read as UTC).
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let value: Option<String> = row.get(idx)?;
    value
        .filter(|v| !v.is_empty())
        .map(|v| parse_timestamp(&v).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn row_to_media(row: &Row<'_>, details: MediaDetails) -> rusqlite::Result<Media> {
    let genres: Option<String> = row.get(3)?;
    let status: Option<String> = row.get(6)?;
    let status = status.as_deref().map(read_status).unwrap_or(WatchStatus::Planned);

    Ok(Media {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        year: row.get(2)?,
        genres: genres.as_deref().map(parse_genres).unwrap_or_default(),
        rating: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
        comment: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        status,
        created_at: timestamp_column(row, 7)?,
        details,
    })
}

fn row_to_movie(row: &Row<'_>) -> rusqlite::Result<Media> {
    let details = MediaDetails::Movie(MovieDetails {
        duration: row.get::<_, Option<u32>>(8)?.unwrap_or(0),
        director: row.get::<_, Option<String>>(9)?.filter(|d| !d.is_empty()),
        watched_date: timestamp_column(row, 10)?,
    });
    row_to_media(row, details)
}

fn row_to_series(row: &Row<'_>) -> rusqlite::Result<Media> {
    let details = MediaDetails::Series(SeriesDetails {
        total_seasons: row.get::<_, Option<u32>>(8)?.unwrap_or(0),
        episodes_per_season: row.get::<_, Option<u32>>(9)?.unwrap_or(0),
        current_season: row.get::<_, Option<u32>>(10)?.unwrap_or(1),
        current_episode: row.get::<_, Option<u32>>(11)?.unwrap_or(1),
        episode_duration: row.get(12)?,
    });
    row_to_media(row, details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2024-03-01T20:15:00+00:00").unwrap();
        let sqlite = parse_timestamp("2024-03-01 20:15:00").unwrap();
        let naive_iso = parse_timestamp("2024-03-01T20:15:00.250000").unwrap();
        assert_eq!(rfc, sqlite);
        assert_eq!(naive_iso.timestamp(), rfc.timestamp());
        assert!(parse_timestamp("yesterday").is_err());
    }
}
