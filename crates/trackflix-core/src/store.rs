use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;
use trackflix_models::{Media, MediaId, MediaKind, WatchStatus};

use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Media not found: id {0}")]
    NotFound(MediaId),
    #[error("Media {id} is missing its {kind} details")]
    MissingDetails { id: MediaId, kind: MediaKind },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable record storage keyed by an auto-assigned integer id.
///
/// Each record is split into the shared attributes and a kind-specific
/// extension. Stores hold no business rules: validation and status
/// derivation happen before anything reaches them.
pub trait MediaStore {
    /// Persist a new record and return the id assigned to it.
    fn create(&mut self, media: &Media) -> StoreResult<MediaId>;

    fn get(&self, id: MediaId) -> StoreResult<Option<Media>>;

    /// Every record of one kind, ordered by title.
    fn list_all(&self, kind: MediaKind) -> StoreResult<Vec<Media>>;

    /// Case-insensitive title substring match: movies first, then series.
    fn search_title(&self, needle: &str) -> StoreResult<Vec<Media>>;

    fn count_by_kind(&self, kind: MediaKind) -> StoreResult<u64>;

    /// Record count per status; every status is present, zero when unused.
    fn count_by_status(&self) -> StoreResult<BTreeMap<WatchStatus, u64>>;

    fn update_rating(&mut self, id: MediaId, rating: f64, comment: &str) -> StoreResult<()>;

    fn update_status(&mut self, id: MediaId, status: WatchStatus) -> StoreResult<()>;

    /// Store a series position together with its derived status.
    fn save_progress(&mut self, id: MediaId, season: u32, episode: u32, status: WatchStatus) -> StoreResult<()>;

    /// Store a movie's watched timestamp and mark it completed.
    fn mark_watched(&mut self, id: MediaId, watched_date: DateTime<Utc>) -> StoreResult<()>;

    fn delete(&mut self, id: MediaId) -> StoreResult<()>;
}

/// Zero-filled status histogram.
pub(crate) fn empty_status_counts() -> BTreeMap<WatchStatus, u64> {
    WatchStatus::ALL.iter().map(|status| (*status, 0)).collect()
}
