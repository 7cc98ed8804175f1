use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};
use trackflix_models::{
    mark_movie_watched_at, update_progress, validate_rating, Media, MediaId, MediaKind, ProgressUpdate,
    ValidationError, WatchStatus,
};

use crate::filter::ListQuery;
use crate::stats::Statistics;
use crate::store::{MediaStore, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No media with id {0}")]
    NotFound(MediaId),
    #[error("Media {id} is not a {expected}")]
    WrongKind { id: MediaId, expected: MediaKind },
    #[error("Status of series {0} follows its progress; update the progress instead")]
    StatusDerived(MediaId),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Create/read/update operations over a [`MediaStore`].
///
/// Input is validated before the store is touched. Progress and status
/// derivation for series is delegated to `trackflix_models::progress`.
pub struct CatalogService<S> {
    store: S,
}

impl<S: MediaStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new entry. Any id already set on `media` is ignored.
    pub fn add(&mut self, media: &Media) -> CatalogResult<MediaId> {
        media.validate()?;
        let id = self.store.create(media)?;
        info!("Added {} '{}' with id {}", media.kind(), media.title, id);
        Ok(id)
    }

    pub fn get(&self, id: MediaId) -> CatalogResult<Option<Media>> {
        Ok(self.store.get(id)?)
    }

    pub fn require(&self, id: MediaId) -> CatalogResult<Media> {
        self.get(id)?.ok_or(CatalogError::NotFound(id))
    }

    pub fn movies(&self) -> CatalogResult<Vec<Media>> {
        Ok(self.store.list_all(MediaKind::Movie)?)
    }

    pub fn series(&self) -> CatalogResult<Vec<Media>> {
        Ok(self.store.list_all(MediaKind::Series)?)
    }

    /// Movies then series, each ordered by title.
    pub fn all(&self) -> CatalogResult<Vec<Media>> {
        let mut items = self.movies()?;
        items.extend(self.series()?);
        Ok(items)
    }

    pub fn list(&self, query: &ListQuery) -> CatalogResult<Vec<Media>> {
        let items = match query.kind {
            Some(kind) => self.store.list_all(kind)?,
            None => self.all()?,
        };
        Ok(query.apply(items))
    }

    /// Title search across both kinds. A blank term finds nothing.
    pub fn search(&self, term: &str) -> CatalogResult<Vec<Media>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.store.search_title(term)?)
    }

    /// Move a series to a new position and persist the derived status.
    ///
    /// Out-of-range positions come back as [`ProgressUpdate::Rejected`] and
    /// nothing is written.
    pub fn update_progress(&mut self, id: MediaId, season: u32, episode: u32) -> CatalogResult<ProgressUpdate> {
        let mut media = self.require(id)?;

        let outcome = update_progress(&mut media, season, episode);
        match outcome {
            ProgressUpdate::Applied { percentage, status } => {
                self.store.save_progress(id, season, episode, status)?;
                debug!("Series {} at S{}E{} ({:.2}%, {})", id, season, episode, percentage, status);
            }
            ProgressUpdate::Rejected => {
                warn!("Ignoring out-of-range position S{}E{} for series {}", season, episode, id);
            }
            ProgressUpdate::NotASeries => {
                return Err(CatalogError::WrongKind {
                    id,
                    expected: MediaKind::Series,
                });
            }
        }
        Ok(outcome)
    }

    /// Mark a movie completed as of now and return the updated record.
    pub fn mark_watched(&mut self, id: MediaId) -> CatalogResult<Media> {
        let mut media = self.require(id)?;
        let now = Utc::now();
        if !mark_movie_watched_at(&mut media, now) {
            return Err(CatalogError::WrongKind {
                id,
                expected: MediaKind::Movie,
            });
        }
        self.store.mark_watched(id, now)?;
        info!("Marked '{}' watched", media.title);
        Ok(media)
    }

    /// Set rating and, when given, replace the comment.
    pub fn rate(&mut self, id: MediaId, rating: f64, comment: Option<&str>) -> CatalogResult<()> {
        validate_rating(rating)?;
        let media = self.require(id)?;
        let comment = comment.map(str::trim).unwrap_or(media.comment.as_str());
        self.store.update_rating(id, rating, comment)?;
        Ok(())
    }

    /// Set a movie's status directly. Series statuses are derived from progress.
    pub fn set_status(&mut self, id: MediaId, status: WatchStatus) -> CatalogResult<()> {
        let media = self.require(id)?;
        if media.kind() == MediaKind::Series {
            return Err(CatalogError::StatusDerived(id));
        }
        self.store.update_status(id, status)?;
        Ok(())
    }

    /// Remove an entry and return what was removed.
    pub fn delete(&mut self, id: MediaId) -> CatalogResult<Media> {
        let media = self.require(id)?;
        self.store.delete(id)?;
        info!("Deleted {} '{}'", media.kind(), media.title);
        Ok(media)
    }

    pub fn statistics(&self) -> CatalogResult<Statistics> {
        let movies = self.store.count_by_kind(MediaKind::Movie)?;
        let series = self.store.count_by_kind(MediaKind::Series)?;
        let by_status = self.store.count_by_status()?;
        Ok(Statistics::from_counts(movies, series, &by_status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn service() -> CatalogService<MemoryStore> {
        CatalogService::new(MemoryStore::new())
    }

    #[test]
    fn test_invalid_input_is_not_persisted() {
        let mut catalog = service();
        let movie = Media::movie("", 1999, vec![], 136, None);
        assert!(matches!(
            catalog.add(&movie),
            Err(CatalogError::Invalid(ValidationError::EmptyTitle))
        ));
        assert!(catalog.store().is_empty());
    }

    #[test]
    fn test_progress_scenario_is_persisted() {
        let mut catalog = service();
        let id = catalog.add(&Media::series("Dark", 2017, vec![], 2, 10, None)).unwrap();

        let outcome = catalog.update_progress(id, 1, 5).unwrap();
        assert_eq!(
            outcome,
            ProgressUpdate::Applied {
                percentage: 25.0,
                status: WatchStatus::Watching
            }
        );
        assert_eq!(catalog.require(id).unwrap().status, WatchStatus::Watching);

        catalog.update_progress(id, 2, 10).unwrap();
        let stored = catalog.require(id).unwrap();
        assert_eq!(stored.status, WatchStatus::Completed);
        assert_eq!(stored.as_series().unwrap().position_label(), "S2E10");
    }

    #[test]
    fn test_rejected_progress_writes_nothing() {
        let mut catalog = service();
        let id = catalog.add(&Media::series("Short", 2021, vec![], 1, 12, None)).unwrap();
        let before = catalog.require(id).unwrap();

        assert_eq!(catalog.update_progress(id, 1, 13).unwrap(), ProgressUpdate::Rejected);
        assert_eq!(catalog.require(id).unwrap(), before);
    }

    #[test]
    fn test_progress_on_movie_is_wrong_kind() {
        let mut catalog = service();
        let id = catalog.add(&Media::movie("Heat", 1995, vec![], 170, None)).unwrap();
        assert!(matches!(
            catalog.update_progress(id, 1, 1),
            Err(CatalogError::WrongKind { expected: MediaKind::Series, .. })
        ));
    }

    #[test]
    fn test_mark_watched() {
        let mut catalog = service();
        let id = catalog.add(&Media::movie("Heat", 1995, vec![], 170, None)).unwrap();
        let updated = catalog.mark_watched(id).unwrap();
        assert_eq!(updated.status, WatchStatus::Completed);

        let stored = catalog.require(id).unwrap();
        assert_eq!(stored.status, WatchStatus::Completed);
        assert!(stored.as_movie().unwrap().watched_date.is_some());
    }

    #[test]
    fn test_set_status_on_series_is_refused() {
        let mut catalog = service();
        let id = catalog.add(&Media::series("Dark", 2017, vec![], 3, 8, None)).unwrap();
        assert!(matches!(
            catalog.set_status(id, WatchStatus::Completed),
            Err(CatalogError::StatusDerived(_))
        ));
        assert_eq!(catalog.require(id).unwrap().status, WatchStatus::Planned);
    }

    #[test]
    fn test_rate_keeps_comment_when_omitted() {
        let mut catalog = service();
        let id = catalog.add(&Media::movie("Heat", 1995, vec![], 170, None)).unwrap();
        catalog.rate(id, 4.5, Some("  great heist  ")).unwrap();
        catalog.rate(id, 5.0, None).unwrap();

        let stored = catalog.require(id).unwrap();
        assert_eq!(stored.rating, 5.0);
        assert_eq!(stored.comment, "great heist");

        assert!(matches!(catalog.rate(id, 6.0, None), Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_missing_id() {
        let mut catalog = service();
        assert!(matches!(catalog.delete(42), Err(CatalogError::NotFound(42))));
        assert!(catalog.get(42).unwrap().is_none());
    }
}
