use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use trackflix_models::{Media, MediaDetails, MediaId, MediaKind, WatchStatus};

use crate::filter::title_contains;
use crate::store::{empty_status_counts, MediaStore, StoreError, StoreResult};

/// Map-backed store with the same contract as [`crate::SqliteStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: BTreeMap<MediaId, Media>,
    last_id: MediaId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record_mut(&mut self, id: MediaId) -> StoreResult<&mut Media> {
        self.records.get_mut(&id).ok_or(StoreError::NotFound(id))
    }

    fn sorted(mut items: Vec<Media>) -> Vec<Media> {
        items.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        items
    }
}

impl MediaStore for MemoryStore {
    fn create(&mut self, media: &Media) -> StoreResult<MediaId> {
        self.last_id += 1;
        let id = self.last_id;

        let mut stored = media.clone();
        stored.id = Some(id);
        stored.created_at = Some(Utc::now());
        self.records.insert(id, stored);
        Ok(id)
    }

    fn get(&self, id: MediaId) -> StoreResult<Option<Media>> {
        Ok(self.records.get(&id).cloned())
    }

    fn list_all(&self, kind: MediaKind) -> StoreResult<Vec<Media>> {
        let items = self.records.values().filter(|m| m.kind() == kind).cloned().collect();
        Ok(Self::sorted(items))
    }

    fn search_title(&self, needle: &str) -> StoreResult<Vec<Media>> {
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
        Ok(self.records.values().filter(|m| m.kind() == kind).count() as u64)
    }

    fn count_by_status(&self) -> StoreResult<BTreeMap<WatchStatus, u64>> {
        let mut counts = empty_status_counts();
        for media in self.records.values() {
            *counts.entry(media.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn update_rating(&mut self, id: MediaId, rating: f64, comment: &str) -> StoreResult<()> {
        let media = self.record_mut(id)?;
        media.rating = rating;
        media.comment = comment.to_string();
        Ok(())
    }

    fn update_status(&mut self, id: MediaId, status: WatchStatus) -> StoreResult<()> {
        self.record_mut(id)?.status = status;
        Ok(())
    }

    fn save_progress(&mut self, id: MediaId, season: u32, episode: u32, status: WatchStatus) -> StoreResult<()> {
        let media = self.record_mut(id)?;
        let MediaDetails::Series(series) = &mut media.details else {
            return Err(StoreError::NotFound(id));
        };
        series.current_season = season;
        series.current_episode = episode;
        media.status = status;
        Ok(())
    }

    fn mark_watched(&mut self, id: MediaId, watched_date: DateTime<Utc>) -> StoreResult<()> {
        let media = self.record_mut(id)?;
        let MediaDetails::Movie(movie) = &mut media.details else {
            return Err(StoreError::NotFound(id));
        };
        movie.watched_date = Some(watched_date);
        media.status = WatchStatus::Completed;
        Ok(())
    }

    fn delete(&mut self, id: MediaId) -> StoreResult<()> {
        self.records.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = MemoryStore::new();
        let movie = Media::movie("Heat", 1995, vec![], 170, None);
        let first = store.create(&movie).unwrap();
        store.delete(first).unwrap();
        let second = store.create(&movie).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_progress_on_movie_is_not_found() {
        let mut store = MemoryStore::new();
        let id = store.create(&Media::movie("Heat", 1995, vec![], 170, None)).unwrap();
        assert!(matches!(
            store.save_progress(id, 1, 1, WatchStatus::Watching),
            Err(StoreError::NotFound(_))
        ));
    }
}
