use chrono::{TimeZone, Utc};
use trackflix_core::*;
use trackflix_models::*;

fn create_movie(title: &str) -> Media {
    Media::movie(
        title,
        1999,
        vec!["Sci-Fi".to_string(), "Action".to_string()],
        136,
        Some("Lana Wachowski".to_string()),
    )
}

fn create_series(title: &str, seasons: u32, episodes: u32) -> Media {
    Media::series(title, 2017, vec!["Drama".to_string()], seasons, episodes, Some(55))
}

fn setup_db() -> SqliteStore {
    let mut store = SqliteStore::open_memory().unwrap();
    store.create(&create_movie("The Matrix")).unwrap();
    store.create(&create_movie("Alien")).unwrap();
    store.create(&create_series("Dark", 3, 8)).unwrap();
    store
}

#[test]
fn test_create_assigns_increasing_ids() {
    let mut store = SqliteStore::open_memory().unwrap();
    let first = store.create(&create_movie("One")).unwrap();
    let second = store.create(&create_series("Two", 1, 1)).unwrap();
    assert!(second > first);
}

#[test]
fn test_get_round_trips_movie() {
    let mut store = SqliteStore::open_memory().unwrap();
    let mut movie = create_movie("The Matrix");
    movie.rating = 4.5;
    movie.comment = "Still holds up".to_string();
    let id = store.create(&movie).unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.title, "The Matrix");
    assert_eq!(stored.genres, vec!["Sci-Fi", "Action"]);
    assert_eq!(stored.rating, 4.5);
    assert_eq!(stored.comment, "Still holds up");
    assert_eq!(stored.status, WatchStatus::Planned);
    assert!(stored.created_at.is_some());
    assert_eq!(stored.details, movie.details);
}

#[test]
fn test_get_round_trips_series() {
    let mut store = SqliteStore::open_memory().unwrap();
    let series = create_series("Dark", 3, 8);
    let id = store.create(&series).unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.kind(), MediaKind::Series);
    assert_eq!(stored.details, series.details);
}

#[test]
fn test_get_missing() {
    let store = setup_db();
    assert!(store.get(999).unwrap().is_none());
}

#[test]
fn test_list_all_by_kind_ordered_by_title() {
    let store = setup_db();
    let movies = store.list_all(MediaKind::Movie).unwrap();
    let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Alien", "The Matrix"]);

    let series = store.list_all(MediaKind::Series).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].title, "Dark");
}

#[test]
fn test_counts() {
    let mut store = setup_db();
    assert_eq!(store.count_by_kind(MediaKind::Movie).unwrap(), 2);
    assert_eq!(store.count_by_kind(MediaKind::Series).unwrap(), 1);

    let id = store.list_all(MediaKind::Movie).unwrap()[0].id.unwrap();
    store.update_status(id, WatchStatus::Completed).unwrap();

    let counts = store.count_by_status().unwrap();
    assert_eq!(counts[&WatchStatus::Planned], 2);
    assert_eq!(counts[&WatchStatus::Completed], 1);
    assert_eq!(counts[&WatchStatus::Watching], 0);
}

#[test]
fn test_search_title_case_insensitive() {
    let store = setup_db();
    let found = store.search_title("MATRIX").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "The Matrix");

    assert!(store.search_title("%").unwrap().is_empty());
}

#[test]
fn test_search_folds_accented_titles() {
    let mut store = SqliteStore::open_memory().unwrap();
    store.create(&create_movie("Élite Squad")).unwrap();
    store.create(&create_series("Élite", 8, 8)).unwrap();

    let mut memory = MemoryStore::new();
    memory.create(&create_movie("Élite Squad")).unwrap();
    memory.create(&create_series("Élite", 8, 8)).unwrap();

    assert_eq!(store.search_title("élite").unwrap().len(), 2);
    assert_eq!(store.search_title("ÉLITE SQUAD").unwrap().len(), 1);
    assert_eq!(memory.search_title("élite").unwrap().len(), 2);

    let query = ListQuery {
        search: Some("élite".to_string()),
        ..ListQuery::default()
    };
    let movies = query.apply(store.list_all(MediaKind::Movie).unwrap());
    assert_eq!(movies.len(), 1);
}

#[test]
fn test_search_lists_movies_before_series() {
    let mut store = SqliteStore::open_memory().unwrap();
    store.create(&create_series("Star Trek", 3, 26)).unwrap();
    store.create(&create_movie("Star Wars")).unwrap();

    let found = store.search_title("star").unwrap();
    let kinds: Vec<MediaKind> = found.iter().map(Media::kind).collect();
    assert_eq!(kinds, vec![MediaKind::Movie, MediaKind::Series]);
}

#[test]
fn test_save_progress() {
    let mut store = setup_db();
    let id = store.list_all(MediaKind::Series).unwrap()[0].id.unwrap();
    store.save_progress(id, 2, 3, WatchStatus::Watching).unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.status, WatchStatus::Watching);
    assert_eq!(stored.as_series().unwrap().position_label(), "S2E03");
}

#[test]
fn test_save_progress_on_movie_is_not_found() {
    let mut store = setup_db();
    let id = store.list_all(MediaKind::Movie).unwrap()[0].id.unwrap();
    assert!(matches!(
        store.save_progress(id, 1, 1, WatchStatus::Watching),
        Err(StoreError::NotFound(_))
    ));
    assert_eq!(store.get(id).unwrap().unwrap().status, WatchStatus::Planned);
}

#[test]
fn test_mark_watched_stores_timestamp() {
    let mut store = setup_db();
    let id = store.list_all(MediaKind::Movie).unwrap()[0].id.unwrap();
    let when = Utc.with_ymd_and_hms(2024, 5, 1, 21, 30, 0).unwrap();
    store.mark_watched(id, when).unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.status, WatchStatus::Completed);
    assert_eq!(stored.as_movie().unwrap().watched_date, Some(when));
}

#[test]
fn test_update_rating() {
    let mut store = setup_db();
    let id = store.list_all(MediaKind::Movie).unwrap()[0].id.unwrap();
    store.update_rating(id, 3.5, "fine").unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.rating, 3.5);
    assert_eq!(stored.comment, "fine");

    assert!(matches!(store.update_rating(999, 1.0, ""), Err(StoreError::NotFound(999))));
}

#[test]
fn test_delete_removes_both_parts() {
    let mut store = setup_db();
    let id = store.list_all(MediaKind::Series).unwrap()[0].id.unwrap();
    store.delete(id).unwrap();

    assert!(store.get(id).unwrap().is_none());
    let orphans: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM series WHERE media_id = ?1", [id], |row| row.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
    assert!(matches!(store.delete(id), Err(StoreError::NotFound(_))));
}

#[test]
fn test_file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("trackflix.db");

    let id = {
        let mut store = SqliteStore::open(&path).unwrap();
        store.create(&create_movie("Persisted")).unwrap()
    };

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get(id).unwrap().unwrap().title, "Persisted");
    assert_eq!(schema::get_schema_version(store.connection()).unwrap(), CURRENT_VERSION);
}

#[test]
fn test_newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let store = SqliteStore::open(&path).unwrap();
        store
            .connection()
            .execute("INSERT INTO schema_version (version) VALUES (?1)", [CURRENT_VERSION + 1])
            .unwrap();
    }

    assert!(matches!(
        SqliteStore::open(&path),
        Err(StoreError::Schema(SchemaError::UnsupportedVersion { .. }))
    ));
}

#[test]
fn test_opens_legacy_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE media (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                year INTEGER NOT NULL,
                genres TEXT,
                rating REAL DEFAULT 0,
                comment TEXT,
                status TEXT DEFAULT 'Planejado',
                media_type TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE movies (
                media_id INTEGER PRIMARY KEY,
                duration INTEGER,
                director TEXT,
                watched_date TIMESTAMP,
                FOREIGN KEY (media_id) REFERENCES media(id)
            );
            CREATE TABLE series (
                media_id INTEGER PRIMARY KEY,
                total_seasons INTEGER,
                total_episodes INTEGER,
                current_season INTEGER DEFAULT 1,
                current_episode INTEGER DEFAULT 1,
                episode_duration INTEGER,
                FOREIGN KEY (media_id) REFERENCES media(id)
            );
            INSERT INTO media (title, year, genres, rating, comment, status, media_type)
                VALUES ('Cidade de Deus', 2002, 'Crime, Drama', 5, NULL, 'Concluído', 'movie');
            INSERT INTO movies (media_id, duration, director, watched_date)
                VALUES (1, 130, '', '2024-02-10T22:05:13.123456');
            INSERT INTO media (title, year, genres, rating, comment, status, media_type)
                VALUES ('Sintonia', 2019, NULL, 0, '', 'Assistindo', 'series');
            INSERT INTO series (media_id, total_seasons, total_episodes, current_season, current_episode, episode_duration)
                VALUES (2, 4, 6, 2, 3, 40);",
        )
        .unwrap();
    }

    let mut store = SqliteStore::open(&path).unwrap();

    let movie = store.get(1).unwrap().unwrap();
    assert_eq!(movie.status, WatchStatus::Completed);
    assert_eq!(movie.genres, vec!["Crime", "Drama"]);
    assert!(movie.comment.is_empty());
    let details = movie.as_movie().unwrap();
    assert_eq!(details.director, None);
    assert!(details.watched_date.is_some());

    let series = store.get(2).unwrap().unwrap();
    assert_eq!(series.status, WatchStatus::Watching);
    assert!(series.genres.is_empty());
    assert_eq!(compute_progress_percentage(series.as_series().unwrap()), 37.5);

    // Deleting works without cascade on the legacy tables
    store.delete(1).unwrap();
    assert_eq!(store.count_by_kind(MediaKind::Movie).unwrap(), 0);
}

#[test]
fn test_unknown_status_reads_as_planned() {
    let mut store = setup_db();
    store.create(&create_movie("Heat")).unwrap();
    store
        .connection()
        .execute("UPDATE media SET status = 'Abandonado' WHERE title = 'Heat'", [])
        .unwrap();

    let movies = store.list_all(MediaKind::Movie).unwrap();
    assert_eq!(movies.len(), 3);
    let heat = movies.iter().find(|m| m.title == "Heat").unwrap();
    assert_eq!(heat.status, WatchStatus::Planned);
    assert_eq!(store.get(heat.id.unwrap()).unwrap().unwrap().status, WatchStatus::Planned);

    let counts = store.count_by_status().unwrap();
    assert_eq!(counts[&WatchStatus::Planned], 4);
}
