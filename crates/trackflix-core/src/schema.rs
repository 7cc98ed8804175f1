//! SQLite schema creation and version check.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unsupported data file: schema version {found} is newer than {supported}")]
    UnsupportedVersion { supported: i32, found: i32 },
}

/// Current schema version. Older files are opened as-is; there are no migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables if they don't exist.
///
/// Idempotent, and compatible with data files written before the version
/// table existed (same tables and column names).
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Bring a freshly opened connection up to a usable state.
pub fn prepare(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(conn)?;
    if version == 0 {
        create_schema(conn)?;
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::UnsupportedVersion {
            supported: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(())
}

/// Get the recorded schema version, or 0 if none has been recorded.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Attributes shared by every kind
CREATE TABLE IF NOT EXISTS media (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    genres TEXT,
    rating REAL DEFAULT 0,
    comment TEXT,
    status TEXT DEFAULT 'planned',
    media_type TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS movies (
    media_id INTEGER PRIMARY KEY REFERENCES media(id) ON DELETE CASCADE,
    duration INTEGER,
    director TEXT,
    watched_date TIMESTAMP
);

-- total_episodes is the per-season episode count
CREATE TABLE IF NOT EXISTS series (
    media_id INTEGER PRIMARY KEY REFERENCES media(id) ON DELETE CASCADE,
    total_seasons INTEGER,
    total_episodes INTEGER,
    current_season INTEGER DEFAULT 1,
    current_episode INTEGER DEFAULT 1,
    episode_duration INTEGER
);
"#;
