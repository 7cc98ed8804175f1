//! Catalog service and persistence for TrackFlix.
//!
//! [`MediaStore`] is the storage contract; [`SqliteStore`] backs it with a
//! local SQLite file and [`MemoryStore`] keeps everything in a map for tests.
//! [`CatalogService`] validates input, delegates progress math to
//! `trackflix_models::progress`, and aggregates statistics.

pub mod catalog;
pub mod export;
pub mod filter;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod stats;
pub mod store;

pub use catalog::{CatalogError, CatalogResult, CatalogService};
pub use export::{default_export_file_name, export_csv};
pub use filter::{ListQuery, StatusFilter};
pub use memory::MemoryStore;
pub use schema::{SchemaError, CURRENT_VERSION};
pub use sqlite::SqliteStore;
pub use stats::{GoalTier, Statistics};
pub use store::{MediaStore, StoreError, StoreResult};
