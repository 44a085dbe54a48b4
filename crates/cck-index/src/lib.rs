// SQLite-backed history of file changes and operations.
// Append-only; rows leave only through retention trimming.

mod db;
mod error;
mod queries;
pub mod render;
mod schema;

// Public API
pub use db::{HistoryStore, TrimReport, merge_by_recency};
pub use error::{Error, Result};
pub use render::HistoryFormat;
pub use schema::SCHEMA_VERSION;
