pub mod config;
pub mod detector;
pub mod document;
pub mod error;
pub mod reminder;
pub mod sync;

pub use config::{Config, ConfigTemplate, ReminderSource};
pub use detector::{Detection, ExcludeSet, detect, read_snippet, take_snapshot};
pub use document::{merged_document, sync_document, temp_path_for};
pub use error::{Error, Result};
pub use sync::{ContextSource, LoopState, ScannerSource, SyncLoop, TickOutcome};
