// Engine module - pure sync logic, no I/O
// Snapshot diffing, marker-preserving merge, and context rendering

pub mod diff;
pub mod generator;
pub mod merge;

pub use diff::{PathChange, diff_snapshots};
pub use generator::render;
pub use merge::{AUTO_END, AUTO_START, DocumentLayout, GeneratedRegion, classify, merge};
