pub mod change;
pub mod error;
pub mod history;
pub mod project;

pub use change::*;
pub use error::{Error, Result};
pub use history::*;
pub use project::*;
