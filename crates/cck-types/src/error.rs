use std::fmt;

/// Result type for cck-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A persisted change kind string is not one of created/modified/deleted
    UnknownChangeKind(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownChangeKind(kind) => write!(f, "Unknown change kind: '{}'", kind),
        }
    }
}

impl std::error::Error for Error {}
