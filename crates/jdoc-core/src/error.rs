use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the accessor. Absence of a value is never an error:
/// query operations return a null/empty result instead.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("no document loaded")]
    NoDocumentLoaded,

    #[error("error opening {}: {source}", path.display())]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    ParseFailure {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("{name} is a {found}, not an object")]
    NotAnObject { name: String, found: crate::value::ValueKind },

    #[error("{key} is a {found}, not an array")]
    NotAnArray { key: String, found: crate::value::ValueKind },

    #[error("{keys} object keys but {values} values")]
    LengthMismatch { keys: usize, values: usize },
}

pub type Result<T> = std::result::Result<T, AccessError>;
