//! Storage error type.

use thiserror::Error;

/// Any failure raised while talking to the infractions table.
///
/// The display text is the underlying message, unchanged.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Error binding parameter {index}: type '{kind}' is not supported")]
    UnsupportedType { index: usize, kind: &'static str },
}

pub type Result<T> = std::result::Result<T, StorageError>;
