//! Error types for local storage.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blob on disk is not a JSON object.
    #[error("Storage file {} does not hold a JSON object", .0.display())]
    NotAnObject(PathBuf),

    /// A value under `key` could not be (de)serialized.
    #[error("Storage value for {key} is malformed: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
