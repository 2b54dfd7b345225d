use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record '{name}': {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The only failure an orchestration run reports: nothing durable was produced.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("record store error: {0}")]
    Store(#[from] StoreError),
}
