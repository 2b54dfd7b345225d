//! Persistence collaborator: write a record under a logical name, get back
//! where it went.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::StoreError;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist `record` under `name` (e.g. `companies/acme_data`) and return
    /// its location.
    async fn write(&self, name: &str, record: &serde_json::Value) -> Result<String, StoreError>;
}

/// Writes pretty-printed JSON to `{root}/{name}.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn write(&self, name: &str, record: &serde_json::Value) -> Result<String, StoreError> {
        let path = self.path_for(name);
        let body = serde_json::to_vec_pretty(record).map_err(|source| StoreError::Json {
            name: name.to_string(),
            source,
        })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "record written");
        Ok(path.display().to_string())
    }
}
