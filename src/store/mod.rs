//! JSON-file persistence for the task collection.
//!
//! The entire collection round-trips through load → mutate → save on every
//! mutation; there is no caching and no incremental write. Saves replace
//! the file wholesale: write to `<path>.tmp`, then rename over the target,
//! so a partially written collection is never visible to readers. A crash
//! mid-save leaves the previous file intact.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::tasks::model::Task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task store I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("task store at {path} is not a valid task collection: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode task collection: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Owns the persisted-file location. Constructed once at startup and
/// injected into the task manager; nothing else touches the file.
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Open the store, bootstrapping an empty collection when the file does
    /// not exist yet. The initial load verifies the content decodes, so a
    /// corrupt file is reported here rather than on the first request.
    pub async fn open(path: impl Into<PathBuf>) -> Result<TaskStore, StoreError> {
        let store = TaskStore { path: path.into() };

        if !store.path.exists() {
            if let Some(parent) = store.path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StoreError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
            store.save(&[]).await?;
            info!(path = %store.path.display(), "created empty task store");
        }

        store.load().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole persisted collection.
    pub async fn load(&self) -> Result<Vec<Task>, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the persisted collection. Atomic write: write to tmp,
    /// then rename.
    pub async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)
            .map_err(|source| StoreError::Encode { source })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp_path.clone(),
                source,
            })?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}
