//! The six task operations, implemented against the store.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use super::model::{Task, TaskStatus};
use crate::store::{StoreError, TaskStore};

#[derive(Debug, Error)]
pub enum TaskError {
    /// Bad or missing input → HTTP 400.
    #[error("{0}")]
    Validation(String),
    /// No task with the requested id → HTTP 404.
    #[error("task not found: {0}")]
    NotFound(String),
    /// Persisted-medium read/write failure → HTTP 500.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Implements create/list/get/update/delete/set-status against the store.
///
/// Every operation reloads the collection from disk, so each request
/// observes the latest persisted state; mutations write the whole
/// collection back. No mutual exclusion: concurrent writers race and the
/// last save wins.
pub struct TaskManager {
    store: Arc<TaskStore>,
}

impl TaskManager {
    pub fn new(store: Arc<TaskStore>) -> TaskManager {
        TaskManager { store }
    }

    /// Create a task with `status = pending` and a fresh UUID, appended at
    /// the end of the collection.
    pub async fn create(
        &self,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Task, TaskError> {
        let (title, description) = require_fields(title, description)?;
        let task = Task::new(title, description);

        let mut tasks = self.store.load().await?;
        tasks.push(task.clone());
        self.store.save(&tasks).await?;

        Ok(task)
    }

    /// Full collection in insertion order. An empty store yields an empty
    /// list, not an error.
    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.load().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Task, TaskError> {
        let tasks = self.store.load().await?;
        tasks
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Overwrite title/description and stamp `updated_at`. Validation runs
    /// before the existence check; `status` is untouched.
    pub async fn update(
        &self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Task, TaskError> {
        let (title, description) = require_fields(title, description)?;

        let mut tasks = self.store.load().await?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        task.title = title;
        task.description = description;
        task.updated_at = Some(Utc::now());
        let updated = task.clone();

        self.store.save(&tasks).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), TaskError> {
        let mut tasks = self.store.load().await?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(TaskError::NotFound(id.to_string()));
        }

        self.store.save(&tasks).await?;
        Ok(())
    }

    /// Set the status. The status string is validated before the existence
    /// check. Status changes do not touch `updated_at`; only
    /// title/description edits do.
    pub async fn set_status(
        &self,
        id: &str,
        status: Option<String>,
    ) -> Result<Task, TaskError> {
        let status = status
            .as_deref()
            .and_then(TaskStatus::parse)
            .ok_or_else(|| {
                TaskError::Validation(format!(
                    "status must be one of: {}",
                    TaskStatus::NAMES.join(", ")
                ))
            })?;

        let mut tasks = self.store.load().await?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        task.status = status;
        let updated = task.clone();

        self.store.save(&tasks).await?;
        Ok(updated)
    }
}

fn require_fields(
    title: Option<String>,
    description: Option<String>,
) -> Result<(String, String), TaskError> {
    match (
        title.filter(|s| !s.is_empty()),
        description.filter(|s| !s.is_empty()),
    ) {
        (Some(title), Some(description)) => Ok((title, description)),
        _ => Err(TaskError::Validation(
            "title and description are required".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn make_manager(dir: &TempDir) -> TaskManager {
        let store = TaskStore::open(dir.path().join("tasks.json")).await.unwrap();
        TaskManager::new(Arc::new(store))
    }

    #[tokio::test]
    async fn create_yields_pending_task_with_fresh_id() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        let a = manager
            .create(Some("A".to_string()), Some("first".to_string()))
            .await
            .unwrap();
        let b = manager
            .create(Some("B".to_string()), Some("second".to_string()))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.status, TaskStatus::Pending);
        assert!(a.updated_at.is_none());
    }

    #[tokio::test]
    async fn create_rejects_missing_or_empty_fields_without_persisting() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        for (title, description) in [
            (None, Some("d".to_string())),
            (Some("t".to_string()), None),
            (Some(String::new()), Some("d".to_string())),
            (Some("t".to_string()), Some(String::new())),
        ] {
            let err = manager.create(title, description).await.unwrap_err();
            assert!(matches!(err, TaskError::Validation(_)));
        }

        assert!(manager.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_appends_at_the_end() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        for i in 0..3 {
            manager
                .create(Some(format!("task {i}")), Some("d".to_string()))
                .await
                .unwrap();
        }
        let latest = manager
            .create(Some("latest".to_string()), Some("d".to_string()))
            .await
            .unwrap();

        let tasks = manager.list().await.unwrap();
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks.last().unwrap().id, latest.id);
        assert_eq!(
            tasks.iter().filter(|t| t.id == latest.id).count(),
            1,
            "new task appears exactly once"
        );
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        let err = manager.get("no-such-id").await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_stamps_updated_at() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        let task = manager
            .create(Some("before".to_string()), Some("old".to_string()))
            .await
            .unwrap();
        let updated = manager
            .update(&task.id, Some("after".to_string()), Some("new".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.description, "new");
        assert_eq!(updated.status, TaskStatus::Pending, "status untouched");
        assert!(updated.updated_at.unwrap() > updated.created_at);

        // Persisted, not just returned
        let fetched = manager.get(&task.id).await.unwrap();
        assert_eq!(fetched.title, "after");
        assert!(fetched.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_validates_before_checking_existence() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        let err = manager.update("no-such-id", None, None).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));

        let err = manager
            .update("no-such-id", Some("t".to_string()), Some("d".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        let a = manager
            .create(Some("a".to_string()), Some("d".to_string()))
            .await
            .unwrap();
        let b = manager
            .create(Some("b".to_string()), Some("d".to_string()))
            .await
            .unwrap();

        manager.delete(&a.id).await.unwrap();

        let err = manager.get(&a.id).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));

        let tasks = manager.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, b.id);

        let err = manager.delete(&a.id).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn set_status_changes_only_status() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        let task = manager
            .create(Some("t".to_string()), Some("d".to_string()))
            .await
            .unwrap();
        let updated = manager
            .set_status(&task.id, Some("done".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.title, "t");
        assert!(updated.updated_at.is_none(), "status change leaves updated_at alone");
    }

    #[tokio::test]
    async fn set_status_rejects_invalid_status_before_existence() {
        let dir = TempDir::new().unwrap();
        let manager = make_manager(&dir).await;

        let task = manager
            .create(Some("t".to_string()), Some("d".to_string()))
            .await
            .unwrap();

        // Invalid status on an existing task: 400, task unchanged
        let err = manager
            .set_status(&task.id, Some("bogus".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert_eq!(
            manager.get(&task.id).await.unwrap().status,
            TaskStatus::Pending
        );

        // Invalid status on a missing task: still validation, not 404
        let err = manager
            .set_status("no-such-id", Some("bogus".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));

        // Missing status field behaves like an invalid one
        let err = manager.set_status(&task.id, None).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));

        // Valid status on a missing task: 404
        let err = manager
            .set_status("no-such-id", Some("done".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }
}
