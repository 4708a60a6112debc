//! The task entity and its status enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single unit of work tracked by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// UUID v4, allocated at creation. Immutable.
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Set once at creation. Immutable.
    pub created_at: DateTime<Utc>,
    /// Set on title/description updates; absent on freshly created tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: String, description: String) -> Task {
        Task {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Wire names of all accepted statuses, in declaration order.
    pub const NAMES: [&'static str; 3] = ["pending", "in_progress", "done"];

    /// Parse a wire name. `None` for anything outside the enumeration.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        })
    }
}
