use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ColumnId;

/// Task identifier
pub type TaskId = String;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// A unit of work on the board
///
/// `status` mirrors `column_id`. Both are written together by the board store;
/// the duplicate field exists because the persisted format carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub column_id: ColumnId,
    #[serde(default)]
    pub status: ColumnId,
    /// Older blobs have no creation time; those tasks count as created on load
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Generate a fresh task id
    pub fn generate_id() -> TaskId {
        format!("t{}", Uuid::new_v4().simple())
    }

    /// Assign the task to a column, keeping `status` in step
    pub fn assign_column(&mut self, column_id: &str) {
        self.column_id = column_id.to_string();
        self.status = column_id.to_string();
    }
}

/// Fields supplied by the caller when creating a task
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub column_id: ColumnId,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            column_id: column_id.into(),
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the stored task under the given id
    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.column_id.clone(),
            column_id: self.column_id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Partial update merged into an existing task
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub column_id: Option<ColumnId>,
}

impl TaskUpdate {
    pub fn column(column_id: impl Into<ColumnId>) -> Self {
        Self {
            column_id: Some(column_id.into()),
            ..Self::default()
        }
    }

    /// Merge into `task`, returning whether anything changed
    pub fn apply_to(&self, task: &mut Task) -> bool {
        let before = task.clone();

        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(column_id) = &self.column_id {
            task.assign_column(column_id);
        }

        *task != before
    }
}
