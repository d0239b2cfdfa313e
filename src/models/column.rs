use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_COLUMN_IDS;

/// Column identifier
pub type ColumnId = String;

/// A workflow stage holding zero or more tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// The columns every board starts with
    pub fn defaults() -> Vec<Column> {
        vec![
            Column::new("todo", "To Do"),
            Column::new("in-progress", "In Progress"),
            Column::new("done", "Done"),
        ]
    }

    /// Whether `id` names one of the undeletable default columns
    pub fn is_default_id(id: &str) -> bool {
        DEFAULT_COLUMN_IDS.contains(&id)
    }

    pub fn is_default(&self) -> bool {
        Self::is_default_id(&self.id)
    }

    /// Generate a fresh column id
    pub fn generate_id() -> ColumnId {
        format!("c{}", Uuid::new_v4().simple())
    }
}

/// Fields supplied by the caller when creating a column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewColumn {
    pub title: String,
}

impl NewColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}
