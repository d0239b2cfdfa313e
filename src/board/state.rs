use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::PERSISTED_STATE_VERSION;
use crate::models::{Column, Priority, Profile, Task, Theme};

/// Everything the board persists: theme, profile, tasks and columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default = "Column::defaults")]
    pub columns: Vec<Column>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            profile: Profile::default(),
            tasks: seed_tasks(),
            columns: Column::defaults(),
        }
    }
}

fn seed_task(id: &str, title: &str, description: &str, column_id: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority: Priority::Medium,
        column_id: column_id.to_string(),
        status: column_id.to_string(),
        created_at: Utc::now(),
    }
}

fn seed_tasks() -> Vec<Task> {
    vec![
        seed_task("t1", "Design Landing Page", "Wireframes and hi-fi designs", "todo"),
        seed_task("t2", "Implement Auth", "JWT authentication", "in-progress"),
        seed_task("t3", "Setup CI/CD", "GitHub Actions workflow", "done"),
    ]
}

impl BoardState {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Tasks belonging to `column_id`, in insertion order
    pub fn tasks_in<'a>(&'a self, column_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }

    /// Repair a freshly decoded state
    ///
    /// Re-mirrors `status` from `column_id` and restores any default column
    /// missing from the blob.
    pub(crate) fn normalize(&mut self) {
        for task in &mut self.tasks {
            if task.status != task.column_id {
                task.status = task.column_id.clone();
            }
        }

        for (index, default) in Column::defaults().into_iter().enumerate() {
            if self.column(&default.id).is_none() {
                let at = index.min(self.columns.len());
                self.columns.insert(at, default);
            }
        }
    }
}

/// On-disk envelope around the board state
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedBlob {
    pub state: BoardState,
    #[serde(default)]
    pub version: u32,
}

impl PersistedBlob {
    pub fn encode(state: &BoardState) -> Result<Vec<u8>, serde_json::Error> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            state: &'a BoardState,
            version: u32,
        }

        serde_json::to_vec(&Borrowed {
            state,
            version: PERSISTED_STATE_VERSION,
        })
    }

    pub fn decode(bytes: &[u8]) -> Result<BoardState, serde_json::Error> {
        let blob: PersistedBlob = serde_json::from_slice(bytes)?;
        let mut state = blob.state;
        state.normalize();
        Ok(state)
    }
}
