use crate::board::store::BoardStore;
use crate::constants::{FREE_TASK_LIMIT, PRO_FEATURES};
use crate::models::{ColumnId, NewColumn, NewTask, Profile, TaskId};

/// Actions limited on the free tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    CreateTask,
    CreateColumn,
}

/// Shown instead of performing a gated action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePrompt {
    pub action: GatedAction,
    pub message: String,
    pub features: &'static [&'static str],
}

impl UpgradePrompt {
    fn new(action: GatedAction) -> Self {
        let message = match action {
            GatedAction::CreateTask => format!(
                "Free plan is limited to {} tasks. Upgrade to Pro for unlimited tasks.",
                FREE_TASK_LIMIT
            ),
            GatedAction::CreateColumn => {
                "Custom columns are a Pro feature. Upgrade to Pro to add columns.".to_string()
            }
        };

        Self {
            action,
            message,
            features: &PRO_FEATURES,
        }
    }
}

/// Outcome of a gated board action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Allowed(T),
    UpgradeRequired(UpgradePrompt),
    /// Input was blank; nothing happened
    Skipped,
}

impl<T> Gated<T> {
    pub fn allowed(self) -> Option<T> {
        match self {
            Gated::Allowed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_upgrade_required(&self) -> bool {
        matches!(self, Gated::UpgradeRequired(_))
    }
}

/// Free profiles may hold at most `FREE_TASK_LIMIT` tasks
pub fn check_task_creation(profile: &Profile, task_count: usize) -> Result<(), UpgradePrompt> {
    if !profile.is_pro && task_count >= FREE_TASK_LIMIT {
        return Err(UpgradePrompt::new(GatedAction::CreateTask));
    }
    Ok(())
}

/// Free profiles keep the default columns only
pub fn check_column_creation(profile: &Profile) -> Result<(), UpgradePrompt> {
    if !profile.is_pro {
        return Err(UpgradePrompt::new(GatedAction::CreateColumn));
    }
    Ok(())
}

impl BoardStore {
    /// Create a task if the entitlement allows it
    pub fn try_add_task(&mut self, new_task: NewTask) -> Gated<TaskId> {
        if let Err(prompt) = check_task_creation(self.profile(), self.tasks().len()) {
            tracing::info!("Task creation gated: {} tasks on free plan", self.tasks().len());
            return Gated::UpgradeRequired(prompt);
        }
        if new_task.title.trim().is_empty() {
            return Gated::Skipped;
        }
        Gated::Allowed(self.add_task(new_task))
    }

    /// Create a column if the entitlement allows it
    pub fn try_add_column(&mut self, new_column: NewColumn) -> Gated<ColumnId> {
        if let Err(prompt) = check_column_creation(self.profile()) {
            tracing::info!("Column creation gated on free plan");
            return Gated::UpgradeRequired(prompt);
        }
        if new_column.title.trim().is_empty() {
            return Gated::Skipped;
        }
        Gated::Allowed(self.add_column(new_column))
    }
}
