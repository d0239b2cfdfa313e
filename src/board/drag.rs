use crate::board::state::BoardState;
use crate::board::store::BoardStore;
use crate::models::{ColumnId, Task, TaskId};

/// Something a pointer or keyboard gesture can pick up or drop onto
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Task(TaskId),
    Column(ColumnId),
}

/// What a finished drag did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved {
        task_id: TaskId,
        from: ColumnId,
        to: ColumnId,
    },
    Unchanged,
}

/// Column a dragged task should move to, if the drop changes membership
///
/// Only column membership is resolved. Dropping onto a task in the same
/// column, onto the dragged task itself, onto nothing, or onto anything
/// not on the board resolves to `None`.
pub fn resolve_drop<'a>(
    state: &'a BoardState,
    active: &DragItem,
    over: Option<&DragItem>,
) -> Option<(&'a Task, ColumnId)> {
    let DragItem::Task(active_id) = active else {
        return None;
    };
    let over = over?;
    if over == active {
        return None;
    }

    let task = state.task(active_id)?;
    let target = match over {
        DragItem::Task(over_id) => state.task(over_id)?.column_id.clone(),
        DragItem::Column(column_id) => state.column(column_id)?.id.clone(),
    };

    if target == task.column_id {
        return None;
    }
    Some((task, target))
}

/// Tracks the task being dragged between drag start and drag end
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<TaskId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag; returns the task to render in the drag overlay
    ///
    /// Only tasks are tracked. Picking up a column leaves no active item.
    pub fn drag_start<'s>(&mut self, store: &'s BoardStore, item: DragItem) -> Option<&'s Task> {
        self.active = None;

        let DragItem::Task(id) = item else {
            return None;
        };
        let task = store.state().task(&id)?;
        self.active = Some(id);
        Some(task)
    }

    pub fn active(&self) -> Option<&TaskId> {
        self.active.as_ref()
    }

    /// Abandon the current drag without touching the board
    pub fn drag_cancel(&mut self) {
        self.active = None;
    }

    /// Finish the drag over `over` and apply any column reassignment
    pub fn drag_end(&mut self, store: &mut BoardStore, over: Option<DragItem>) -> DropOutcome {
        let Some(active_id) = self.active.take() else {
            return DropOutcome::Unchanged;
        };

        let active = DragItem::Task(active_id);
        let Some((task, target)) = resolve_drop(store.state(), &active, over.as_ref()) else {
            return DropOutcome::Unchanged;
        };
        let task_id = task.id.clone();
        let from = task.column_id.clone();

        store.move_task(&task_id, &target);
        tracing::debug!("Moved task {} from {} to {}", task_id, from, target);

        DropOutcome::Moved {
            task_id,
            from,
            to: target,
        }
    }
}
