use crate::board::persistence::{MemoryBackend, PersistError, RedbBackend, StateBackend};
use crate::board::state::{BoardState, PersistedBlob};
use crate::config::Config;
use crate::constants::DEFAULT_STORAGE_KEY;
use crate::models::{
    Column, ColumnId, NewColumn, NewTask, Profile, ProfileUpdate, Task, TaskId, TaskUpdate, Theme,
};

/// Handle returned by [`BoardStore::subscribe`]
pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&BoardState) + Send + Sync>;

/// Result of a column deletion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRemoval {
    /// Column removed together with this many tasks
    Removed { tasks_removed: usize },
    /// Default columns cannot be deleted
    Protected,
    NotFound,
}

/// Board state manager
///
/// Owns the board state, applies mutations synchronously, notifies
/// subscribers after every change and writes the new state through to its
/// storage backend. Mutations never fail: unknown ids are no-ops and a
/// failed write is logged while the in-memory state stays authoritative.
pub struct BoardStore {
    state: BoardState,
    backend: Box<dyn StateBackend>,
    storage_key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl BoardStore {
    /// Initialize from the blob under `storage_key`, falling back to defaults
    pub fn load(backend: impl StateBackend + 'static, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();

        let state = match backend.load(&storage_key) {
            Ok(Some(bytes)) => match PersistedBlob::decode(&bytes) {
                Ok(state) => {
                    tracing::debug!(
                        "Loaded board state: {} tasks, {} columns",
                        state.tasks.len(),
                        state.columns.len()
                    );
                    state
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable board state under {}: {}", storage_key, e);
                    BoardState::default()
                }
            },
            Ok(None) => BoardState::default(),
            Err(e) => {
                tracing::warn!("Failed to read board state under {}: {}", storage_key, e);
                BoardState::default()
            }
        };

        Self::with_state(backend, storage_key, state)
    }

    /// Start from an explicit state without reading the backend
    pub fn with_state(
        backend: impl StateBackend + 'static,
        storage_key: impl Into<String>,
        state: BoardState,
    ) -> Self {
        Self {
            state,
            backend: Box::new(backend),
            storage_key: storage_key.into(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Open the local redb file named by `config`
    pub fn open(config: &Config) -> Result<Self, PersistError> {
        let backend = RedbBackend::open(&config.storage_path)?;
        Ok(Self::load(backend, config.storage_key.as_str()))
    }

    /// Store backed by a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn columns(&self) -> &[Column] {
        &self.state.columns
    }

    pub fn profile(&self) -> &Profile {
        &self.state.profile
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a listener called with the new state after every change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&BoardState) + Send + Sync + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false when the id is unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Append a task under a fresh id
    pub fn add_task(&mut self, new_task: NewTask) -> TaskId {
        let id = loop {
            let candidate = Task::generate_id();
            if self.state.task(&candidate).is_none() {
                break candidate;
            }
        };

        let task = new_task.into_task(id.clone());
        tracing::debug!("Adding task {} to column {}", task.id, task.column_id);
        self.state.tasks.push(task);
        self.commit();

        id
    }

    /// Merge `update` into the task with `id`
    pub fn update_task(&mut self, id: &str, update: &TaskUpdate) -> bool {
        let changed = match self.state.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => update.apply_to(task),
            None => return false,
        };

        if changed {
            self.commit();
        }
        changed
    }

    /// Reassign a task to another column
    pub fn move_task(&mut self, id: &str, column_id: &str) -> bool {
        self.update_task(id, &TaskUpdate::column(column_id))
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.id != id);

        let removed = self.state.tasks.len() != before;
        if removed {
            self.commit();
        }
        removed
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Append a column under a fresh id
    pub fn add_column(&mut self, new_column: NewColumn) -> ColumnId {
        let id = loop {
            let candidate = Column::generate_id();
            if self.state.column(&candidate).is_none() {
                break candidate;
            }
        };

        tracing::debug!("Adding column {} ({})", id, new_column.title);
        self.state.columns.push(Column::new(id.clone(), new_column.title));
        self.commit();

        id
    }

    /// Delete a column and every task assigned to it
    pub fn delete_column(&mut self, id: &str) -> ColumnRemoval {
        if Column::is_default_id(id) {
            tracing::debug!("Refusing to delete default column {}", id);
            return ColumnRemoval::Protected;
        }
        if self.state.column(id).is_none() {
            return ColumnRemoval::NotFound;
        }

        self.state.columns.retain(|c| c.id != id);
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.column_id != id);
        let tasks_removed = before - self.state.tasks.len();

        tracing::debug!("Deleted column {} with {} tasks", id, tasks_removed);
        self.commit();

        ColumnRemoval::Removed { tasks_removed }
    }

    // =========================================================================
    // Profile and settings
    // =========================================================================

    pub fn update_profile(&mut self, update: &ProfileUpdate) -> bool {
        let changed = update.apply_to(&mut self.state.profile);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if self.state.theme == theme {
            return false;
        }
        self.state.theme = theme;
        self.commit();
        true
    }

    /// Flip between light and dark; returns the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.state.theme.toggled();
        self.set_theme(theme);
        theme
    }

    /// Wipe persisted storage and reset to the defaults
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.clear(&self.storage_key) {
            tracing::warn!("Failed to clear board state under {}: {}", self.storage_key, e);
        }
        self.state = BoardState::default();
        self.notify();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        let result = PersistedBlob::encode(&self.state)
            .map_err(PersistError::from)
            .and_then(|bytes| self.backend.save(&self.storage_key, &bytes));

        if let Err(e) = result {
            tracing::warn!("Failed to persist board state under {}: {}", self.storage_key, e);
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn assert_status_mirrors_column(store: &BoardStore) {
        for task in store.tasks() {
            assert_eq!(task.status, task.column_id, "task {} drifted", task.id);
        }
    }

    #[test]
    fn test_add_task_assigns_unique_ids() {
        let mut store = BoardStore::in_memory();
        let mut seen: HashSet<String> = store.tasks().iter().map(|t| t.id.clone()).collect();

        for i in 0..50 {
            let id = store.add_task(NewTask::new(format!("Task {}", i), "todo"));
            assert!(seen.insert(id), "id reused");
        }

        assert_eq!(store.tasks().len(), 53);
        assert_status_mirrors_column(&store);
    }

    #[test]
    fn test_add_task_keeps_supplied_fields() {
        let mut store = BoardStore::in_memory();
        let id = store.add_task(
            NewTask::new("Ship release", "in-progress")
                .with_description("Tag and publish")
                .with_priority(Priority::High),
        );

        let task = store.state().task(&id).unwrap();
        assert_eq!(task.title, "Ship release");
        assert_eq!(task.description, "Tag and publish");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, "in-progress");
    }

    #[test]
    fn test_update_task_merges_and_ignores_unknown_ids() {
        let mut store = BoardStore::in_memory();

        let update = TaskUpdate {
            title: Some("Design Marketing Site".to_string()),
            column_id: Some("done".to_string()),
            ..TaskUpdate::default()
        };
        assert!(store.update_task("t1", &update));

        let task = store.state().task("t1").unwrap();
        assert_eq!(task.title, "Design Marketing Site");
        assert_eq!(task.description, "Wireframes and hi-fi designs");
        assert_eq!(task.column_id, "done");
        assert_status_mirrors_column(&store);

        let snapshot = store.state().clone();
        assert!(!store.update_task("missing", &update));
        assert_eq!(store.state(), &snapshot);
    }

    #[test]
    fn test_delete_task() {
        let mut store = BoardStore::in_memory();

        assert!(store.delete_task("t2"));
        assert!(store.state().task("t2").is_none());
        assert_eq!(store.tasks().len(), 2);

        assert!(!store.delete_task("t2"));
    }

    #[test]
    fn test_delete_column_cascades_only_its_tasks() {
        let mut store = BoardStore::in_memory();
        let review = store.add_column(NewColumn::new("Review"));
        let qa = store.add_column(NewColumn::new("QA"));

        store.add_task(NewTask::new("Review PR", review.clone()));
        store.add_task(NewTask::new("Review docs", review.clone()));
        let kept = store.add_task(NewTask::new("Regression pass", qa.clone()));

        assert_eq!(
            store.delete_column(&review),
            ColumnRemoval::Removed { tasks_removed: 2 }
        );

        assert!(store.state().column(&review).is_none());
        assert!(store.tasks().iter().all(|t| t.column_id != review));
        assert!(store.state().task(&kept).is_some());
        assert_eq!(store.tasks().len(), 4);
    }

    #[test]
    fn test_default_columns_cannot_be_deleted() {
        let mut store = BoardStore::in_memory();

        for id in ["todo", "in-progress", "done"] {
            assert_eq!(store.delete_column(id), ColumnRemoval::Protected);
        }

        assert_eq!(store.columns().len(), 3);
        assert_eq!(store.tasks().len(), 3);
    }

    #[test]
    fn test_delete_missing_column_is_noop() {
        let mut store = BoardStore::in_memory();
        assert_eq!(store.delete_column("c-nope"), ColumnRemoval::NotFound);
    }

    #[test]
    fn test_toggle_theme_persists_and_notifies() {
        let backend = Arc::new(MemoryBackend::new());
        let mut store = BoardStore::load(backend.clone(), DEFAULT_STORAGE_KEY);
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            store.subscribe(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let reloaded = BoardStore::load(backend.clone(), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.theme(), Theme::Dark);

        assert_eq!(store.toggle_theme(), Theme::Light);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscribers_see_changes_synchronously() {
        let mut store = BoardStore::in_memory();
        let calls = Arc::new(AtomicUsize::new(0));
        let last_count = Arc::new(AtomicUsize::new(0));

        let id = {
            let calls = calls.clone();
            let last_count = last_count.clone();
            store.subscribe(move |state| {
                calls.fetch_add(1, Ordering::SeqCst);
                last_count.store(state.tasks.len(), Ordering::SeqCst);
            })
        };

        store.add_task(NewTask::new("One more", "todo"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(last_count.load(Ordering::SeqCst), 4);

        // No change, no notification
        store.update_task("missing", &TaskUpdate::column("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(store.unsubscribe(id));
        store.delete_task("t1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_state_survives_reload_and_clear_wipes_it() {
        let backend = Arc::new(MemoryBackend::new());

        let mut store = BoardStore::load(backend.clone(), DEFAULT_STORAGE_KEY);
        let id = store.add_task(NewTask::new("Persist me", "done"));
        store.set_theme(Theme::Dark);

        let reloaded = BoardStore::load(backend.clone(), DEFAULT_STORAGE_KEY);
        assert!(reloaded.state().task(&id).is_some());
        assert_eq!(reloaded.theme(), Theme::Dark);

        let mut reloaded = reloaded;
        reloaded.clear();
        assert!(!backend.contains(DEFAULT_STORAGE_KEY));
        let ids: Vec<&str> = reloaded.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(reloaded.theme(), Theme::Light);

        let fresh = BoardStore::load(backend, DEFAULT_STORAGE_KEY);
        assert!(fresh.state().task(&id).is_none());
        assert_eq!(fresh.theme(), Theme::Light);
    }

    struct FailingBackend;

    impl StateBackend for FailingBackend {
        fn load(&self, _key: &str) -> Result<Option<Vec<u8>>, PersistError> {
            Err(PersistError::Encoding(
                serde_json::from_str::<()>("x").unwrap_err(),
            ))
        }

        fn save(&self, _key: &str, _bytes: &[u8]) -> Result<(), PersistError> {
            Err(PersistError::Encoding(
                serde_json::from_str::<()>("x").unwrap_err(),
            ))
        }

        fn clear(&self, _key: &str) -> Result<(), PersistError> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failures_do_not_block_mutations() {
        let mut store = BoardStore::load(FailingBackend, DEFAULT_STORAGE_KEY);
        assert_eq!(store.tasks().len(), 3);

        let id = store.add_task(NewTask::new("Still applied", "todo"));
        assert!(store.state().task(&id).is_some());
    }

    #[test]
    fn test_unreadable_blob_falls_back_to_defaults() {
        let backend = MemoryBackend::new();
        backend.save(DEFAULT_STORAGE_KEY, b"not json").unwrap();

        let store = BoardStore::load(backend, DEFAULT_STORAGE_KEY);
        assert_eq!(store.columns().len(), 3);
        assert_eq!(store.tasks().len(), 3);
    }
}
