//! Board store tests against the on-disk redb backend

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use taskflow_server::board::{
    BoardStore, ColumnRemoval, DragController, DragItem, DropOutcome, Gated, RedbBackend,
};
use taskflow_server::config::{Config, GatewayConfig};
use taskflow_server::models::{NewColumn, NewTask, Priority, ProfileUpdate, TaskUpdate, Theme};

const STORAGE_KEY: &str = "task-manager-storage";

fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        allowed_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        storage_path: temp_dir
            .path()
            .join("nested/taskflow.redb")
            .to_string_lossy()
            .into_owned(),
        storage_key: STORAGE_KEY.to_string(),
        backend_url: "http://localhost:3001".to_string(),
        gateway: GatewayConfig {
            api_url: "http://localhost:9".to_string(),
            key_id: "dummy_key_id".to_string(),
            key_secret: "dummy_key_secret".to_string(),
            currency: "INR".to_string(),
        },
        identity_provider: None,
    }
}

fn go_pro(store: &mut BoardStore) {
    store.update_profile(&ProfileUpdate {
        is_pro: Some(true),
        ..ProfileUpdate::default()
    });
}

#[test]
fn test_fresh_file_starts_with_seed_board() {
    let temp_dir = TempDir::new().unwrap();
    let store = BoardStore::open(&test_config(&temp_dir)).unwrap();

    let ids: Vec<&str> = store.columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["todo", "in-progress", "done"]);
    assert_eq!(store.tasks().len(), 3);
    assert_eq!(store.theme(), Theme::Light);
    assert!(!store.profile().is_pro);
}

#[test]
fn test_changes_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);

    let (task_id, column_id) = {
        let mut store = BoardStore::open(&config).unwrap();
        go_pro(&mut store);
        let column_id = store.add_column(NewColumn::new("Review"));
        let task_id = store.add_task(
            NewTask::new("Write release notes", column_id.as_str())
                .with_description("Summarize the sprint")
                .with_priority(Priority::High),
        );
        store.set_theme(Theme::Dark);
        (task_id, column_id)
    };

    let store = BoardStore::open(&config).unwrap();
    let task = store.state().task(&task_id).unwrap();
    assert_eq!(task.title, "Write release notes");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.column_id, column_id);
    assert_eq!(task.status, column_id);
    assert!(store.state().column(&column_id).is_some());
    assert_eq!(store.theme(), Theme::Dark);
    assert!(store.profile().is_pro);
}

#[test]
fn test_clear_wipes_persisted_board() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);

    {
        let mut store = BoardStore::open(&config).unwrap();
        store.add_task(NewTask::new("Scratch", "todo"));
        assert_eq!(store.tasks().len(), 4);
        store.clear();
        assert_eq!(store.tasks().len(), 3);
    }

    let store = BoardStore::open(&config).unwrap();
    assert_eq!(store.tasks().len(), 3);
    assert!(store.tasks().iter().all(|t| t.title != "Scratch"));
}

#[test]
fn test_free_plan_limits_then_upgrade() {
    let temp_dir = TempDir::new().unwrap();
    let backend = RedbBackend::open(temp_dir.path().join("board.redb")).unwrap();
    let mut store = BoardStore::load(backend, STORAGE_KEY);

    assert!(store
        .try_add_task(NewTask::new("Fourth", "todo"))
        .allowed()
        .is_some());
    assert!(store
        .try_add_task(NewTask::new("Fifth", "todo"))
        .is_upgrade_required());
    assert!(store
        .try_add_column(NewColumn::new("Backlog"))
        .is_upgrade_required());
    assert_eq!(store.tasks().len(), 4);

    go_pro(&mut store);

    assert!(matches!(
        store.try_add_task(NewTask::new("Fifth", "todo")),
        Gated::Allowed(_)
    ));
    assert!(matches!(
        store.try_add_task(NewTask::new("   ", "todo")),
        Gated::Skipped
    ));
    assert!(store
        .try_add_column(NewColumn::new("Backlog"))
        .allowed()
        .is_some());
}

#[test]
fn test_drag_across_columns_then_delete_column() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let mut store = BoardStore::open(&config).unwrap();
    go_pro(&mut store);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |state| sink.lock().unwrap().push(state.tasks.len()));

    let review = store.add_column(NewColumn::new("Review"));
    let mut drag = DragController::new();

    assert!(drag
        .drag_start(&store, DragItem::Task("t1".to_string()))
        .is_some());
    let outcome = drag.drag_end(&mut store, Some(DragItem::Column(review.clone())));
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            task_id: "t1".to_string(),
            from: "todo".to_string(),
            to: review.clone(),
        }
    );

    // Dropping onto a task adopts that task's column
    drag.drag_start(&store, DragItem::Task("t2".to_string()));
    drag.drag_end(&mut store, Some(DragItem::Task("t1".to_string())));
    assert_eq!(store.state().task("t2").unwrap().column_id, review);

    assert!(store.update_task(
        "t3",
        &TaskUpdate {
            title: Some("Setup CI".to_string()),
            ..TaskUpdate::default()
        }
    ));

    assert_eq!(store.delete_column("done"), ColumnRemoval::Protected);
    assert_eq!(
        store.delete_column(&review),
        ColumnRemoval::Removed { tasks_removed: 2 }
    );
    assert_eq!(store.tasks().len(), 1);

    drop(store);
    let reopened = BoardStore::open(&config).unwrap();
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.state().task("t3").unwrap().title, "Setup CI");

    // add column, two moves, update, delete column
    assert_eq!(seen.lock().unwrap().len(), 5);
}
