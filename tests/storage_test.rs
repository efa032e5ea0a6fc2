use std::fs;

use tempfile::tempdir;

use task_manager::error::AppError;
use task_manager::models::{Task, TaskPriority, TaskStatus};
use task_manager::storage::{FileTaskStorage, TaskStorage};

fn task(id: u32, title: &str, due: &str) -> Task {
    let mut task = Task::new(
        title.to_string(),
        format!("{title} description"),
        TaskStatus::Todo,
        TaskPriority::Medium,
        due.parse().expect("Failed to parse date"),
    );
    task.id = Some(id);
    task
}

#[test]
fn test_load_missing_file_returns_empty_collection() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = FileTaskStorage::new(dir.path().join("fileStorage.txt"));

    let tasks = storage.load_all().expect("Failed to load tasks");
    assert!(tasks.is_empty());
}

#[test]
fn test_save_then_load_round_trips_field_for_field() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = FileTaskStorage::new(dir.path().join("fileStorage.txt"));

    let mut second = task(2, "Water plants", "2025-03-01");
    second.set_status(TaskStatus::InProgress);
    second.set_priority(TaskPriority::High);
    let tasks = vec![task(1, "Buy milk", "2025-01-10"), second];

    storage.save_all(&tasks).expect("Failed to save tasks");
    let loaded = storage.load_all().expect("Failed to load tasks");

    assert_eq!(loaded, tasks);
}

#[test]
fn test_save_fully_replaces_previous_content() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = FileTaskStorage::new(dir.path().join("fileStorage.txt"));

    storage
        .save_all(&[task(1, "Old", "2025-01-10")])
        .expect("Failed to save tasks");

    // Saving an empty set erases the prior content without error.
    storage.save_all(&[]).expect("Failed to save empty set");
    let loaded = storage.load_all().expect("Failed to load tasks");
    assert!(loaded.is_empty());
}

#[test]
fn test_reads_fixed_record_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fileStorage.txt");
    fs::write(
        &path,
        "3;Buy milk;From the corner store;IN_PROGRESS;HIGH;2025-01-10;\
         2025-01-01T09:00:00+00:00;2025-01-02T10:30:00+00:00\n",
    )
    .expect("Failed to write fixture");

    let storage = FileTaskStorage::new(path);
    let loaded = storage.load_all().expect("Failed to load tasks");

    assert_eq!(loaded.len(), 1);
    let task = &loaded[0];
    assert_eq!(task.id, Some(3));
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "From the corner store");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.due_date.to_string(), "2025-01-10");
    assert_eq!(task.created_at.to_rfc3339(), "2025-01-01T09:00:00+00:00");
    assert_eq!(task.updated_at.to_rfc3339(), "2025-01-02T10:30:00+00:00");
}

#[test]
fn test_delimiter_in_title_corrupts_the_row() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = FileTaskStorage::new(dir.path().join("fileStorage.txt"));

    storage
        .save_all(&[task(1, "Buy milk; and eggs", "2025-01-10")])
        .expect("Failed to save tasks");

    // The extra delimiter shifts every later field, so the row no longer
    // splits into the fixed layout and loading reports a parse error.
    let err = storage.load_all().unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
}
