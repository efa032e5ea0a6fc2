use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::AppError;
use crate::models::{Task, TaskPriority, TaskStatus};

const DELIMITER: &str = ";";
const FIELD_COUNT: usize = 8;

/// Persistence boundary for the full task set.
pub trait TaskStorage {
    /// Writes all tasks, fully replacing any existing content.
    fn save_all(&self, tasks: &[Task]) -> Result<(), AppError>;

    /// Reads all tasks. A missing backing file yields an empty collection.
    fn load_all(&self) -> Result<Vec<Task>, AppError>;
}

/// Line-oriented text file storage. One record per line:
///
/// `id;title;description;STATUS;PRIORITY;yyyy-mm-dd;createdAt;updatedAt`
///
/// Timestamps are RFC 3339. Fields are joined raw, so a delimiter inside
/// title or description corrupts the row layout on reload.
pub struct FileTaskStorage {
    path: PathBuf,
}

impl FileTaskStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskStorage for FileTaskStorage {
    fn save_all(&self, tasks: &[Task]) -> Result<(), AppError> {
        let mut contents = String::new();
        for task in tasks {
            contents.push_str(&encode(task));
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Task>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        contents.lines().map(decode).collect()
    }
}

fn encode(task: &Task) -> String {
    [
        task.id.unwrap_or(0).to_string(),
        task.title.clone(),
        task.description.clone(),
        task.status.to_string(),
        task.priority.to_string(),
        task.due_date.to_string(),
        task.created_at.to_rfc3339(),
        task.updated_at.to_rfc3339(),
    ]
    .join(DELIMITER)
}

fn decode(line: &str) -> Result<Task, AppError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(AppError::Parse(format!(
            "Expected {FIELD_COUNT} fields but found {} in row: {line}",
            fields.len()
        )));
    }

    let raw_id: u32 = fields[0]
        .parse()
        .map_err(|_| AppError::Parse(format!("Bad task id: {}", fields[0])))?;
    let status = TaskStatus::from_str(fields[3])?;
    let priority = TaskPriority::from_str(fields[4])?;
    let due_date = NaiveDate::from_str(fields[5])
        .map_err(|_| AppError::Parse(format!("Bad due date: {}", fields[5])))?;

    Ok(Task {
        // Id 0 on disk marks a task that was never assigned one.
        id: (raw_id > 0).then_some(raw_id),
        title: fields[1].to_string(),
        description: fields[2].to_string(),
        status,
        priority,
        due_date,
        created_at: parse_timestamp(fields[6])?,
        updated_at: parse_timestamp(fields[7])?,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| AppError::Parse(format!("Bad timestamp: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_fixed_field_order() {
        let mut task = Task::new(
            "Buy milk".to_string(),
            "From the corner store".to_string(),
            TaskStatus::Todo,
            TaskPriority::High,
            "2025-01-10".parse().expect("Failed to parse date"),
        );
        task.id = Some(3);

        let line = encode(&task);
        let fields: Vec<&str> = line.split(';').collect();
        assert_eq!(fields.len(), FIELD_COUNT);
        assert_eq!(fields[0], "3");
        assert_eq!(fields[1], "Buy milk");
        assert_eq!(fields[2], "From the corner store");
        assert_eq!(fields[3], "TODO");
        assert_eq!(fields[4], "HIGH");
        assert_eq!(fields[5], "2025-01-10");
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        let err = decode("1;only;four;fields").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_decode_rejects_unknown_enum_name() {
        let line = "1;Title;Desc;STARTED;HIGH;2025-01-10;\
                    2025-01-01T09:00:00+00:00;2025-01-01T09:00:00+00:00";
        let err = decode(line).unwrap_err();
        assert!(err.to_string().contains("STARTED"));
    }

    #[test]
    fn test_decode_rejects_malformed_date() {
        let line = "1;Title;Desc;TODO;HIGH;tomorrow;\
                    2025-01-01T09:00:00+00:00;2025-01-01T09:00:00+00:00";
        let err = decode(line).unwrap_err();
        assert!(err.to_string().contains("tomorrow"));
    }
}
