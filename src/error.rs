use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid id: {0}")]
    InvalidId(i32),

    #[error("Task not found for id: {0}")]
    NotFound(u32),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}
