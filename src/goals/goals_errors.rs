use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for goal operations
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<DieselError> for GoalError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => GoalError::NotFound("Goal not found".to_string()),
            _ => GoalError::Database(err.to_string()),
        }
    }
}
