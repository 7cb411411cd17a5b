use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for recurring payment operations
#[derive(Debug, Error)]
pub enum RecurringError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<DieselError> for RecurringError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => {
                RecurringError::NotFound("Recurring payment not found".to_string())
            }
            _ => RecurringError::Database(err.to_string()),
        }
    }
}
