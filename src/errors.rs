use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::funding::FundingError;
use crate::goals::GoalError;
use crate::ledger::LedgerError;
use crate::recurring::RecurringError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger and goal-funding engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Goal error: {0}")]
    Goal(#[from] GoalError),

    #[error("Recurring payment error: {0}")]
    Recurring(#[from] RecurringError),

    #[error("Funding error: {0}")]
    Funding(#[from] FundingError),
}

impl Error {
    /// Stable error category, consumed by the API layer when shaping
    /// the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Database(_) => "STORAGE_FAILURE",
            Error::Validation(ValidationError::InvalidAmount(_)) => "INVALID_AMOUNT",
            Error::Validation(_) => "INVALID_INPUT",
            Error::Ledger(LedgerError::NotFound(_)) => "NOT_FOUND",
            Error::Ledger(LedgerError::InvalidData(_)) => "INVALID_INPUT",
            Error::Ledger(LedgerError::Database(_)) => "STORAGE_FAILURE",
            Error::Goal(GoalError::NotFound(_)) => "NOT_FOUND",
            Error::Goal(GoalError::InvalidData(_)) => "INVALID_INPUT",
            Error::Goal(GoalError::Database(_)) => "STORAGE_FAILURE",
            Error::Recurring(RecurringError::NotFound(_)) => "NOT_FOUND",
            Error::Recurring(RecurringError::InvalidData(_)) => "INVALID_INPUT",
            Error::Recurring(RecurringError::Database(_)) => "STORAGE_FAILURE",
            Error::Funding(FundingError::InsufficientBalance { .. }) => "INSUFFICIENT_BALANCE",
            Error::Funding(FundingError::InsufficientGoalFunds { .. }) => {
                "INSUFFICIENT_GOAL_FUNDS"
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// Implement From for DieselError to Error directly
impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        Error::Database(DatabaseError::QueryFailed(err))
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::Database(DatabaseError::PoolCreationFailed(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
