use rust_decimal::Decimal;
use thiserror::Error;

/// Business-rule violations raised by the goal-funding coordinator. These
/// are ordinary, expected outcomes, not fatal conditions.
#[derive(Debug, Error)]
pub enum FundingError {
    #[error("Insufficient balance: {requested} requested, {available} available")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Insufficient goal funds: {requested} requested, {available} earmarked")]
    InsufficientGoalFunds {
        available: Decimal,
        requested: Decimal,
    },
}
