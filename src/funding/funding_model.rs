use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::Goal;

/// Result of a contribute call: the goal after the applied delta, and the
/// free balance recomputed in the same transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionOutcome {
    pub goal: Goal,
    pub balance: Decimal,
}

/// Result of deleting a goal. `refunded_amount` is zero when the goal held
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDeletionOutcome {
    pub refunded_amount: Decimal,
    pub balance: Decimal,
}

/// Result of materializing due recurring contributions for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuePaymentsSummary {
    pub applied: usize,
    pub skipped: usize,
    pub balance: Decimal,
}
