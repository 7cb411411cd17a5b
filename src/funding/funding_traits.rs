use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::funding::funding_model::{ContributionOutcome, DuePaymentsSummary, GoalDeletionOutcome};

/// Trait for the goal-funding coordinator: every operation that moves money
/// between the free balance and a goal's earmarked pool.
#[async_trait::async_trait]
pub trait FundingServiceTrait: Send + Sync {
    /// Moves `amount` into the goal (positive) or back out of it (negative),
    /// recording the offsetting ledger entry atomically.
    async fn contribute(
        &self,
        for_user_id: &str,
        goal_id: &str,
        amount: Decimal,
    ) -> Result<ContributionOutcome>;

    /// Deletes a goal, cascading its schedules and refunding any earmarked
    /// amount back to the free balance.
    async fn delete_goal(&self, for_user_id: &str, goal_id: &str) -> Result<GoalDeletionOutcome>;

    /// Materializes every recurring contribution due at or before `as_of`.
    async fn process_due_payments(
        &self,
        for_user_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<DuePaymentsSummary>;
}
