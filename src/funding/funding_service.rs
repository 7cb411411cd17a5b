use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db::WriteHandle;
use crate::errors::{Result, ValidationError};
use crate::funding::funding_errors::FundingError;
use crate::funding::funding_model::{
    ContributionOutcome, DuePaymentsSummary, GoalDeletionOutcome,
};
use crate::funding::funding_traits::FundingServiceTrait;
use crate::goals::goals_repository::{
    delete_goal_on_conn, find_goal_on_conn, set_current_amount_on_conn,
};
use crate::goals::Goal;
use crate::ledger::ledger_repository::{balance_on_conn, insert_transaction_on_conn};
use crate::ledger::{TransactionDB, TransactionKind};
use crate::recurring::recurring_repository::{
    delete_for_goal_on_conn, due_payments_on_conn, set_next_payment_date_on_conn,
};
use crate::recurring::RecurringPayment;

/// The goal-funding coordinator. Bridges the ledger and the goal store:
/// every money movement between them runs as one job on the single-writer
/// actor, so the balance read, the goal update and the offsetting ledger
/// entry commit or roll back together.
pub struct FundingService {
    writer: WriteHandle,
}

impl FundingService {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

fn contribution_title(goal_title: &str) -> String {
    format!("Contribution to goal: {}", goal_title)
}

fn goal_withdrawal_title(goal_title: &str) -> String {
    format!("Withdrawal from goal: {}", goal_title)
}

fn refund_title(goal_title: &str) -> String {
    format!("Refund from deleted goal: {}", goal_title)
}

fn scheduled_contribution_title(goal_title: &str) -> String {
    format!("Scheduled contribution to goal: {}", goal_title)
}

/// Builds the ledger entry that offsets a goal mutation. A positive delta
/// means money left the free balance, so the entry is a withdrawal; a
/// negative delta is a refund deposit.
fn offsetting_entry(user_id: &str, category_name: &str, title: String, delta: Decimal) -> TransactionDB {
    let now = Utc::now().naive_utc();
    let kind = if delta > Decimal::ZERO {
        TransactionKind::Withdrawal
    } else {
        TransactionKind::Deposit
    };
    TransactionDB {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        kind: kind.as_str().to_string(),
        title,
        category: category_name.to_string(),
        amount: delta.abs().to_string(),
        transaction_date: now,
        frequency: None,
        custom_interval: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait::async_trait]
impl FundingServiceTrait for FundingService {
    async fn contribute(
        &self,
        for_user_id: &str,
        goal_id: &str,
        amount: Decimal,
    ) -> Result<ContributionOutcome> {
        if amount.is_zero() {
            return Err(ValidationError::InvalidAmount(
                "Contribution amount cannot be zero".to_string(),
            )
            .into());
        }

        let for_user_id = for_user_id.to_string();
        let goal_id = goal_id.to_string();

        self.writer
            .exec(move |conn| {
                let mut goal = Goal::from(find_goal_on_conn(conn, &for_user_id, &goal_id)?);
                let balance = balance_on_conn(conn, &for_user_id)?;

                let applied = if amount > Decimal::ZERO {
                    if balance < amount {
                        return Err(FundingError::InsufficientBalance {
                            available: balance,
                            requested: amount,
                        }
                        .into());
                    }
                    // Never overshoot the target: the excess simply stays
                    // in the free balance.
                    amount.min(goal.remaining_capacity())
                } else {
                    if goal.current_amount < amount.abs() {
                        return Err(FundingError::InsufficientGoalFunds {
                            available: goal.current_amount,
                            requested: amount.abs(),
                        }
                        .into());
                    }
                    amount
                };

                if applied.is_zero() {
                    // Goal already funded; nothing moves.
                    debug!("Goal {} is fully funded; contribution skipped", goal.id);
                    return Ok(ContributionOutcome { goal, balance });
                }

                goal.current_amount += applied;
                set_current_amount_on_conn(conn, &goal.id, &goal.current_amount)?;

                let title = if applied > Decimal::ZERO {
                    contribution_title(&goal.title)
                } else {
                    goal_withdrawal_title(&goal.title)
                };
                insert_transaction_on_conn(
                    conn,
                    offsetting_entry(&for_user_id, &goal.category.name, title, applied),
                )?;

                goal.updated_at = Utc::now();
                Ok(ContributionOutcome {
                    goal,
                    balance: balance - applied,
                })
            })
            .await
    }

    async fn delete_goal(&self, for_user_id: &str, goal_id: &str) -> Result<GoalDeletionOutcome> {
        let for_user_id = for_user_id.to_string();
        let goal_id = goal_id.to_string();

        self.writer
            .exec(move |conn| {
                let goal = Goal::from(find_goal_on_conn(conn, &for_user_id, &goal_id)?);
                let balance = balance_on_conn(conn, &for_user_id)?;

                let removed = delete_for_goal_on_conn(conn, &goal.id)?;
                debug!("Removed {} recurring schedule(s) for goal {}", removed, goal.id);

                let refunded_amount = goal.current_amount;
                if refunded_amount > Decimal::ZERO {
                    insert_transaction_on_conn(
                        conn,
                        offsetting_entry(
                            &for_user_id,
                            &goal.category.name,
                            refund_title(&goal.title),
                            -refunded_amount,
                        ),
                    )?;
                }

                delete_goal_on_conn(conn, &goal.id)?;

                Ok(GoalDeletionOutcome {
                    refunded_amount,
                    balance: balance + refunded_amount,
                })
            })
            .await
    }

    async fn process_due_payments(
        &self,
        for_user_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<DuePaymentsSummary> {
        let for_user_id = for_user_id.to_string();

        self.writer
            .exec(move |conn| {
                let due = due_payments_on_conn(conn, &for_user_id, as_of.naive_utc())?;
                let mut balance = balance_on_conn(conn, &for_user_id)?;
                let mut applied = 0usize;
                let mut skipped = 0usize;

                for row in due {
                    let payment = RecurringPayment::from(row);
                    let mut goal =
                        Goal::from(find_goal_on_conn(conn, &for_user_id, &payment.goal_id)?);

                    // A schedule may be overdue several periods; catch up
                    // one cadence step at a time.
                    let mut next = payment.next_payment_date;
                    while next <= as_of {
                        let delta = payment.amount.min(goal.remaining_capacity());
                        if !delta.is_zero() && balance >= delta {
                            goal.current_amount += delta;
                            set_current_amount_on_conn(conn, &goal.id, &goal.current_amount)?;
                            insert_transaction_on_conn(
                                conn,
                                offsetting_entry(
                                    &for_user_id,
                                    &goal.category.name,
                                    scheduled_contribution_title(&goal.title),
                                    delta,
                                ),
                            )?;
                            balance -= delta;
                            applied += 1;
                        } else {
                            debug!(
                                "Skipping scheduled contribution of {} to goal {}: {}",
                                payment.amount,
                                goal.id,
                                if delta.is_zero() {
                                    "goal fully funded"
                                } else {
                                    "insufficient balance"
                                }
                            );
                            skipped += 1;
                        }

                        let advanced = payment.frequency.advance_datetime(next);
                        if advanced <= next {
                            break;
                        }
                        next = advanced;
                    }

                    set_next_payment_date_on_conn(conn, &payment.id, next.naive_utc())?;
                }

                Ok(DuePaymentsSummary {
                    applied,
                    skipped,
                    balance,
                })
            })
            .await
    }
}
