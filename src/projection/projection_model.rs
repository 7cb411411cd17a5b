use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recurring::{Frequency, RecurringPayment};

/// Direction of a projected cash flow relative to the free balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentFlow {
    Inflow,
    Outflow,
}

/// A repeating cash flow fed into the projection engine. Goal contribution
/// schedules project as outflows; callers can also feed expected income or
/// expenses that never touch a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPayment {
    pub amount: Decimal,
    pub frequency: Frequency,
    pub flow: PaymentFlow,
    pub anchor_date: NaiveDate,
}

impl From<&RecurringPayment> for ProjectedPayment {
    fn from(payment: &RecurringPayment) -> Self {
        Self {
            amount: payment.amount,
            frequency: payment.frequency,
            flow: PaymentFlow::Outflow,
            anchor_date: payment.next_payment_date.date_naive(),
        }
    }
}

/// One point of the projected-balance series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    pub month_label: String,
    pub projected_balance: Decimal,
}

/// One point of the goal-progress timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressPoint {
    pub date: NaiveDate,
    pub percent: Decimal,
}
