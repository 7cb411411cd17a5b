use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::goals::Goal;
use crate::projection::projection_model::{
    BalancePoint, GoalProgressPoint, PaymentFlow, ProjectedPayment,
};
use crate::recurring::Frequency;

/// Occurrence multipliers approximating how often each cadence fires within
/// one calendar month. Deliberately approximate (4.33 weeks per month, 30
/// days per month) rather than a simulation of exact calendar dates.
const DAILY_PER_MONTH: Decimal = dec!(30);
const WEEKLY_PER_MONTH: Decimal = dec!(4.33);
const BIWEEKLY_PER_MONTH: Decimal = dec!(2.17);

/// The goal-progress walk never looks further ahead than a year.
const MAX_PROJECTION_DAYS: u64 = 365;

fn monthly_occurrences(payment: &ProjectedPayment, month_index: u32, month: u32) -> Decimal {
    match payment.frequency {
        Frequency::Daily => DAILY_PER_MONTH,
        Frequency::Weekly => WEEKLY_PER_MONTH,
        Frequency::Biweekly => BIWEEKLY_PER_MONTH,
        Frequency::Monthly => Decimal::ONE,
        // Quarterly and yearly cadences fire in full on their qualifying
        // months and skip the rest.
        Frequency::Quarterly => {
            if month_index % 3 == 0 {
                Decimal::ONE
            } else {
                Decimal::ZERO
            }
        }
        Frequency::Yearly => {
            if month == payment.anchor_date.month() {
                Decimal::ONE
            } else {
                Decimal::ZERO
            }
        }
    }
}

/// Projects the free balance forward month by month. Point 0 is the current
/// balance at `start`; each subsequent point nets that month's inflows
/// against its outflows. Every emitted value is rounded to two decimal
/// places.
pub fn project_balance(
    current_balance: Decimal,
    payments: &[ProjectedPayment],
    months: u32,
    start: NaiveDate,
) -> Vec<BalancePoint> {
    let mut series = Vec::with_capacity(months as usize + 1);
    series.push(BalancePoint {
        month_label: start.format("%b %Y").to_string(),
        projected_balance: current_balance.round_dp(2),
    });

    let mut running = current_balance;
    for month_index in 1..=months {
        let month_date = start
            .checked_add_months(Months::new(month_index))
            .unwrap_or(start);

        let net: Decimal = payments
            .iter()
            .map(|payment| {
                let gross =
                    payment.amount * monthly_occurrences(payment, month_index, month_date.month());
                match payment.flow {
                    PaymentFlow::Inflow => gross,
                    PaymentFlow::Outflow => -gross,
                }
            })
            .sum();

        running += net;
        series.push(BalancePoint {
            month_label: month_date.format("%b %Y").to_string(),
            projected_balance: running.round_dp(2),
        });
    }

    series
}

fn percent_complete(current: Decimal, target: Decimal) -> Decimal {
    if target.is_zero() {
        return dec!(100);
    }
    (current / target * dec!(100)).round_dp(2)
}

/// Walks a goal forward day by day, applying each schedule on its cadence,
/// until the goal reaches 100% or the one-year horizon ends. Unlike
/// `project_balance` this follows real calendar dates. A schedule anchored
/// at or before `start` begins one cadence step later.
pub fn create_goal_series(
    goal: &Goal,
    payments: &[ProjectedPayment],
    start: NaiveDate,
) -> Vec<GoalProgressPoint> {
    let mut current = goal.current_amount;
    let mut points = vec![GoalProgressPoint {
        date: start,
        percent: percent_complete(current, goal.target_amount),
    }];

    if goal.is_funded() || payments.is_empty() {
        return points;
    }

    // Align each schedule's next due date to just past the horizon start.
    let mut next_due: Vec<(NaiveDate, &ProjectedPayment)> = payments
        .iter()
        .map(|payment| {
            let mut due = payment.anchor_date;
            while due <= start {
                let advanced = payment.frequency.advance_date(due);
                if advanced <= due {
                    break;
                }
                due = advanced;
            }
            (due, payment)
        })
        .collect();

    for day in 1..=MAX_PROJECTION_DAYS {
        let date = match start.checked_add_days(Days::new(day)) {
            Some(date) => date,
            None => break,
        };

        let mut fired = false;
        for (due, payment) in next_due.iter_mut() {
            if *due == date {
                current = (current + payment.amount).min(goal.target_amount);
                fired = true;

                let advanced = payment.frequency.advance_date(*due);
                if advanced > *due {
                    *due = advanced;
                }
            }
        }

        if fired {
            points.push(GoalProgressPoint {
                date,
                percent: percent_complete(current, goal.target_amount),
            });
            if current >= goal.target_amount {
                break;
            }
        }
    }

    points
}
