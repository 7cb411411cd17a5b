use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::errors::ValidationError;
use crate::utils::{parse_datetime_string, parse_decimal_tolerant};

/// How often a recurring contribution fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Biweekly => "BIWEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Quarterly => "QUARTERLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency tag. Unrecognized values fall back to monthly
    /// rather than erroring, matching what older clients already rely on.
    pub fn from_str_lenient(raw: &str) -> Frequency {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "DAILY" => Frequency::Daily,
            "WEEKLY" => Frequency::Weekly,
            "BIWEEKLY" => Frequency::Biweekly,
            "MONTHLY" => Frequency::Monthly,
            "QUARTERLY" => Frequency::Quarterly,
            "YEARLY" | "ANNUALLY" => Frequency::Yearly,
            _ => {
                log::debug!("Unrecognized frequency '{}'; defaulting to monthly", raw);
                Frequency::Monthly
            }
        }
    }

    /// Next occurrence after `date` on this cadence.
    pub fn advance_date(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => date.checked_add_days(Days::new(1)),
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Biweekly => date.checked_add_days(Days::new(14)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
            Frequency::Quarterly => date.checked_add_months(Months::new(3)),
            Frequency::Yearly => date.checked_add_months(Months::new(12)),
        }
        .unwrap_or(date)
    }

    /// Next occurrence after `moment` on this cadence.
    pub fn advance_datetime(&self, moment: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Frequency::Daily => moment.checked_add_days(Days::new(1)),
            Frequency::Weekly => moment.checked_add_days(Days::new(7)),
            Frequency::Biweekly => moment.checked_add_days(Days::new(14)),
            Frequency::Monthly => moment.checked_add_months(Months::new(1)),
            Frequency::Quarterly => moment.checked_add_months(Months::new(3)),
            Frequency::Yearly => moment.checked_add_months(Months::new(12)),
        }
        .unwrap_or(moment)
    }
}

/// Domain model for a recurring contribution schedule tied to a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPayment {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub next_payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read model annotating a schedule with its owning goal, for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPaymentDetails {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub next_payment_date: DateTime<Utc>,
    pub goal_title: String,
    pub goal_category: Category,
}

/// Database model for recurring payments
#[derive(
    Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::recurring_payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecurringPaymentDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: String,
    pub frequency: String,
    pub next_payment_date: chrono::NaiveDateTime,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Input model for scheduling a recurring contribution. When no first
/// payment date is supplied, the schedule starts one cadence step from now.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringPayment {
    pub id: Option<String>,
    pub goal_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub frequency: String,
    pub next_payment_date: Option<String>,
}

impl NewRecurringPayment {
    pub fn validate(&self) -> crate::Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if self.goal_id.trim().is_empty() {
            return Err(ValidationError::MissingField("goalId".to_string()).into());
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(
                "Recurring payment amount must be positive".to_string(),
            )
            .into());
        }
        if let Some(raw) = &self.next_payment_date {
            if parse_datetime_string(raw).is_none() {
                return Err(ValidationError::InvalidInput(format!(
                    "Invalid date format: {}. Expected ISO 8601/RFC3339 or YYYY-MM-DD",
                    raw
                ))
                .into());
            }
        }
        Ok(())
    }
}

// Conversion implementations
impl From<RecurringPaymentDB> for RecurringPayment {
    fn from(db: RecurringPaymentDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            user_id: db.user_id,
            amount: parse_decimal_tolerant(&db.amount, "recurring payment amount"),
            frequency: Frequency::from_str_lenient(&db.frequency),
            next_payment_date: DateTime::from_naive_utc_and_offset(db.next_payment_date, Utc),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

impl From<NewRecurringPayment> for RecurringPaymentDB {
    fn from(domain: NewRecurringPayment) -> Self {
        let now = Utc::now().naive_utc();
        let frequency = Frequency::from_str_lenient(&domain.frequency);
        let next_payment_date = domain
            .next_payment_date
            .as_deref()
            .and_then(parse_datetime_string)
            .unwrap_or_else(|| {
                frequency
                    .advance_datetime(DateTime::from_naive_utc_and_offset(now, Utc))
                    .naive_utc()
            });

        Self {
            id: domain.id.unwrap_or_default(),
            goal_id: domain.goal_id,
            user_id: domain.user_id,
            amount: domain.amount.to_string(),
            frequency: frequency.as_str().to_string(),
            next_payment_date,
            created_at: now,
            updated_at: now,
        }
    }
}
