use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::ledger::ledger_constants::*;
use crate::recurring::Frequency;
use crate::utils::{parse_datetime_string, parse_decimal_tolerant};

/// Whether a transaction adds to or subtracts from the derived balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => TRANSACTION_KIND_DEPOSIT,
            TransactionKind::Withdrawal => TRANSACTION_KIND_WITHDRAWAL,
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TRANSACTION_KIND_DEPOSIT => Ok(TransactionKind::Deposit),
            TRANSACTION_KIND_WITHDRAWAL => Ok(TransactionKind::Withdrawal),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

/// Optional recurrence descriptor carried by a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub frequency: Frequency,
    pub custom_interval: Option<i32>,
}

/// Domain model representing one ledger entry. Immutable once created;
/// edits go through the explicit update operation, never the funding flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub recurrence: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for ledger entries
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub category: String,
    pub amount: String,
    pub transaction_date: chrono::NaiveDateTime,
    pub frequency: Option<String>,
    pub custom_interval: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Input model for recording a new transaction
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub transaction_date: String,
    pub frequency: Option<String>,
    pub custom_interval: Option<i32>,
}

impl NewTransaction {
    pub fn validate(&self) -> crate::Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if TransactionKind::from_str(&self.kind).is_err() {
            return Err(ValidationError::InvalidInput(format!(
                "Unknown transaction kind: {}",
                self.kind
            ))
            .into());
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(
                "Transaction amount must be positive".to_string(),
            )
            .into());
        }
        if parse_datetime_string(&self.transaction_date).is_none() {
            return Err(ValidationError::InvalidInput(format!(
                "Invalid date format: {}. Expected ISO 8601/RFC3339 or YYYY-MM-DD",
                self.transaction_date
            ))
            .into());
        }
        Ok(())
    }
}

/// Input model for editing an existing transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub transaction_date: String,
    pub frequency: Option<String>,
    pub custom_interval: Option<i32>,
}

impl TransactionUpdate {
    pub fn validate(&self) -> crate::Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        let as_new = NewTransaction {
            id: Some(self.id.clone()),
            user_id: self.user_id.clone(),
            kind: self.kind.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            amount: self.amount,
            transaction_date: self.transaction_date.clone(),
            frequency: self.frequency.clone(),
            custom_interval: self.custom_interval,
        };
        as_new.validate()
    }
}

/// Folds ledger entries into a balance: deposits add, withdrawals subtract.
/// The result is independent of the order entries are visited in.
pub fn fold_balance<I>(entries: I) -> Decimal
where
    I: IntoIterator<Item = (TransactionKind, Decimal)>,
{
    entries
        .into_iter()
        .fold(Decimal::ZERO, |total, (kind, amount)| match kind {
            TransactionKind::Deposit => total + amount,
            TransactionKind::Withdrawal => total - amount,
        })
}

// Conversion implementations
impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let kind = TransactionKind::from_str(&db.kind).unwrap_or_else(|e| {
            // The kind column carries a CHECK constraint, so this only
            // happens on hand-edited data.
            log::error!("{}; treating transaction {} as a deposit", e, db.id);
            TransactionKind::Deposit
        });
        let recurrence = db.frequency.as_deref().map(|raw| Recurrence {
            frequency: Frequency::from_str_lenient(raw),
            custom_interval: db.custom_interval,
        });

        Self {
            id: db.id.clone(),
            user_id: db.user_id,
            kind,
            title: db.title,
            category: db.category,
            amount: parse_decimal_tolerant(&db.amount, "transaction amount"),
            transaction_date: DateTime::from_naive_utc_and_offset(db.transaction_date, Utc),
            recurrence,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = Utc::now().naive_utc();
        let transaction_date = parse_datetime_string(&domain.transaction_date).unwrap_or_else(|| {
            log::error!(
                "Failed to parse transaction date '{}'; falling back to now",
                domain.transaction_date
            );
            now
        });

        Self {
            id: domain.id.unwrap_or_default(),
            user_id: domain.user_id,
            kind: domain.kind,
            title: domain.title,
            category: domain.category,
            amount: domain.amount.to_string(),
            transaction_date,
            frequency: domain.frequency,
            custom_interval: domain.custom_interval,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<TransactionUpdate> for TransactionDB {
    fn from(domain: TransactionUpdate) -> Self {
        let now = Utc::now().naive_utc();
        let transaction_date = parse_datetime_string(&domain.transaction_date).unwrap_or_else(|| {
            log::error!(
                "Failed to parse transaction date '{}'; falling back to now",
                domain.transaction_date
            );
            now
        });

        Self {
            id: domain.id,
            user_id: domain.user_id,
            kind: domain.kind,
            title: domain.title,
            category: domain.category,
            amount: domain.amount.to_string(),
            transaction_date,
            frequency: domain.frequency,
            custom_interval: domain.custom_interval,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fold_balance_nets_deposits_and_withdrawals() {
        let entries = vec![
            (TransactionKind::Deposit, dec!(100)),
            (TransactionKind::Withdrawal, dec!(30)),
            (TransactionKind::Deposit, dec!(5.50)),
        ];
        assert_eq!(fold_balance(entries), dec!(75.50));
    }

    proptest! {
        #[test]
        fn fold_balance_is_order_independent(
            cents in proptest::collection::vec((any::<bool>(), 0u64..1_000_000), 0..50),
            rotation in 0usize..50,
        ) {
            let entries: Vec<(TransactionKind, Decimal)> = cents
                .iter()
                .map(|(is_deposit, c)| {
                    let kind = if *is_deposit {
                        TransactionKind::Deposit
                    } else {
                        TransactionKind::Withdrawal
                    };
                    (kind, Decimal::new(*c as i64, 2))
                })
                .collect();

            let mut rotated = entries.clone();
            if !rotated.is_empty() {
                let len = rotated.len();
                rotated.rotate_left(rotation % len);
            }

            prop_assert_eq!(fold_balance(entries), fold_balance(rotated));
        }
    }
}
