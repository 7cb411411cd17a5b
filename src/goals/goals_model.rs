use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::errors::ValidationError;
use crate::utils::parse_decimal_tolerant;

/// Domain model representing a savings goal. `current_amount` is the pool
/// earmarked out of the user's free balance; only the funding coordinator
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// How much the goal can still absorb before hitting its target.
    pub fn remaining_capacity(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    pub fn is_funded(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return dec!(100);
        }
        (self.current_amount / self.target_amount * dec!(100)).round_dp(2)
    }
}

/// Database model for goals
#[derive(
    Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: String,
    pub current_amount: String,
    pub category_emoji: Option<String>,
    pub category_name: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Input model for creating a new goal. The category accepts the structured
/// form's string rendering as well as the legacy "emoji|name" tag.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub category: String,
}

impl NewGoal {
    pub fn validate(&self) -> crate::Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(
                "Goal target amount must be positive".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Input model for editing a goal's title or category. The target is fixed
/// at creation and the current amount belongs to the funding coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub category: String,
}

impl GoalUpdate {
    pub fn validate(&self) -> crate::Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        Ok(())
    }
}

// Conversion implementations
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            target_amount: parse_decimal_tolerant(&db.target_amount, "goal target amount"),
            current_amount: parse_decimal_tolerant(&db.current_amount, "goal current amount"),
            category: Category::new(db.category_emoji, db.category_name),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

impl From<NewGoal> for GoalDB {
    fn from(domain: NewGoal) -> Self {
        let now = Utc::now().naive_utc();
        let category = Category::parse(&domain.category);

        Self {
            id: domain.id.unwrap_or_default(),
            user_id: domain.user_id,
            title: domain.title,
            target_amount: domain.target_amount.to_string(),
            current_amount: Decimal::ZERO.to_string(),
            category_emoji: category.emoji,
            category_name: category.name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: Decimal, current: Decimal) -> Goal {
        Goal {
            id: "g-1".to_string(),
            user_id: "u-1".to_string(),
            title: "Vacation".to_string(),
            target_amount: target,
            current_amount: current,
            category: Category::new(None, "Travel"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn progress_is_rounded_to_two_places() {
        let goal = goal(dec!(300), dec!(100));
        assert_eq!(goal.progress_percent(), dec!(33.33));
    }

    #[test]
    fn funded_goal_has_no_remaining_capacity() {
        let goal = goal(dec!(100), dec!(100));
        assert!(goal.is_funded());
        assert_eq!(goal.remaining_capacity(), Decimal::ZERO);
    }
}
