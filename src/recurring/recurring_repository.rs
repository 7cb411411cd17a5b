use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::categories::Category;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::goals::goals_repository::find_goal_on_conn;
use crate::recurring::recurring_errors::RecurringError;
use crate::recurring::recurring_model::*;
use crate::recurring::recurring_traits::RecurringPaymentRepositoryTrait;
use crate::schema::{goals, recurring_payments};

pub struct RecurringPaymentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RecurringPaymentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Deletes every schedule owned by a goal on an existing connection; used
/// by the funding coordinator when cascading a goal deletion.
pub(crate) fn delete_for_goal_on_conn(conn: &mut SqliteConnection, goal_id: &str) -> Result<usize> {
    Ok(
        diesel::delete(recurring_payments::table.filter(recurring_payments::goal_id.eq(goal_id)))
            .execute(conn)?,
    )
}

/// Loads every schedule of a user that is due at or before `as_of`.
pub(crate) fn due_payments_on_conn(
    conn: &mut SqliteConnection,
    for_user_id: &str,
    as_of: NaiveDateTime,
) -> Result<Vec<RecurringPaymentDB>> {
    Ok(recurring_payments::table
        .filter(recurring_payments::user_id.eq(for_user_id))
        .filter(recurring_payments::next_payment_date.le(as_of))
        .order(recurring_payments::next_payment_date.asc())
        .select(RecurringPaymentDB::as_select())
        .load::<RecurringPaymentDB>(conn)?)
}

/// Moves a schedule's next due date forward on an existing connection.
pub(crate) fn set_next_payment_date_on_conn(
    conn: &mut SqliteConnection,
    payment_id: &str,
    next_payment_date: NaiveDateTime,
) -> Result<()> {
    diesel::update(recurring_payments::table.find(payment_id))
        .set((
            recurring_payments::next_payment_date.eq(next_payment_date),
            recurring_payments::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(conn)?;
    Ok(())
}

#[async_trait::async_trait]
impl RecurringPaymentRepositoryTrait for RecurringPaymentRepository {
    fn get_recurring_payments(&self, for_user_id: &str) -> Result<Vec<RecurringPaymentDetails>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = recurring_payments::table
            .inner_join(goals::table.on(goals::id.eq(recurring_payments::goal_id)))
            .filter(recurring_payments::user_id.eq(for_user_id))
            .order(recurring_payments::next_payment_date.asc())
            .select((
                RecurringPaymentDB::as_select(),
                goals::title,
                goals::category_emoji,
                goals::category_name,
            ))
            .load::<(RecurringPaymentDB, String, Option<String>, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(db, goal_title, category_emoji, category_name)| {
                let payment = RecurringPayment::from(db);
                RecurringPaymentDetails {
                    id: payment.id,
                    goal_id: payment.goal_id,
                    user_id: payment.user_id,
                    amount: payment.amount,
                    frequency: payment.frequency,
                    next_payment_date: payment.next_payment_date,
                    goal_title,
                    goal_category: Category::new(category_emoji, category_name),
                }
            })
            .collect())
    }

    fn get_recurring_payments_for_goal(
        &self,
        for_user_id: &str,
        goal_id: &str,
    ) -> Result<Vec<RecurringPayment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = recurring_payments::table
            .filter(recurring_payments::user_id.eq(for_user_id))
            .filter(recurring_payments::goal_id.eq(goal_id))
            .order(recurring_payments::next_payment_date.asc())
            .select(RecurringPaymentDB::as_select())
            .load::<RecurringPaymentDB>(&mut conn)?;
        Ok(rows.into_iter().map(RecurringPayment::from).collect())
    }

    async fn insert_new_recurring_payment(
        &self,
        new_payment: NewRecurringPayment,
    ) -> Result<RecurringPayment> {
        self.writer
            .exec(move |conn| {
                // The schedule must hang off a live goal of the same user.
                find_goal_on_conn(conn, &new_payment.user_id, &new_payment.goal_id)?;

                let mut row: RecurringPaymentDB = new_payment.into();
                row.id = Uuid::new_v4().to_string();

                diesel::insert_into(recurring_payments::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(RecurringPayment::from(row))
            })
            .await
    }

    async fn delete_recurring_payment(
        &self,
        for_user_id: &str,
        payment_id: &str,
    ) -> Result<RecurringPayment> {
        let for_user_id = for_user_id.to_string();
        let payment_id = payment_id.to_string();
        self.writer
            .exec(move |conn| {
                let row = recurring_payments::table
                    .filter(recurring_payments::id.eq(&payment_id))
                    .filter(recurring_payments::user_id.eq(&for_user_id))
                    .select(RecurringPaymentDB::as_select())
                    .first::<RecurringPaymentDB>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        RecurringError::NotFound(format!(
                            "Recurring payment {} not found",
                            payment_id
                        ))
                    })?;

                diesel::delete(recurring_payments::table.find(&row.id)).execute(conn)?;
                Ok(RecurringPayment::from(row))
            })
            .await
    }
}
