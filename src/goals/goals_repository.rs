use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::categories::Category;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::goals::goals_errors::GoalError;
use crate::goals::goals_model::{Goal, GoalDB, GoalUpdate, NewGoal};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::schema::goals;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

/// Loads a goal scoped by owner on an existing connection. A goal that
/// exists but belongs to another user is indistinguishable from a missing
/// one.
pub(crate) fn find_goal_on_conn(
    conn: &mut SqliteConnection,
    for_user_id: &str,
    goal_id: &str,
) -> Result<GoalDB> {
    let row = goals::table
        .filter(goals::id.eq(goal_id))
        .filter(goals::user_id.eq(for_user_id))
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()?;
    row.ok_or_else(|| GoalError::NotFound(format!("Goal {} not found", goal_id)).into())
}

/// Overwrites a goal's earmarked amount on an existing connection. Only the
/// funding coordinator calls this, from inside a writer transaction.
pub(crate) fn set_current_amount_on_conn(
    conn: &mut SqliteConnection,
    goal_id: &str,
    new_amount: &Decimal,
) -> Result<()> {
    diesel::update(goals::table.find(goal_id))
        .set((
            goals::current_amount.eq(new_amount.to_string()),
            goals::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(conn)?;
    Ok(())
}

/// Deletes a goal row on an existing connection.
pub(crate) fn delete_goal_on_conn(conn: &mut SqliteConnection, goal_id: &str) -> Result<usize> {
    Ok(diesel::delete(goals::table.find(goal_id)).execute(conn)?)
}

#[async_trait::async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goals(&self, for_user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(for_user_id))
            .order(goals::created_at.asc())
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn get_goal(&self, for_user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_goal_on_conn(&mut conn, for_user_id, goal_id).map(Goal::from)
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let mut row: GoalDB = new_goal.into();
                row.id = Uuid::new_v4().to_string();

                diesel::insert_into(goals::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(Goal::from(row))
            })
            .await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let existing = find_goal_on_conn(conn, &goal_update.user_id, &goal_update.id)?;
                let category = Category::parse(&goal_update.category);

                diesel::update(goals::table.find(&existing.id))
                    .set((
                        goals::title.eq(&goal_update.title),
                        goals::category_emoji.eq(&category.emoji),
                        goals::category_name.eq(&category.name),
                        goals::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;

                find_goal_on_conn(conn, &goal_update.user_id, &goal_update.id).map(Goal::from)
            })
            .await
    }
}
