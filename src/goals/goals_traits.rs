use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};

/// Trait for goal repository operations. Deleting a goal is deliberately
/// absent: deletion refunds the earmarked amount and therefore belongs to
/// the funding coordinator.
#[async_trait::async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goals(&self, for_user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, for_user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;
}

/// Trait for goal service operations
#[async_trait::async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, for_user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, for_user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;
}
