use std::sync::Arc;

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repository }
    }
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, for_user_id: &str) -> Result<Vec<Goal>> {
        self.goal_repository.get_goals(for_user_id)
    }

    fn get_goal(&self, for_user_id: &str, goal_id: &str) -> Result<Goal> {
        self.goal_repository.get_goal(for_user_id, goal_id)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        self.goal_repository.insert_new_goal(new_goal).await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;
        self.goal_repository.update_goal(goal_update).await
    }
}
