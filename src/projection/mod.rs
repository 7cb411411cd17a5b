pub(crate) mod projection_model;
pub(crate) mod projection_service;

pub use projection_model::{BalancePoint, GoalProgressPoint, PaymentFlow, ProjectedPayment};
pub use projection_service::{create_goal_series, project_balance};
