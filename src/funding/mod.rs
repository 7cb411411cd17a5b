pub(crate) mod funding_errors;
pub(crate) mod funding_model;
pub(crate) mod funding_service;
pub(crate) mod funding_traits;

pub use funding_errors::FundingError;
pub use funding_model::{ContributionOutcome, DuePaymentsSummary, GoalDeletionOutcome};
pub use funding_service::FundingService;
pub use funding_traits::FundingServiceTrait;
