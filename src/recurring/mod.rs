pub(crate) mod recurring_errors;
pub(crate) mod recurring_model;
pub(crate) mod recurring_repository;
pub(crate) mod recurring_service;
pub(crate) mod recurring_traits;

pub use recurring_errors::RecurringError;
pub use recurring_model::{
    Frequency, NewRecurringPayment, RecurringPayment, RecurringPaymentDB, RecurringPaymentDetails,
};
pub use recurring_repository::RecurringPaymentRepository;
pub use recurring_service::RecurringPaymentService;
pub use recurring_traits::{RecurringPaymentRepositoryTrait, RecurringPaymentServiceTrait};
