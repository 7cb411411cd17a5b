use crate::errors::Result;
use crate::recurring::recurring_model::{
    NewRecurringPayment, RecurringPayment, RecurringPaymentDetails,
};

/// Trait for recurring payment repository operations
#[async_trait::async_trait]
pub trait RecurringPaymentRepositoryTrait: Send + Sync {
    fn get_recurring_payments(&self, for_user_id: &str) -> Result<Vec<RecurringPaymentDetails>>;
    fn get_recurring_payments_for_goal(
        &self,
        for_user_id: &str,
        goal_id: &str,
    ) -> Result<Vec<RecurringPayment>>;
    async fn insert_new_recurring_payment(
        &self,
        new_payment: NewRecurringPayment,
    ) -> Result<RecurringPayment>;
    async fn delete_recurring_payment(
        &self,
        for_user_id: &str,
        payment_id: &str,
    ) -> Result<RecurringPayment>;
}

/// Trait for recurring payment service operations
#[async_trait::async_trait]
pub trait RecurringPaymentServiceTrait: Send + Sync {
    fn get_recurring_payments(&self, for_user_id: &str) -> Result<Vec<RecurringPaymentDetails>>;
    fn get_recurring_payments_for_goal(
        &self,
        for_user_id: &str,
        goal_id: &str,
    ) -> Result<Vec<RecurringPayment>>;
    async fn create_recurring_payment(
        &self,
        new_payment: NewRecurringPayment,
    ) -> Result<RecurringPayment>;
    async fn delete_recurring_payment(
        &self,
        for_user_id: &str,
        payment_id: &str,
    ) -> Result<RecurringPayment>;
}
