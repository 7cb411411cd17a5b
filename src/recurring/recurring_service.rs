use std::sync::Arc;

use crate::errors::Result;
use crate::recurring::recurring_model::{
    NewRecurringPayment, RecurringPayment, RecurringPaymentDetails,
};
use crate::recurring::recurring_traits::{
    RecurringPaymentRepositoryTrait, RecurringPaymentServiceTrait,
};

pub struct RecurringPaymentService {
    recurring_repository: Arc<dyn RecurringPaymentRepositoryTrait>,
}

impl RecurringPaymentService {
    pub fn new(recurring_repository: Arc<dyn RecurringPaymentRepositoryTrait>) -> Self {
        Self {
            recurring_repository,
        }
    }
}

#[async_trait::async_trait]
impl RecurringPaymentServiceTrait for RecurringPaymentService {
    fn get_recurring_payments(&self, for_user_id: &str) -> Result<Vec<RecurringPaymentDetails>> {
        self.recurring_repository.get_recurring_payments(for_user_id)
    }

    fn get_recurring_payments_for_goal(
        &self,
        for_user_id: &str,
        goal_id: &str,
    ) -> Result<Vec<RecurringPayment>> {
        self.recurring_repository
            .get_recurring_payments_for_goal(for_user_id, goal_id)
    }

    async fn create_recurring_payment(
        &self,
        new_payment: NewRecurringPayment,
    ) -> Result<RecurringPayment> {
        new_payment.validate()?;
        self.recurring_repository
            .insert_new_recurring_payment(new_payment)
            .await
    }

    async fn delete_recurring_payment(
        &self,
        for_user_id: &str,
        payment_id: &str,
    ) -> Result<RecurringPayment> {
        self.recurring_repository
            .delete_recurring_payment(for_user_id, payment_id)
            .await
    }
}
