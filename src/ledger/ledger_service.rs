use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::errors::Result;
use crate::ledger::ledger_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::ledger::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};

/// Service for recording and querying ledger entries. The balance exposed
/// here is always derived from the transaction log, never stored.
pub struct LedgerService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    pub fn new(ledger_repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { ledger_repository }
    }
}

#[async_trait::async_trait]
impl LedgerServiceTrait for LedgerService {
    fn get_transactions(&self, for_user_id: &str) -> Result<Vec<Transaction>> {
        self.ledger_repository.get_transactions(for_user_id)
    }

    fn get_transaction(&self, for_user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.ledger_repository
            .get_transaction(for_user_id, transaction_id)
    }

    fn get_balance(&self, for_user_id: &str) -> Result<Decimal> {
        let balance = self.ledger_repository.calculate_balance(for_user_id)?;
        debug!("Derived balance for user {}: {}", for_user_id, balance);
        Ok(balance)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        self.ledger_repository
            .create_transaction(new_transaction)
            .await
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        update.validate()?;
        self.ledger_repository.update_transaction(update).await
    }

    async fn delete_transaction(
        &self,
        for_user_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction> {
        self.ledger_repository
            .delete_transaction(for_user_id, transaction_id)
            .await
    }
}
