use rust_decimal::Decimal;

use crate::errors::Result;
use crate::ledger::ledger_model::{NewTransaction, Transaction, TransactionUpdate};

/// Trait defining the contract for ledger repository operations.
#[async_trait::async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    fn get_transactions(&self, for_user_id: &str) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, for_user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn calculate_balance(&self, for_user_id: &str) -> Result<Decimal>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction>;
    async fn delete_transaction(
        &self,
        for_user_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction>;
}

/// Trait defining the contract for ledger service operations.
#[async_trait::async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    fn get_transactions(&self, for_user_id: &str) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, for_user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn get_balance(&self, for_user_id: &str) -> Result<Decimal>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction>;
    async fn delete_transaction(
        &self,
        for_user_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction>;
}
