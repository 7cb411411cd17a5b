pub(crate) mod ledger_constants;
pub(crate) mod ledger_errors;
pub(crate) mod ledger_model;
pub(crate) mod ledger_repository;
pub(crate) mod ledger_service;
pub(crate) mod ledger_traits;

pub use ledger_constants::*;
pub use ledger_errors::LedgerError;
pub use ledger_model::{
    fold_balance, NewTransaction, Recurrence, Transaction, TransactionDB, TransactionKind,
    TransactionUpdate,
};
pub use ledger_repository::LedgerRepository;
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
