use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_model::*;
use crate::ledger::ledger_traits::LedgerRepositoryTrait;
use crate::schema::transactions;
use crate::utils::parse_decimal_tolerant;

/// Repository for ledger entries. Reads go straight to the pool; mutations
/// are funneled through the single-writer actor.
pub struct LedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads one user's transactions on an existing connection.
pub(crate) fn transactions_on_conn(
    conn: &mut SqliteConnection,
    for_user_id: &str,
) -> Result<Vec<Transaction>> {
    let rows = transactions::table
        .filter(transactions::user_id.eq(for_user_id))
        .order(transactions::transaction_date.asc())
        .select(TransactionDB::as_select())
        .load::<TransactionDB>(conn)?;
    Ok(rows.into_iter().map(Transaction::from).collect())
}

/// Folds one user's ledger into a balance on an existing connection. Funding
/// operations call this from inside the writer transaction so the balance
/// they validate against can never be stale.
pub(crate) fn balance_on_conn(conn: &mut SqliteConnection, for_user_id: &str) -> Result<Decimal> {
    let rows = transactions::table
        .filter(transactions::user_id.eq(for_user_id))
        .select((transactions::kind, transactions::amount))
        .load::<(String, String)>(conn)?;

    Ok(fold_balance(rows.into_iter().map(|(kind, amount)| {
        let kind = TransactionKind::from_str(&kind).unwrap_or_else(|e| {
            log::error!("{}; treating entry as a deposit", e);
            TransactionKind::Deposit
        });
        (kind, parse_decimal_tolerant(&amount, "transaction amount"))
    })))
}

/// Inserts a ledger entry on an existing connection.
pub(crate) fn insert_transaction_on_conn(
    conn: &mut SqliteConnection,
    row: TransactionDB,
) -> Result<Transaction> {
    diesel::insert_into(transactions::table)
        .values(&row)
        .execute(conn)?;
    Ok(Transaction::from(row))
}

fn find_transaction_on_conn(
    conn: &mut SqliteConnection,
    for_user_id: &str,
    transaction_id: &str,
) -> Result<TransactionDB> {
    let row = transactions::table
        .filter(transactions::id.eq(transaction_id))
        .filter(transactions::user_id.eq(for_user_id))
        .select(TransactionDB::as_select())
        .first::<TransactionDB>(conn)
        .optional()?;
    row.ok_or_else(|| {
        LedgerError::NotFound(format!("Transaction {} not found", transaction_id)).into()
    })
}

#[async_trait::async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    fn get_transactions(&self, for_user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        transactions_on_conn(&mut conn, for_user_id)
    }

    fn get_transaction(&self, for_user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        find_transaction_on_conn(&mut conn, for_user_id, transaction_id).map(Transaction::from)
    }

    fn calculate_balance(&self, for_user_id: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        balance_on_conn(&mut conn, for_user_id)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn| {
                let mut row: TransactionDB = new_transaction.into();
                row.id = Uuid::new_v4().to_string();
                insert_transaction_on_conn(conn, row)
            })
            .await
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        self.writer
            .exec(move |conn| {
                let existing = find_transaction_on_conn(conn, &update.user_id, &update.id)?;

                let mut row: TransactionDB = update.into();
                row.created_at = existing.created_at;
                row.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(transactions::table.find(&row.id))
                    .set(&row)
                    .execute(conn)?;
                Ok(Transaction::from(row))
            })
            .await
    }

    async fn delete_transaction(
        &self,
        for_user_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction> {
        let for_user_id = for_user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = find_transaction_on_conn(conn, &for_user_id, &transaction_id)?;
                diesel::delete(transactions::table.find(&existing.id)).execute(conn)?;
                Ok(Transaction::from(existing))
            })
            .await
    }
}
