use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use nestfund_core::db::{self, DbPool, WriteHandle};
use nestfund_core::funding::FundingService;
use nestfund_core::goals::{GoalRepository, GoalService, GoalServiceTrait, NewGoal};
use nestfund_core::ledger::{
    LedgerRepository, LedgerService, LedgerServiceTrait, NewTransaction,
};
use nestfund_core::recurring::{RecurringPaymentRepository, RecurringPaymentService};

pub struct TestApp {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _data_dir: TempDir,
}

/// Creates a fresh on-disk SQLite database, runs the migrations and spawns
/// the writer actor. Must be called from within a Tokio runtime.
pub fn setup() -> TestApp {
    let data_dir = TempDir::new().unwrap();
    let db_path = db::init(data_dir.path().to_str().unwrap()).unwrap();
    let pool = db::create_pool(&db_path).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = db::spawn_writer((*pool).clone());

    TestApp {
        pool,
        writer,
        _data_dir: data_dir,
    }
}

pub fn ledger_service(app: &TestApp) -> LedgerService {
    LedgerService::new(Arc::new(LedgerRepository::new(
        app.pool.clone(),
        app.writer.clone(),
    )))
}

pub fn goal_service(app: &TestApp) -> GoalService {
    GoalService::new(Arc::new(GoalRepository::new(
        app.pool.clone(),
        app.writer.clone(),
    )))
}

pub fn recurring_service(app: &TestApp) -> RecurringPaymentService {
    RecurringPaymentService::new(Arc::new(RecurringPaymentRepository::new(
        app.pool.clone(),
        app.writer.clone(),
    )))
}

pub fn funding_service(app: &TestApp) -> FundingService {
    FundingService::new(app.writer.clone())
}

/// Records a plain deposit so tests have a free balance to work with.
pub async fn deposit(ledger: &LedgerService, user_id: &str, amount: Decimal) {
    ledger
        .create_transaction(NewTransaction {
            id: None,
            user_id: user_id.to_string(),
            kind: "DEPOSIT".to_string(),
            title: "Paycheck".to_string(),
            category: "Income".to_string(),
            amount,
            transaction_date: "2025-06-01".to_string(),
            frequency: None,
            custom_interval: None,
        })
        .await
        .unwrap();
}

/// Creates a goal and returns its id.
pub async fn create_goal(
    goals: &GoalService,
    user_id: &str,
    title: &str,
    target: Decimal,
    category: &str,
) -> String {
    goals
        .create_goal(NewGoal {
            id: None,
            user_id: user_id.to_string(),
            title: title.to_string(),
            target_amount: target,
            category: category.to_string(),
        })
        .await
        .unwrap()
        .id
}
