use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use nestfund_core::ledger::{
    LedgerServiceTrait, NewTransaction, TransactionKind, TransactionUpdate,
};

mod common;

const USER: &str = "user-1";

fn entry(kind: &str, title: &str, amount: Decimal, date: &str) -> NewTransaction {
    NewTransaction {
        id: None,
        user_id: USER.to_string(),
        kind: kind.to_string(),
        title: title.to_string(),
        category: "General".to_string(),
        amount,
        transaction_date: date.to_string(),
        frequency: None,
        custom_interval: None,
    }
}

#[tokio::test]
async fn balance_is_derived_from_the_log() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    ledger
        .create_transaction(entry("DEPOSIT", "Paycheck", dec!(100), "2025-06-01"))
        .await
        .unwrap();
    ledger
        .create_transaction(entry("DEPOSIT", "Refund", dec!(50), "2025-06-02"))
        .await
        .unwrap();
    ledger
        .create_transaction(entry("WITHDRAWAL", "Groceries", dec!(30), "2025-06-03"))
        .await
        .unwrap();

    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(120));
}

#[tokio::test]
async fn unknown_user_has_a_zero_balance_and_no_history() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    assert_eq!(ledger.get_balance("nobody").unwrap(), dec!(0));
    assert!(ledger.get_transactions("nobody").unwrap().is_empty());
}

#[tokio::test]
async fn transactions_are_scoped_by_user() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    common::deposit(&ledger, "user-1", dec!(100)).await;
    common::deposit(&ledger, "user-2", dec!(999)).await;

    let mine = ledger.get_transactions("user-1").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, "user-1");
    assert_eq!(ledger.get_balance("user-1").unwrap(), dec!(100));
    assert_eq!(ledger.get_balance("user-2").unwrap(), dec!(999));
}

#[tokio::test]
async fn history_is_ordered_by_transaction_date() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    ledger
        .create_transaction(entry("DEPOSIT", "Later", dec!(10), "2025-06-03"))
        .await
        .unwrap();
    ledger
        .create_transaction(entry("DEPOSIT", "Earlier", dec!(10), "2025-06-01"))
        .await
        .unwrap();

    let titles: Vec<String> = ledger
        .get_transactions(USER)
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["Earlier", "Later"]);
}

#[tokio::test]
async fn editing_a_transaction_changes_the_derived_balance() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    let created = ledger
        .create_transaction(entry("DEPOSIT", "Paycheck", dec!(100), "2025-06-01"))
        .await
        .unwrap();

    let updated = ledger
        .update_transaction(TransactionUpdate {
            id: created.id.clone(),
            user_id: USER.to_string(),
            kind: "DEPOSIT".to_string(),
            title: "Paycheck (corrected)".to_string(),
            category: "Income".to_string(),
            amount: dec!(250),
            transaction_date: "2025-06-01".to_string(),
            frequency: None,
            custom_interval: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.amount, dec!(250));
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(250));
    assert_eq!(ledger.get_transactions(USER).unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_transaction_adjusts_the_balance() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    common::deposit(&ledger, USER, dec!(100)).await;
    let created = ledger
        .create_transaction(entry("WITHDRAWAL", "Groceries", dec!(30), "2025-06-02"))
        .await
        .unwrap();
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(70));

    let deleted = ledger.delete_transaction(USER, &created.id).await.unwrap();
    assert_eq!(deleted.kind, TransactionKind::Withdrawal);
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(100));

    let err = ledger.delete_transaction(USER, &created.id).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn nonpositive_amounts_are_rejected() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    for amount in [dec!(0), dec!(-5)] {
        let err = ledger
            .create_transaction(entry("DEPOSIT", "Bad", amount, "2025-06-01"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");
    }
    assert!(ledger.get_transactions(USER).unwrap().is_empty());
}

#[tokio::test]
async fn unknown_kinds_and_bad_dates_are_rejected() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);

    let err = ledger
        .create_transaction(entry("TRANSFER", "Bad kind", dec!(10), "2025-06-01"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_INPUT");

    let err = ledger
        .create_transaction(entry("DEPOSIT", "Bad date", dec!(10), "sometime soon"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_INPUT");
}
