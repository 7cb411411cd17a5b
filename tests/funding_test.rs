use rust_decimal_macros::dec;
use std::sync::Arc;

use nestfund_core::funding::FundingServiceTrait;
use nestfund_core::goals::GoalServiceTrait;
use nestfund_core::ledger::{LedgerServiceTrait, TransactionKind};
use nestfund_core::recurring::{NewRecurringPayment, RecurringPaymentServiceTrait};

mod common;

const USER: &str = "user-1";

#[tokio::test]
async fn contribute_earmarks_funds_and_records_a_withdrawal() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "🏖️|Travel").await;

    let outcome = funding.contribute(USER, &goal_id, dec!(200)).await.unwrap();
    assert_eq!(outcome.goal.current_amount, dec!(200));
    assert_eq!(outcome.balance, dec!(300));
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(300));

    let transactions = ledger.get_transactions(USER).unwrap();
    assert_eq!(transactions.len(), 2);
    let entry = transactions
        .iter()
        .find(|t| t.kind == TransactionKind::Withdrawal)
        .unwrap();
    assert_eq!(entry.amount, dec!(200));
    assert_eq!(entry.title, "Contribution to goal: Vacation");
    assert_eq!(entry.category, "Travel");
}

#[tokio::test]
async fn contribution_followed_by_withdrawal_restores_state() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "Travel").await;

    funding.contribute(USER, &goal_id, dec!(150)).await.unwrap();
    let outcome = funding.contribute(USER, &goal_id, dec!(-150)).await.unwrap();

    assert_eq!(outcome.goal.current_amount, dec!(0));
    assert_eq!(outcome.balance, dec!(500));
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(500));

    let withdrawal_back = ledger
        .get_transactions(USER)
        .unwrap()
        .into_iter()
        .find(|t| t.title == "Withdrawal from goal: Vacation")
        .unwrap();
    assert_eq!(withdrawal_back.kind, TransactionKind::Deposit);
    assert_eq!(withdrawal_back.amount, dec!(150));
}

#[tokio::test]
async fn insufficient_balance_leaves_everything_untouched() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(100)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "Travel").await;

    let err = funding
        .contribute(USER, &goal_id, dec!(150))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_BALANCE");

    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(100));
    assert_eq!(ledger.get_transactions(USER).unwrap().len(), 1);
    assert_eq!(
        goals.get_goal(USER, &goal_id).unwrap().current_amount,
        dec!(0)
    );
}

#[tokio::test]
async fn withdrawal_beyond_earmarked_funds_is_rejected() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "Travel").await;
    funding.contribute(USER, &goal_id, dec!(50)).await.unwrap();

    let err = funding
        .contribute(USER, &goal_id, dec!(-80))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_GOAL_FUNDS");

    assert_eq!(
        goals.get_goal(USER, &goal_id).unwrap().current_amount,
        dec!(50)
    );
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(450));
}

#[tokio::test]
async fn contribution_is_capped_at_the_target() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Laptop", dec!(100), "Tech").await;
    funding.contribute(USER, &goal_id, dec!(90)).await.unwrap();

    // Only 10 of the requested 50 fits; the rest stays in the free balance.
    let outcome = funding.contribute(USER, &goal_id, dec!(50)).await.unwrap();
    assert_eq!(outcome.goal.current_amount, dec!(100));
    assert_eq!(outcome.balance, dec!(400));

    let last = ledger
        .get_transactions(USER)
        .unwrap()
        .into_iter()
        .filter(|t| t.kind == TransactionKind::Withdrawal)
        .last()
        .unwrap();
    assert_eq!(last.amount, dec!(10));
}

#[tokio::test]
async fn contribution_to_a_funded_goal_moves_nothing() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Laptop", dec!(100), "Tech").await;
    funding.contribute(USER, &goal_id, dec!(100)).await.unwrap();

    let outcome = funding.contribute(USER, &goal_id, dec!(25)).await.unwrap();
    assert_eq!(outcome.goal.current_amount, dec!(100));
    assert_eq!(outcome.balance, dec!(400));
    assert_eq!(ledger.get_transactions(USER).unwrap().len(), 2);
}

#[tokio::test]
async fn zero_contribution_is_invalid() {
    let app = common::setup();
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    let goal_id = common::create_goal(&goals, USER, "Laptop", dec!(100), "Tech").await;
    let err = funding
        .contribute(USER, &goal_id, dec!(0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_AMOUNT");
}

#[tokio::test]
async fn goals_are_invisible_to_other_users() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, "user-2", dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "Travel").await;

    let err = funding
        .contribute("user-2", &goal_id, dec!(100))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn deleting_a_goal_refunds_funds_and_cascades_to_schedules() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let recurring = common::recurring_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "Travel").await;
    funding.contribute(USER, &goal_id, dec!(150)).await.unwrap();
    recurring
        .create_recurring_payment(NewRecurringPayment {
            id: None,
            goal_id: goal_id.clone(),
            user_id: USER.to_string(),
            amount: dec!(50),
            frequency: "MONTHLY".to_string(),
            next_payment_date: None,
        })
        .await
        .unwrap();

    let outcome = funding.delete_goal(USER, &goal_id).await.unwrap();
    assert_eq!(outcome.refunded_amount, dec!(150));
    assert_eq!(outcome.balance, dec!(500));

    assert!(goals.get_goals(USER).unwrap().is_empty());
    assert!(recurring.get_recurring_payments(USER).unwrap().is_empty());

    let transactions = ledger.get_transactions(USER).unwrap();
    assert_eq!(transactions.len(), 3);
    let refund = transactions
        .iter()
        .find(|t| t.title == "Refund from deleted goal: Vacation")
        .unwrap();
    assert_eq!(refund.kind, TransactionKind::Deposit);
    assert_eq!(refund.amount, dec!(150));
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(500));
}

#[tokio::test]
async fn deleting_an_empty_goal_refunds_nothing() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = common::funding_service(&app);

    common::deposit(&ledger, USER, dec!(500)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "Travel").await;

    let outcome = funding.delete_goal(USER, &goal_id).await.unwrap();
    assert_eq!(outcome.refunded_amount, dec!(0));
    assert_eq!(outcome.balance, dec!(500));
    assert_eq!(ledger.get_transactions(USER).unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_contributions_cannot_jointly_overdraw() {
    let app = common::setup();
    let ledger = common::ledger_service(&app);
    let goals = common::goal_service(&app);
    let funding = Arc::new(common::funding_service(&app));

    common::deposit(&ledger, USER, dec!(100)).await;
    let goal_id = common::create_goal(&goals, USER, "Vacation", dec!(1000), "Travel").await;

    let (first, second) = tokio::join!(
        funding.contribute(USER, &goal_id, dec!(80)),
        funding.contribute(USER, &goal_id, dec!(80)),
    );

    // The writer serializes both attempts; only one can fit the balance.
    assert_eq!(
        first.is_ok() as usize + second.is_ok() as usize,
        1,
        "exactly one concurrent contribution should succeed"
    );
    assert_eq!(ledger.get_balance(USER).unwrap(), dec!(20));
    assert_eq!(
        goals.get_goal(USER, &goal_id).unwrap().current_amount,
        dec!(80)
    );
}
