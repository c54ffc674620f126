// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use lifeclip::amortization::payment_for_month;
use lifeclip::models::{
    Asset, AssetCategory, Category, EventCategory, EventColor, LifeEvent, Loan, Recurrence,
    RepaymentType, Transaction,
};
use lifeclip::summary::{
    cumulative_balance, events_in_month, month_summary, multi_month_summaries, net_worth,
};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn txn(
    id: i64,
    category: Category,
    amount: &str,
    anchor: &str,
    recurrence: Recurrence,
) -> Transaction {
    Transaction {
        id,
        title: format!("t{}", id),
        amount: dec(amount),
        r#type: category.transaction_type(),
        category,
        date: date(anchor),
        recurrence,
        recurrence_end_date: None,
        memo: None,
    }
}

fn bullet_loan() -> Loan {
    Loan {
        id: 7,
        name: "Bridge".into(),
        principal: dec("50000000"),
        interest_rate: dec("6"),
        repayment_type: RepaymentType::Bullet,
        term_months: 12,
        start_date: date("2024-01-01"),
        payment_day: 25,
        memo: None,
    }
}

fn event(id: i64, day: &str, important: bool) -> LifeEvent {
    LifeEvent {
        id,
        title: format!("e{}", id),
        category: EventCategory::Housing,
        date: date(day),
        description: None,
        color: EventColor::Blue,
        is_important: important,
    }
}

#[test]
fn balance_counts_loan_interest_but_not_principal() {
    let transactions = vec![
        txn(1, Category::Salary, "3000000", "2024-01-01", Recurrence::Monthly),
        txn(2, Category::Rent, "500000", "2024-01-10", Recurrence::Monthly),
    ];
    let loans = vec![bullet_loan()];

    let mid = month_summary(&transactions, &loans, 2024, 3);
    assert_eq!(mid.total_income, dec("3000000"));
    assert_eq!(mid.total_expense, dec("750000"));
    assert_eq!(mid.balance, dec("2250000"));

    // Maturity month: 50M principal comes due, expense still only carries
    // the 250,000 interest.
    let last = month_summary(&transactions, &loans, 2024, 12);
    assert_eq!(last.total_expense, dec("750000"));
    assert_eq!(last.balance, dec("2250000"));

    // Loan finished: interest gone.
    let after = month_summary(&transactions, &loans, 2025, 1);
    assert_eq!(after.total_expense, dec("500000"));
    assert_eq!(after.balance, mid.total_income - after.total_expense);
}

#[test]
fn expense_equals_transactions_plus_loan_interest() {
    let transactions = vec![
        txn(1, Category::Salary, "4000000", "2024-01-01", Recurrence::Monthly),
        txn(2, Category::Food, "650000", "2024-01-05", Recurrence::Monthly),
    ];
    let loans = vec![Loan {
        id: 3,
        name: "Car".into(),
        principal: dec("24000000"),
        interest_rate: dec("4.8"),
        repayment_type: RepaymentType::EqualPrincipalInterest,
        term_months: 48,
        start_date: date("2024-02-01"),
        payment_day: 15,
        memo: None,
    }];

    let s = month_summary(&transactions, &loans, 2024, 6);
    let p = payment_for_month(&loans[0], 2024, 6).unwrap();
    assert_eq!(s.total_expense, dec("650000") + p.interest);
    assert_eq!(s.balance, s.total_income - s.total_expense);
}

#[test]
fn multi_month_rolls_over_year_boundary() {
    let transactions = vec![txn(1, Category::Salary, "1000000", "2024-01-01", Recurrence::Monthly)];
    let got = multi_month_summaries(&transactions, &[], 2024, 11, 4);
    let months: Vec<(i32, u32)> = got.iter().map(|s| (s.year, s.month)).collect();
    assert_eq!(months, vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);
}

#[test]
fn thirty_year_horizon_stays_flat_for_steady_income() {
    let transactions = vec![txn(1, Category::Salary, "1000000", "2024-01-01", Recurrence::Monthly)];
    let got = multi_month_summaries(&transactions, &[], 2024, 1, 360);
    assert_eq!(got.len(), 360);
    assert_eq!(got.last().unwrap().year, 2053);
    for s in &got {
        assert_eq!(s.balance, dec("1000000"));
    }
}

#[test]
fn cumulative_balance_accumulates_from_first_anchor() {
    let transactions = vec![txn(1, Category::Salary, "1000000", "2024-01-10", Recurrence::Monthly)];
    assert_eq!(cumulative_balance(&transactions, &[], 2024, 6), dec("6000000"));
    assert_eq!(cumulative_balance(&transactions, &[], 2024, 1), dec("1000000"));
    assert_eq!(cumulative_balance(&transactions, &[], 2023, 12), Decimal::ZERO);
    assert_eq!(cumulative_balance(&[], &[], 2024, 6), Decimal::ZERO);
}

#[test]
fn cumulative_balance_starts_at_loan_when_no_transactions() {
    let loans = vec![bullet_loan()];
    // Three months of 250,000 interest, nothing else.
    assert_eq!(cumulative_balance(&[], &loans, 2024, 3), dec("-750000"));
}

#[test]
fn net_worth_subtracts_loan_balances_from_assets() {
    let assets = vec![
        Asset {
            id: 1,
            name: "Apartment".into(),
            category: AssetCategory::RealEstate,
            current_value: dec("80000000"),
            purchase_value: Some(dec("75000000")),
            purchase_date: Some(date("2022-05-01")),
            description: None,
            memo: None,
        },
        Asset {
            id: 2,
            name: "Deposit".into(),
            category: AssetCategory::Savings,
            current_value: dec("20000000"),
            purchase_value: None,
            purchase_date: None,
            description: None,
            memo: None,
        },
    ];
    let loans = vec![bullet_loan()];

    let mid = net_worth(&assets, &loans, 2024, 6);
    assert_eq!(mid.total_assets, dec("100000000"));
    assert_eq!(mid.total_loan_balance, dec("50000000"));
    assert_eq!(mid.net_worth, dec("50000000"));

    // After maturity the principal is repaid and drops out of the debt side.
    let after = net_worth(&assets, &loans, 2025, 1);
    assert_eq!(after.total_loan_balance, Decimal::ZERO);
    assert_eq!(after.net_worth, dec("100000000"));

    let empty = net_worth(&[], &[], 2024, 6);
    assert_eq!(empty.net_worth, Decimal::ZERO);
}

#[test]
fn events_filter_to_month_in_date_order() {
    let events = vec![
        event(1, "2025-03-20", false),
        event(2, "2025-04-02", true),
        event(3, "2025-03-05", true),
    ];
    let got = events_in_month(&events, 2025, 3);
    let ids: Vec<i64> = got.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert!(events_in_month(&events, 2025, 5).is_empty());
}
