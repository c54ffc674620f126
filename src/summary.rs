// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::amortization::{payment_for_month, remaining_balance};
use crate::models::{
    Asset, LifeEvent, Loan, LoanPayment, MonthSummary, NetWorth, Transaction, TransactionType,
};
use crate::recurrence::occurrences_in_month;
use crate::utils::next_month;

/// Payment breakdowns for every loan active in the target month.
pub fn loan_payments_for_month(loans: &[Loan], year: i32, month: u32) -> Vec<LoanPayment> {
    loans
        .iter()
        .filter_map(|loan| payment_for_month(loan, year, month))
        .collect()
}

/// Income, expense, and balance for one month. Loan interest counts as
/// expense; principal repayment is a balance-sheet transfer and is left out.
pub fn month_summary(
    transactions: &[Transaction],
    loans: &[Loan],
    year: i32,
    month: u32,
) -> MonthSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for t in occurrences_in_month(transactions, year, month) {
        match t.r#type {
            TransactionType::Income => total_income += t.amount,
            TransactionType::Expense => total_expense += t.amount,
        }
    }

    let loan_interest: Decimal = loan_payments_for_month(loans, year, month)
        .iter()
        .map(|p| p.interest)
        .sum();
    total_expense += loan_interest;

    MonthSummary {
        year,
        month,
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// `count` consecutive month summaries starting at (start_year,
/// start_month); month overflow rolls into the next year. There is no upper
/// bound on `count`: year views pass 12, outlooks pass 60/120/360.
pub fn multi_month_summaries(
    transactions: &[Transaction],
    loans: &[Loan],
    start_year: i32,
    start_month: u32,
    count: u32,
) -> Vec<MonthSummary> {
    let mut summaries = Vec::with_capacity(count as usize);
    let (mut year, mut month) = (start_year, start_month);
    for _ in 0..count {
        summaries.push(month_summary(transactions, loans, year, month));
        (year, month) = next_month(year, month);
    }
    summaries
}

/// Net balance accumulated from the earliest stored anchor month through
/// the target month, inclusive. An empty store, or a target before any
/// activity, accumulates nothing.
pub fn cumulative_balance(
    transactions: &[Transaction],
    loans: &[Loan],
    year: i32,
    month: u32,
) -> Decimal {
    let first_txn = transactions.iter().map(|t| t.date).min();
    let first_loan = loans.iter().map(|l| l.start_date).min();
    let first = match (first_txn, first_loan) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return Decimal::ZERO,
    };

    let mut balance = Decimal::ZERO;
    let (mut y, mut m) = (first.year(), first.month());
    while y < year || (y == year && m <= month) {
        balance += month_summary(transactions, loans, y, m).balance;
        (y, m) = next_month(y, m);
    }
    balance
}

/// Assets at current value against the loan principal still owed as of the
/// target month. Repayment moves the needle here month by month even though
/// principal never shows up in a MonthSummary expense.
pub fn net_worth(assets: &[Asset], loans: &[Loan], year: i32, month: u32) -> NetWorth {
    let total_assets: Decimal = assets.iter().map(|a| a.current_value).sum();
    let total_loan_balance: Decimal = loans
        .iter()
        .map(|l| remaining_balance(l, year, month))
        .sum();
    NetWorth {
        total_assets,
        total_loan_balance,
        net_worth: total_assets - total_loan_balance,
    }
}

/// Life events dated in the target month, date order. They carry no
/// financial weight; they share the timeline with transactions and loan
/// payments.
pub fn events_in_month(events: &[LifeEvent], year: i32, month: u32) -> Vec<LifeEvent> {
    let mut result: Vec<LifeEvent> = events
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .cloned()
        .collect();
    result.sort_by_key(|e| e.date);
    result
}
