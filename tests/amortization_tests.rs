// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use lifeclip::amortization::{monthly_payment, payment_for_month, payment_schedule, remaining_balance};
use lifeclip::models::{Loan, RepaymentType};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn loan(
    repayment_type: RepaymentType,
    principal: &str,
    rate: &str,
    term_months: u32,
    start: &str,
) -> Loan {
    Loan {
        id: 1,
        name: "Mortgage".into(),
        principal: dec(principal),
        interest_rate: dec(rate),
        repayment_type,
        term_months,
        start_date: date(start),
        payment_day: 25,
        memo: None,
    }
}

#[test]
fn annuity_first_interest_and_constant_payment() {
    // 120,000,000 at 4.8%/yr over 120 months: first interest is exactly
    // principal * 0.004.
    let l = loan(
        RepaymentType::EqualPrincipalInterest,
        "120000000",
        "4.8",
        120,
        "2024-01-01",
    );
    let first = payment_for_month(&l, 2024, 1).unwrap();
    assert_eq!(first.month_number, 1);
    assert_eq!(first.date, date("2024-01-25"));
    assert!((first.interest - dec("480000")).abs() <= Decimal::ONE);

    let i = 0.048_f64 / 12.0;
    let factor = (1.0 + i).powi(120);
    let expected = Decimal::from((120_000_000.0 * i * factor / (factor - 1.0)).round() as i64);
    for p in payment_schedule(&l) {
        assert!(
            (p.total_payment - expected).abs() <= Decimal::ONE,
            "payment {} drifted to {}",
            p.month_number,
            p.total_payment
        );
    }
}

#[test]
fn principal_sums_to_borrowed_amount() {
    for repayment_type in [
        RepaymentType::EqualPrincipalInterest,
        RepaymentType::EqualPrincipal,
        RepaymentType::Bullet,
    ] {
        let l = loan(repayment_type, "10000000", "5.5", 37, "2024-03-01");
        let schedule = payment_schedule(&l);
        assert_eq!(schedule.len(), 37);
        let total: Decimal = schedule.iter().map(|p| p.principal).sum();
        assert!(
            (total - dec("10000000")).abs() <= Decimal::from(37u32),
            "{:?}: principal sum {}",
            repayment_type,
            total
        );
        assert_eq!(schedule.last().unwrap().remaining_principal, Decimal::ZERO);
    }
}

#[test]
fn equal_principal_portion_fixed_interest_shrinks() {
    let l = loan(RepaymentType::EqualPrincipal, "10000000", "6", 12, "2024-01-01");
    let schedule = payment_schedule(&l);
    for w in schedule.windows(2) {
        assert_eq!(w[0].principal, w[1].principal);
        assert!(w[1].interest <= w[0].interest);
        assert!(w[1].total_payment < w[0].total_payment);
    }
}

#[test]
fn bullet_is_interest_only_until_maturity() {
    let l = loan(RepaymentType::Bullet, "50000000", "6", 12, "2024-01-01");
    let schedule = payment_schedule(&l);
    for p in &schedule[..11] {
        assert_eq!(p.interest, dec("250000"));
        assert_eq!(p.principal, Decimal::ZERO);
        assert_eq!(p.remaining_principal, dec("50000000"));
    }
    let last = &schedule[11];
    assert_eq!(last.principal, dec("50000000"));
    assert_eq!(last.interest, dec("250000"));
    assert_eq!(last.total_payment, dec("50250000"));
    assert_eq!(last.remaining_principal, Decimal::ZERO);
}

#[test]
fn zero_rate_annuity_splits_principal_evenly() {
    let l = loan(
        RepaymentType::EqualPrincipalInterest,
        "1200000",
        "0",
        12,
        "2024-01-01",
    );
    assert_eq!(monthly_payment(l.principal, l.interest_rate, l.term_months), dec("100000"));
    for p in payment_schedule(&l) {
        assert_eq!(p.total_payment, dec("100000"));
        assert_eq!(p.interest, Decimal::ZERO);
    }
    let last = payment_for_month(&l, 2024, 12).unwrap();
    assert_eq!(last.remaining_principal, Decimal::ZERO);
}

#[test]
fn no_payment_outside_activity_window() {
    let l = loan(
        RepaymentType::EqualPrincipalInterest,
        "1000000",
        "3",
        6,
        "2024-06-15",
    );
    assert!(payment_for_month(&l, 2023, 12).is_none());
    assert!(payment_for_month(&l, 2024, 5).is_none());
    assert_eq!(payment_for_month(&l, 2024, 6).unwrap().month_number, 1);
    assert_eq!(payment_for_month(&l, 2024, 11).unwrap().month_number, 6);
    assert!(payment_for_month(&l, 2024, 12).is_none());
    assert!(payment_for_month(&l, 2025, 6).is_none());
}

#[test]
fn remaining_balance_over_loan_lifetime() {
    // 12M over 12 months equal principal: 1M of debt retired per payment.
    let l = loan(RepaymentType::EqualPrincipal, "12000000", "6", 12, "2024-01-01");
    assert_eq!(remaining_balance(&l, 2023, 12), dec("12000000"));
    assert_eq!(remaining_balance(&l, 2024, 1), dec("11000000"));
    assert_eq!(remaining_balance(&l, 2024, 6), dec("6000000"));
    assert_eq!(remaining_balance(&l, 2024, 12), Decimal::ZERO);
    assert_eq!(remaining_balance(&l, 2025, 3), Decimal::ZERO);

    let b = loan(RepaymentType::Bullet, "50000000", "6", 12, "2024-01-01");
    assert_eq!(remaining_balance(&b, 2024, 11), dec("50000000"));
    assert_eq!(remaining_balance(&b, 2024, 12), Decimal::ZERO);
}

#[test]
fn closed_form_agrees_with_incremental_schedule() {
    let l = loan(
        RepaymentType::EqualPrincipalInterest,
        "35000000",
        "7.2",
        36,
        "2024-05-01",
    );
    for p in payment_schedule(&l) {
        let q = payment_for_month(&l, p.date.year(), p.date.month()).unwrap();
        assert_eq!(q.month_number, p.month_number);
        assert!((q.principal - p.principal).abs() <= Decimal::ONE);
        assert!((q.interest - p.interest).abs() <= Decimal::ONE);
        assert!((q.remaining_principal - p.remaining_principal).abs() <= Decimal::ONE);
    }
}
