// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use lifeclip::models::{Category, Recurrence, Transaction};
use lifeclip::recurrence::occurrences_in_month;
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn txn(
    id: i64,
    category: Category,
    amount: &str,
    anchor: &str,
    recurrence: Recurrence,
    until: Option<&str>,
) -> Transaction {
    Transaction {
        id,
        title: format!("t{}", id),
        amount: amount.parse::<Decimal>().unwrap(),
        r#type: category.transaction_type(),
        category,
        date: date(anchor),
        recurrence,
        recurrence_end_date: until.map(date),
        memo: None,
    }
}

#[test]
fn monthly_salary_resolves_far_in_the_future() {
    let t = txn(1, Category::Salary, "3000000", "2024-01-01", Recurrence::Monthly, None);
    let got = occurrences_in_month(&[t], 2025, 6);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].date, date("2025-06-01"));
    assert_eq!(got[0].amount, Decimal::from(3_000_000u32));
}

#[test]
fn monthly_fires_every_month_from_anchor_on() {
    let t = txn(1, Category::Rent, "500000", "2024-03-10", Recurrence::Monthly, None);
    assert!(occurrences_in_month(&[t.clone()], 2024, 2).is_empty());
    assert_eq!(occurrences_in_month(&[t.clone()], 2024, 3).len(), 1);
    assert_eq!(occurrences_in_month(&[t.clone()], 2024, 4).len(), 1);
    assert_eq!(occurrences_in_month(&[t.clone()], 2025, 4).len(), 1);
    assert_eq!(occurrences_in_month(&[t], 2054, 3).len(), 1);
}

#[test]
fn monthly_stops_strictly_after_end_date() {
    let t = txn(
        1,
        Category::Subscription,
        "15000",
        "2024-01-20",
        Recurrence::Monthly,
        Some("2024-04-20"),
    );
    assert_eq!(occurrences_in_month(&[t.clone()], 2024, 4).len(), 1);
    assert!(occurrences_in_month(&[t], 2024, 5).is_empty());
}

#[test]
fn yearly_window_respects_anchor_and_end() {
    let t = txn(
        1,
        Category::Insurance,
        "840000",
        "2024-03-15",
        Recurrence::Yearly,
        Some("2026-03-15"),
    );
    for year in [2024, 2025, 2026] {
        let got = occurrences_in_month(&[t.clone()], year, 3);
        assert_eq!(got.len(), 1, "missing occurrence in {}", year);
        assert_eq!(got[0].date, NaiveDate::from_ymd_opt(year, 3, 15).unwrap());
    }
    assert!(occurrences_in_month(&[t.clone()], 2027, 3).is_empty());
    assert!(occurrences_in_month(&[t.clone()], 2023, 3).is_empty());
    assert!(occurrences_in_month(&[t], 2025, 4).is_empty());
}

#[test]
fn once_occurs_only_in_its_own_month() {
    let t = txn(1, Category::Travel, "900000", "2024-07-19", Recurrence::Once, None);
    let got = occurrences_in_month(&[t.clone()], 2024, 7);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].date, date("2024-07-19"));
    assert!(occurrences_in_month(&[t.clone()], 2024, 6).is_empty());
    assert!(occurrences_in_month(&[t], 2025, 7).is_empty());
}

#[test]
fn full_date_comparison_blocks_months_before_anchor() {
    // Day-of-month alone would let this fire in December 2023.
    let t = txn(1, Category::Salary, "2000000", "2024-01-15", Recurrence::Monthly, None);
    assert!(occurrences_in_month(&[t.clone()], 2023, 12).is_empty());
    let got = occurrences_in_month(&[t], 2024, 1);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].date, date("2024-01-15"));
}

#[test]
fn anchor_day_past_month_end_clamps_to_last_day() {
    let t = txn(1, Category::Rent, "700000", "2024-01-31", Recurrence::Monthly, None);
    let feb_leap = occurrences_in_month(&[t.clone()], 2024, 2);
    assert_eq!(feb_leap[0].date, date("2024-02-29"));
    let feb = occurrences_in_month(&[t.clone()], 2025, 2);
    assert_eq!(feb[0].date, date("2025-02-28"));
    let apr = occurrences_in_month(&[t.clone()], 2024, 4);
    assert_eq!(apr[0].date, date("2024-04-30"));
    let jan = occurrences_in_month(&[t], 2024, 1);
    assert_eq!(jan[0].date, date("2024-01-31"));
}

#[test]
fn clamped_date_still_honors_end_date() {
    // End date sits mid-March; the clamped March 31 occurrence is past it.
    let t = txn(
        1,
        Category::Utilities,
        "60000",
        "2024-01-31",
        Recurrence::Monthly,
        Some("2024-03-15"),
    );
    assert_eq!(occurrences_in_month(&[t.clone()], 2024, 2).len(), 1);
    assert!(occurrences_in_month(&[t], 2024, 3).is_empty());
}

#[test]
fn occurrences_sort_by_date_with_stable_ties() {
    let a = txn(1, Category::Rent, "500000", "2024-01-20", Recurrence::Monthly, None);
    let b = txn(2, Category::Food, "120000", "2024-03-05", Recurrence::Once, None);
    let c = txn(3, Category::Transport, "80000", "2024-01-05", Recurrence::Monthly, None);
    let got = occurrences_in_month(&[a, b, c], 2024, 3);
    let ids: Vec<i64> = got.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(got[0].date, date("2024-03-05"));
    assert_eq!(got[1].date, date("2024-03-05"));
    assert_eq!(got[2].date, date("2024-03-20"));
}
