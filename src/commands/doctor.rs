// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    AssetCategory, Category, EventCategory, EventColor, Recurrence, RepaymentType, TransactionType,
};
use crate::utils::{parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = scan(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Scans stored rows for violations of the invariants the entry commands
/// enforce. The computation layer assumes these hold; rows flagged here were
/// written by hand or by an older build.
pub fn scan(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT id, amount, type, category, date, recurrence, recurrence_end_date
         FROM transactions ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let type_s: String = r.get(2)?;
        let category_s: String = r.get(3)?;
        let date_s: String = r.get(4)?;
        let recurrence_s: String = r.get(5)?;
        let end_s: Option<String> = r.get(6)?;

        match amount_s.parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            _ => rows.push(vec![
                "txn_bad_amount".into(),
                format!("id {} amount '{}'", id, amount_s),
            ]),
        }
        let kind = type_s.parse::<TransactionType>();
        let category = category_s.parse::<Category>();
        if kind.is_err() {
            rows.push(vec!["txn_bad_type".into(), format!("id {} '{}'", id, type_s)]);
        }
        if category.is_err() {
            rows.push(vec![
                "txn_bad_category".into(),
                format!("id {} '{}'", id, category_s),
            ]);
        }
        if let (Ok(k), Ok(c)) = (kind, category) {
            if c.transaction_type() != k {
                rows.push(vec![
                    "txn_type_category_mismatch".into(),
                    format!("id {}: {} vs {}", id, k.as_str(), c.as_str()),
                ]);
            }
        }
        if recurrence_s.parse::<Recurrence>().is_err() {
            rows.push(vec![
                "txn_bad_recurrence".into(),
                format!("id {} '{}'", id, recurrence_s),
            ]);
        }
        let date = parse_date(&date_s);
        if date.is_err() {
            rows.push(vec!["txn_bad_date".into(), format!("id {} '{}'", id, date_s)]);
        }
        if let Some(end_s) = end_s {
            match (parse_date(&end_s), &date) {
                (Ok(end), Ok(d)) if end < *d => rows.push(vec![
                    "txn_end_before_anchor".into(),
                    format!("id {}: {} < {}", id, end, d),
                ]),
                (Err(_), _) => {
                    rows.push(vec!["txn_bad_date".into(), format!("id {} '{}'", id, end_s)])
                }
                _ => {}
            }
        }
    }

    let mut stmt2 = conn.prepare(
        "SELECT id, principal, interest_rate, repayment_type, term_months, start_date, payment_day
         FROM loans ORDER BY id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let principal_s: String = r.get(1)?;
        let rate_s: String = r.get(2)?;
        let repayment_s: String = r.get(3)?;
        let term: i64 = r.get(4)?;
        let start_s: String = r.get(5)?;
        let payment_day: i64 = r.get(6)?;

        match principal_s.parse::<Decimal>() {
            Ok(p) if p > Decimal::ZERO => {}
            _ => rows.push(vec![
                "loan_bad_principal".into(),
                format!("id {} principal '{}'", id, principal_s),
            ]),
        }
        match rate_s.parse::<Decimal>() {
            Ok(rate) if rate >= Decimal::ZERO => {}
            _ => rows.push(vec![
                "loan_bad_rate".into(),
                format!("id {} rate '{}'", id, rate_s),
            ]),
        }
        if repayment_s.parse::<RepaymentType>().is_err() {
            rows.push(vec![
                "loan_bad_repayment_type".into(),
                format!("id {} '{}'", id, repayment_s),
            ]);
        }
        if term < 1 {
            rows.push(vec!["loan_bad_term".into(), format!("id {} term {}", id, term)]);
        }
        if !(1..=28).contains(&payment_day) {
            rows.push(vec![
                "loan_bad_payment_day".into(),
                format!("id {} day {}", id, payment_day),
            ]);
        }
        if parse_date(&start_s).is_err() {
            rows.push(vec![
                "loan_bad_date".into(),
                format!("id {} '{}'", id, start_s),
            ]);
        }
    }

    let mut stmt_assets = conn.prepare(
        "SELECT id, category, current_value, purchase_value, purchase_date FROM assets ORDER BY id",
    )?;
    let mut cur_assets = stmt_assets.query([])?;
    while let Some(r) = cur_assets.next()? {
        let id: i64 = r.get(0)?;
        let category_s: String = r.get(1)?;
        let value_s: String = r.get(2)?;
        let purchase_s: Option<String> = r.get(3)?;
        let purchase_date_s: Option<String> = r.get(4)?;
        if category_s.parse::<AssetCategory>().is_err() {
            rows.push(vec![
                "asset_bad_category".into(),
                format!("id {} '{}'", id, category_s),
            ]);
        }
        match value_s.parse::<Decimal>() {
            Ok(v) if v > Decimal::ZERO => {}
            _ => rows.push(vec![
                "asset_bad_value".into(),
                format!("id {} value '{}'", id, value_s),
            ]),
        }
        if let Some(purchase_s) = purchase_s {
            match purchase_s.parse::<Decimal>() {
                Ok(v) if v > Decimal::ZERO => {}
                _ => rows.push(vec![
                    "asset_bad_value".into(),
                    format!("id {} purchase value '{}'", id, purchase_s),
                ]),
            }
        }
        if let Some(date_s) = purchase_date_s {
            if parse_date(&date_s).is_err() {
                rows.push(vec![
                    "asset_bad_date".into(),
                    format!("id {} '{}'", id, date_s),
                ]);
            }
        }
    }

    let mut stmt3 = conn.prepare("SELECT id, category, color, date FROM events ORDER BY id")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let category_s: String = r.get(1)?;
        let color_s: String = r.get(2)?;
        let date_s: String = r.get(3)?;
        if category_s.parse::<EventCategory>().is_err() {
            rows.push(vec![
                "event_bad_category".into(),
                format!("id {} '{}'", id, category_s),
            ]);
        }
        if color_s.parse::<EventColor>().is_err() {
            rows.push(vec![
                "event_bad_color".into(),
                format!("id {} '{}'", id, color_s),
            ]);
        }
        if parse_date(&date_s).is_err() {
            rows.push(vec!["event_bad_date".into(), format!("id {} '{}'", id, date_s)]);
        }
    }

    Ok(rows)
}
