// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::AssetCategory;
use crate::summary::net_worth;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::{Connection, params};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("remove", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let category: AssetCategory = sub.get_one::<String>("category").unwrap().parse()?;
    let value = parse_amount(sub.get_one::<String>("value").unwrap())?;
    let purchase_value = sub
        .get_one::<String>("purchase-value")
        .map(|s| parse_amount(s))
        .transpose()?;
    let acquired = sub
        .get_one::<String>("acquired")
        .map(|s| parse_date(s))
        .transpose()?;
    let description = sub.get_one::<String>("description").map(|s| s.to_string());
    let memo = sub.get_one::<String>("memo").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO assets(name, category, current_value, purchase_value, purchase_date, description, memo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            name,
            category.as_str(),
            value.to_string(),
            purchase_value.map(|d| d.to_string()),
            acquired.map(|d| d.to_string()),
            description,
            memo
        ],
    )?;
    println!(
        "Added asset '{}' valued at {} ({})",
        name,
        fmt_amount(&value),
        category.as_str()
    );
    Ok(())
}

#[derive(Serialize)]
struct AssetRow {
    id: i64,
    name: String,
    category: String,
    current_value: String,
    purchase_value: String,
    change: String,
    acquired: String,
    description: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => {
            let today = chrono::Utc::now().date_naive();
            (today.year(), today.month())
        }
    };

    let assets = db::list_assets(conn)?;
    let loans = db::list_loans(conn)?;

    let data: Vec<AssetRow> = assets
        .iter()
        .map(|a| {
            let change = match a.purchase_value {
                Some(pv) if pv > Decimal::ZERO => {
                    let diff = a.current_value - pv;
                    let pct = (diff / pv * Decimal::ONE_HUNDRED)
                        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
                    let sign = if diff >= Decimal::ZERO { "+" } else { "" };
                    format!("{}{} ({}{}%)", sign, fmt_amount(&diff), sign, pct)
                }
                _ => "-".into(),
            };
            AssetRow {
                id: a.id,
                name: a.name.clone(),
                category: a.category.as_str().into(),
                current_value: fmt_amount(&a.current_value),
                purchase_value: a
                    .purchase_value
                    .as_ref()
                    .map(fmt_amount)
                    .unwrap_or_else(|| "-".into()),
                change,
                acquired: a
                    .purchase_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
                description: a.description.clone().unwrap_or_default(),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.category.clone(),
                    r.name.clone(),
                    r.current_value.clone(),
                    r.purchase_value.clone(),
                    r.change.clone(),
                    r.acquired.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Category", "Name", "Value", "Purchase", "Change", "Acquired", "Description"],
                rows,
            )
        );
        let w = net_worth(&assets, &loans, year, month);
        println!(
            "{}-{:02}: assets {} | loan balance {} | net worth {}",
            year,
            month,
            fmt_amount(&w.total_assets),
            fmt_amount(&w.total_loan_balance),
            fmt_amount(&w.net_worth)
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM assets WHERE id=?1", params![id])?;
    if n == 0 {
        println!("No asset with id {}", id);
    } else {
        println!("Removed asset {}", id);
    }
    Ok(())
}
