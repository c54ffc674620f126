// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Recurrence};
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};
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
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let recurrence: Recurrence = sub.get_one::<String>("recurrence").unwrap().parse()?;
    let until = sub
        .get_one::<String>("until")
        .map(|s| parse_date(s))
        .transpose()?;
    let memo = sub.get_one::<String>("memo").map(|s| s.to_string());

    anyhow::ensure!(
        recurrence != Recurrence::Once || until.is_none(),
        "--until requires a monthly or yearly recurrence"
    );
    if let Some(end) = until {
        anyhow::ensure!(
            end >= date,
            "End date {} is before the first occurrence {}",
            end,
            date
        );
    }

    let kind = category.transaction_type();
    conn.execute(
        "INSERT INTO transactions(title, amount, type, category, date, recurrence, recurrence_end_date, memo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            title,
            amount.to_string(),
            kind.as_str(),
            category.as_str(),
            date.to_string(),
            recurrence.as_str(),
            until.map(|d| d.to_string()),
            memo
        ],
    )?;
    println!(
        "Recorded {} '{}' of {} on {} ({})",
        kind.as_str(),
        title,
        amount,
        date,
        recurrence.as_str()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.title.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.recurrence.clone(),
                    r.until.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Title", "Type", "Category", "Amount", "Recurs", "Until"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        println!("No transaction with id {}", id);
    } else {
        println!("Removed transaction {}", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub recurrence: String,
    pub until: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT id, date, title, type, category, amount, recurrence, recurrence_end_date
         FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        sql.push_str(" AND type=?");
        params_vec.push(kind.into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let until: Option<String> = r.get(7)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            title: r.get(2)?,
            r#type: r.get(3)?,
            category: r.get(4)?,
            amount: r.get(5)?,
            recurrence: r.get(6)?,
            until: until.unwrap_or_default(),
        });
    }
    Ok(data)
}
