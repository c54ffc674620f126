// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::models::{Asset, LifeEvent, Loan, Transaction};
use crate::utils::parse_date;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Lifeclip", "lifeclip"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("lifeclip.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        date TEXT NOT NULL,
        recurrence TEXT NOT NULL DEFAULT 'once' CHECK(recurrence IN ('once','monthly','yearly')),
        recurrence_end_date TEXT,
        memo TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS loans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        principal TEXT NOT NULL,
        interest_rate TEXT NOT NULL,
        repayment_type TEXT NOT NULL
            CHECK(repayment_type IN ('equal_principal_interest','equal_principal','bullet')),
        term_months INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        payment_day INTEGER NOT NULL,
        memo TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_loans_start_date ON loans(start_date);

    CREATE TABLE IF NOT EXISTS assets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category TEXT NOT NULL
            CHECK(category IN ('real_estate','vehicle','savings','investment','other_asset')),
        current_value TEXT NOT NULL,
        purchase_value TEXT,
        purchase_date TEXT,
        description TEXT,
        memo TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_assets_category ON assets(category);

    CREATE TABLE IF NOT EXISTS events(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        date TEXT NOT NULL,
        description TEXT,
        color TEXT NOT NULL DEFAULT 'blue',
        is_important INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
    "#,
    )?;
    Ok(())
}

/// Snapshot of every stored transaction. The computation layer only ever
/// reads these loaded values; it never touches the connection.
pub fn list_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, amount, type, category, date, recurrence, recurrence_end_date, memo
         FROM transactions ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let amount_s: String = r.get(2)?;
        let type_s: String = r.get(3)?;
        let category_s: String = r.get(4)?;
        let date_s: String = r.get(5)?;
        let recurrence_s: String = r.get(6)?;
        let end_s: Option<String> = r.get(7)?;
        data.push(Transaction {
            id,
            title: r.get(1)?,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' for transaction {}", amount_s, id))?,
            r#type: type_s
                .parse()
                .with_context(|| format!("Bad row for transaction {}", id))?,
            category: category_s
                .parse()
                .with_context(|| format!("Bad row for transaction {}", id))?,
            date: parse_date(&date_s)?,
            recurrence: recurrence_s
                .parse()
                .with_context(|| format!("Bad row for transaction {}", id))?,
            recurrence_end_date: end_s.as_deref().map(parse_date).transpose()?,
            memo: r.get(8)?,
        });
    }
    Ok(data)
}

pub fn list_loans(conn: &Connection) -> Result<Vec<Loan>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, principal, interest_rate, repayment_type, term_months, start_date,
                payment_day, memo
         FROM loans ORDER BY start_date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let principal_s: String = r.get(2)?;
        let rate_s: String = r.get(3)?;
        let repayment_s: String = r.get(4)?;
        let start_s: String = r.get(6)?;
        data.push(Loan {
            id,
            name: r.get(1)?,
            principal: principal_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid principal '{}' for loan {}", principal_s, id))?,
            interest_rate: rate_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid interest rate '{}' for loan {}", rate_s, id))?,
            repayment_type: repayment_s
                .parse()
                .with_context(|| format!("Bad row for loan {}", id))?,
            term_months: r.get(5)?,
            start_date: parse_date(&start_s)?,
            payment_day: r.get(7)?,
            memo: r.get(8)?,
        });
    }
    Ok(data)
}

pub fn list_assets(conn: &Connection) -> Result<Vec<Asset>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, current_value, purchase_value, purchase_date, description, memo
         FROM assets ORDER BY category, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let category_s: String = r.get(2)?;
        let current_s: String = r.get(3)?;
        let purchase_s: Option<String> = r.get(4)?;
        let purchase_date_s: Option<String> = r.get(5)?;
        data.push(Asset {
            id,
            name: r.get(1)?,
            category: category_s
                .parse()
                .with_context(|| format!("Bad row for asset {}", id))?,
            current_value: current_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid value '{}' for asset {}", current_s, id))?,
            purchase_value: purchase_s
                .as_deref()
                .map(|s| {
                    s.parse::<Decimal>().with_context(|| {
                        format!("Invalid purchase value '{}' for asset {}", s, id)
                    })
                })
                .transpose()?,
            purchase_date: purchase_date_s.as_deref().map(parse_date).transpose()?,
            description: r.get(6)?,
            memo: r.get(7)?,
        });
    }
    Ok(data)
}

pub fn list_events(conn: &Connection) -> Result<Vec<LifeEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, category, date, description, color, is_important
         FROM events ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let category_s: String = r.get(2)?;
        let date_s: String = r.get(3)?;
        let color_s: String = r.get(5)?;
        data.push(LifeEvent {
            id,
            title: r.get(1)?,
            category: category_s
                .parse()
                .with_context(|| format!("Bad row for event {}", id))?,
            date: parse_date(&date_s)?,
            description: r.get(4)?,
            color: color_s
                .parse()
                .with_context(|| format!("Bad row for event {}", id))?,
            is_important: r.get(6)?,
        });
    }
    Ok(data)
}
