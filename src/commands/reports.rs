// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{LifeEvent, LoanPayment, MonthSummary, Transaction};
use crate::recurrence::occurrences_in_month;
use crate::summary::{
    cumulative_balance, events_in_month, loan_payments_for_month, month_summary,
    multi_month_summaries,
};
use crate::utils::{fmt_amount, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, sub)?,
        Some(("year", sub)) => year(conn, sub)?,
        Some(("outlook", sub)) => outlook(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn today_year_month() -> (i32, u32) {
    let today = chrono::Utc::now().date_naive();
    (today.year(), today.month())
}

#[derive(Serialize)]
struct MonthReport {
    summary: MonthSummary,
    transactions: Vec<Transaction>,
    loan_payments: Vec<LoanPayment>,
    events: Vec<LifeEvent>,
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => today_year_month(),
    };

    let transactions = db::list_transactions(conn)?;
    let loans = db::list_loans(conn)?;
    let all_events = db::list_events(conn)?;

    let report = MonthReport {
        summary: month_summary(&transactions, &loans, year, month),
        transactions: occurrences_in_month(&transactions, year, month),
        loan_payments: loan_payments_for_month(&loans, year, month),
        events: events_in_month(&all_events, year, month),
    };

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    if !report.transactions.is_empty() {
        let rows: Vec<Vec<String>> = report
            .transactions
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.title.clone(),
                    t.category.as_str().into(),
                    t.r#type.as_str().into(),
                    fmt_amount(&t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Title", "Category", "Type", "Amount"], rows)
        );
    }

    if !report.loan_payments.is_empty() {
        let rows: Vec<Vec<String>> = report
            .loan_payments
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    p.loan_name.clone(),
                    p.month_number.to_string(),
                    fmt_amount(&p.principal),
                    fmt_amount(&p.interest),
                    fmt_amount(&p.total_payment),
                    fmt_amount(&p.remaining_principal),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Loan", "#", "Principal", "Interest", "Payment", "Remaining"],
                rows,
            )
        );
    }

    if !report.events.is_empty() {
        let rows: Vec<Vec<String>> = report
            .events
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    if e.is_important { "*".into() } else { String::new() },
                    e.title.clone(),
                    e.category.as_str().into(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "!", "Title", "Category"], rows)
        );
    }

    let s = &report.summary;
    println!(
        "{}-{:02}: income {} | expense {} | balance {}",
        s.year,
        s.month,
        fmt_amount(&s.total_income),
        fmt_amount(&s.total_expense),
        fmt_amount(&s.balance)
    );
    println!(
        "Cumulative balance through {}-{:02}: {}",
        year,
        month,
        fmt_amount(&cumulative_balance(&transactions, &loans, year, month))
    );
    Ok(())
}

fn year(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = match sub.get_one::<i32>("year") {
        Some(y) => *y,
        None => today_year_month().0,
    };

    let transactions = db::list_transactions(conn)?;
    let loans = db::list_loans(conn)?;
    let summaries = multi_month_summaries(&transactions, &loans, year, 1, 12);

    if maybe_print_json(json_flag, jsonl_flag, &summaries)? {
        return Ok(());
    }

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for s in &summaries {
        income += s.total_income;
        expense += s.total_expense;
        rows.push(vec![
            format!("{}-{:02}", s.year, s.month),
            fmt_amount(&s.total_income),
            fmt_amount(&s.total_expense),
            fmt_amount(&s.balance),
        ]);
    }
    rows.push(vec![
        "total".into(),
        fmt_amount(&income),
        fmt_amount(&expense),
        fmt_amount(&(income - expense)),
    ]);
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
    );
    Ok(())
}

#[derive(Serialize)]
struct YearOutlookRow {
    year: i32,
    total_income: Decimal,
    total_expense: Decimal,
    balance: Decimal,
    cumulative_balance: Decimal,
}

fn outlook(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let years = *sub.get_one::<u32>("years").unwrap();
    let from = match sub.get_one::<i32>("from") {
        Some(y) => *y,
        None => today_year_month().0,
    };

    let transactions = db::list_transactions(conn)?;
    let loans = db::list_loans(conn)?;
    let summaries = multi_month_summaries(&transactions, &loans, from, 1, years * 12);

    let mut cumulative = Decimal::ZERO;
    let mut data = Vec::new();
    for chunk in summaries.chunks(12) {
        let income: Decimal = chunk.iter().map(|s| s.total_income).sum();
        let expense: Decimal = chunk.iter().map(|s| s.total_expense).sum();
        cumulative += income - expense;
        data.push(YearOutlookRow {
            year: chunk[0].year,
            total_income: income,
            total_expense: expense,
            balance: income - expense,
            cumulative_balance: cumulative,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.year.to_string(),
                    fmt_amount(&r.total_income),
                    fmt_amount(&r.total_expense),
                    fmt_amount(&r.balance),
                    fmt_amount(&r.cumulative_balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Year", "Income", "Expense", "Balance", "Cumulative"],
                rows,
            )
        );
    }
    Ok(())
}
