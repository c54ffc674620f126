// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::amortization::{monthly_payment, payment_for_month, payment_schedule};
use crate::db;
use crate::models::RepaymentType;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("schedule", sub)) => schedule(conn, sub)?,
        Some(("remove", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let principal = parse_amount(sub.get_one::<String>("principal").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let repayment: RepaymentType = sub.get_one::<String>("type").unwrap().parse()?;
    let term = *sub.get_one::<u32>("term").unwrap();
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let payment_day = *sub.get_one::<u32>("payment-day").unwrap();
    let memo = sub.get_one::<String>("memo").map(|s| s.to_string());

    anyhow::ensure!(rate >= Decimal::ZERO, "Interest rate must not be negative");
    anyhow::ensure!(term >= 1, "Term must be at least 1 month");
    anyhow::ensure!(
        (1..=28).contains(&payment_day),
        "Payment day must be between 1 and 28"
    );

    conn.execute(
        "INSERT INTO loans(name, principal, interest_rate, repayment_type, term_months, start_date, payment_day, memo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            name,
            principal.to_string(),
            rate.to_string(),
            repayment.as_str(),
            term,
            start.to_string(),
            payment_day,
            memo
        ],
    )?;
    println!(
        "Registered loan '{}': {} at {}%/yr over {} months ({})",
        name,
        fmt_amount(&principal),
        rate,
        term,
        repayment.as_str()
    );
    Ok(())
}

#[derive(Serialize)]
struct LoanRow {
    id: i64,
    name: String,
    repayment_type: String,
    principal: String,
    rate: String,
    term_months: u32,
    start_date: String,
    payment: String,
    interest: String,
    remaining: String,
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

    let loans = db::list_loans(conn)?;
    let mut total_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_remaining = Decimal::ZERO;
    let mut data = Vec::new();
    for loan in &loans {
        let row = match payment_for_month(loan, year, month) {
            Some(p) => {
                total_payment += p.total_payment;
                total_interest += p.interest;
                total_remaining += p.remaining_principal;
                LoanRow {
                    id: loan.id,
                    name: loan.name.clone(),
                    repayment_type: loan.repayment_type.as_str().into(),
                    principal: fmt_amount(&loan.principal),
                    rate: format!("{}%", loan.interest_rate),
                    term_months: loan.term_months,
                    start_date: loan.start_date.to_string(),
                    payment: fmt_amount(&p.total_payment),
                    interest: fmt_amount(&p.interest),
                    remaining: fmt_amount(&p.remaining_principal),
                }
            }
            None => LoanRow {
                id: loan.id,
                name: loan.name.clone(),
                repayment_type: loan.repayment_type.as_str().into(),
                principal: fmt_amount(&loan.principal),
                rate: format!("{}%", loan.interest_rate),
                term_months: loan.term_months,
                start_date: loan.start_date.to_string(),
                payment: "-".into(),
                interest: "-".into(),
                remaining: "-".into(),
            },
        };
        data.push(row);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.repayment_type.clone(),
                    r.principal.clone(),
                    r.rate.clone(),
                    r.term_months.to_string(),
                    r.start_date.clone(),
                    r.payment.clone(),
                    r.interest.clone(),
                    r.remaining.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Name", "Type", "Principal", "Rate", "Term", "Start", "Payment",
                    "Interest", "Remaining",
                ],
                rows,
            )
        );
        println!(
            "{}-{:02}: payment {} | interest {} | remaining principal {}",
            year,
            month,
            fmt_amount(&total_payment),
            fmt_amount(&total_interest),
            fmt_amount(&total_remaining)
        );
    }
    Ok(())
}

fn schedule(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let id = *sub.get_one::<i64>("id").unwrap();

    let loans = db::list_loans(conn)?;
    let loan = loans
        .iter()
        .find(|l| l.id == id)
        .ok_or_else(|| anyhow::anyhow!("No loan with id {}", id))?;

    let entries = payment_schedule(loan);
    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        match loan.repayment_type {
            RepaymentType::EqualPrincipalInterest => println!(
                "{} ({} at {}%/yr), monthly payment {}",
                loan.name,
                loan.repayment_type.as_str(),
                loan.interest_rate,
                fmt_amount(&monthly_payment(
                    loan.principal,
                    loan.interest_rate,
                    loan.term_months
                ))
            ),
            _ => println!(
                "{} ({} at {}%/yr)",
                loan.name,
                loan.repayment_type.as_str(),
                loan.interest_rate
            ),
        }
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|p| {
                vec![
                    p.month_number.to_string(),
                    p.date.to_string(),
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
                &["#", "Date", "Principal", "Interest", "Payment", "Remaining"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM loans WHERE id=?1", params![id])?;
    if n == 0 {
        println!("No loan with id {}", id);
    } else {
        println!("Removed loan {}", id);
    }
    Ok(())
}
