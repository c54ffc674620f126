// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EventCategory, EventColor};
use crate::utils::{maybe_print_json, parse_date, pretty_table};
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
    let category: EventCategory = sub.get_one::<String>("category").unwrap().parse()?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").map(|s| s.to_string());
    let color: EventColor = sub.get_one::<String>("color").unwrap().parse()?;
    let important = sub.get_flag("important");

    conn.execute(
        "INSERT INTO events(title, category, date, description, color, is_important)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            title,
            category.as_str(),
            date.to_string(),
            description,
            color.as_str(),
            important
        ],
    )?;
    println!("Added event '{}' on {} ({})", title, date, category.as_str());
    Ok(())
}

#[derive(Serialize)]
struct EventRow {
    id: i64,
    date: String,
    title: String,
    category: String,
    color: String,
    important: bool,
    description: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut sql = String::from(
        "SELECT id, date, title, category, color, is_important, description
         FROM events WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(cat) = sub.get_one::<String>("category") {
        cat.parse::<EventCategory>()?;
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY date, id");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        stmt.query(params![params_vec[0]])?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let description: Option<String> = r.get(6)?;
        data.push(EventRow {
            id: r.get(0)?,
            date: r.get(1)?,
            title: r.get(2)?,
            category: r.get(3)?,
            color: r.get(4)?,
            important: r.get(5)?,
            description: description.unwrap_or_default(),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.clone(),
                    if e.important { "*".into() } else { String::new() },
                    e.title.clone(),
                    e.category.clone(),
                    e.color.clone(),
                    e.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "!", "Title", "Category", "Color", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM events WHERE id=?1", params![id])?;
    if n == 0 {
        println!("No event with id {}", id);
    } else {
        println!("Removed event {}", id);
    }
    Ok(())
}
