// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    format_krw, id_for_collaborator, maybe_print_json, parse_amount, parse_date, parse_month,
    pretty_table,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("mark-paid", sub)) => set_paid(conn, sub, true)?,
        Some(("mark-unpaid", sub)) => set_paid(conn, sub, false)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    if amount < 0 {
        bail!("Amount must be non-negative, got {}", amount);
    }
    let date = parse_date(sub.get_one::<String>("date").unwrap())?.to_string();
    let description = sub.get_one::<String>("description").cloned();
    let paid = sub.get_flag("paid");
    let memo = sub.get_one::<String>("memo").cloned();

    // A named collaborator makes this payroll; anything else is "other".
    let collaborator_id = sub
        .get_one::<String>("collaborator")
        .map(|name| id_for_collaborator(conn, name))
        .transpose()?;
    let kind = if collaborator_id.is_some() {
        "collaborator"
    } else {
        "other"
    };

    conn.execute(
        "INSERT INTO expenses(type, collaborator_id, description, amount, date, is_paid, memo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![kind, collaborator_id, description, amount, date, paid, memo],
    )?;
    println!(
        "Recorded {} expense of {} on {} ({})",
        kind,
        format_krw(amount),
        date,
        if paid { "paid" } else { "pending" }
    );
    Ok(())
}

#[derive(Serialize)]
struct ExpenseRow {
    id: i64,
    date: String,
    r#type: String,
    collaborator: Option<String>,
    description: Option<String>,
    amount: i64,
    is_paid: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let unpaid_only = sub.get_flag("unpaid");

    let mut sql = String::from(
        "SELECT e.id, e.date, e.type, c.name, e.description, e.amount, e.is_paid
         FROM expenses e LEFT JOIN collaborators c ON e.collaborator_id=c.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?;
        sql.push_str(" AND substr(e.date,1,7)=?");
        params_vec.push(month.into());
    }
    if unpaid_only {
        sql.push_str(" AND e.is_paid=0");
    }
    sql.push_str(" ORDER BY e.date DESC, e.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(ExpenseRow {
            id: r.get(0)?,
            date: r.get(1)?,
            r#type: r.get(2)?,
            collaborator: r.get(3)?,
            description: r.get(4)?,
            amount: r.get(5)?,
            is_paid: r.get(6)?,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.collaborator
                        .clone()
                        .or_else(|| r.description.clone())
                        .unwrap_or_default(),
                    format_krw(r.amount),
                    if r.is_paid { "paid".into() } else { "pending".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Payee", "Amount", "Status"], rows)
        );
    }
    Ok(())
}

fn set_paid(conn: &Connection, sub: &clap::ArgMatches, paid: bool) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "UPDATE expenses SET is_paid=?1 WHERE id=?2",
        params![paid, id],
    )?;
    if n == 0 {
        bail!("Expense #{} not found", id);
    }
    println!("Expense #{} marked {}", id, if paid { "paid" } else { "pending" });
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Expense #{} not found", id);
    }
    println!("Deleted expense #{}", id);
    Ok(())
}
