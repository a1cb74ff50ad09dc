// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{format_krw, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};
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
    let brand = sub.get_one::<String>("brand").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    if amount < 0 {
        bail!("Amount must be non-negative, got {}", amount);
    }
    let payment_date = sub
        .get_one::<String>("payment-date")
        .map(|s| parse_date(s).map(|d| d.to_string()))
        .transpose()?;
    let paid = sub.get_flag("paid");
    let memo = sub.get_one::<String>("memo").cloned();

    conn.execute(
        "INSERT INTO campaigns(brand_name, amount, payment_date, is_paid, memo)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![brand, amount, payment_date, paid, memo],
    )?;
    println!(
        "Recorded campaign '{}' for {} ({})",
        brand,
        format_krw(amount),
        if paid { "deposited" } else { "awaiting deposit" }
    );
    Ok(())
}

#[derive(Serialize)]
struct CampaignRow {
    id: i64,
    brand_name: String,
    amount: i64,
    payment_date: Option<String>,
    is_paid: bool,
    memo: Option<String>,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let unpaid_only = sub.get_flag("unpaid");

    let mut sql = String::from(
        "SELECT id, brand_name, amount, payment_date, is_paid, memo FROM campaigns WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?;
        sql.push_str(" AND substr(payment_date,1,7)=?");
        params_vec.push(month.into());
    }
    if unpaid_only {
        sql.push_str(" AND is_paid=0");
    }
    sql.push_str(" ORDER BY payment_date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(CampaignRow {
            id: r.get(0)?,
            brand_name: r.get(1)?,
            amount: r.get(2)?,
            payment_date: r.get(3)?,
            is_paid: r.get(4)?,
            memo: r.get(5)?,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.brand_name.clone(),
                    format_krw(r.amount),
                    r.payment_date.clone().unwrap_or_default(),
                    if r.is_paid { "paid".into() } else { "pending".into() },
                    r.memo.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Brand", "Amount", "Payment date", "Status", "Memo"], rows)
        );
    }
    Ok(())
}

fn set_paid(conn: &Connection, sub: &clap::ArgMatches, paid: bool) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "UPDATE campaigns SET is_paid=?1 WHERE id=?2",
        params![paid, id],
    )?;
    if n == 0 {
        bail!("Campaign #{} not found", id);
    }
    println!(
        "Campaign #{} marked {}",
        id,
        if paid { "deposited" } else { "awaiting deposit" }
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM campaigns WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Campaign #{} not found", id);
    }
    println!("Deleted campaign #{}", id);
    Ok(())
}
