// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Collaborator, PaymentType};
use crate::report;
use crate::utils::{
    current_month, format_krw, maybe_print_json, parse_amount, parse_month, parse_rate,
    pretty_table,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("expected", sub)) => expected(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let role = sub.get_one::<String>("role").cloned();
    let payment_type: PaymentType = sub.get_one::<String>("payment-type").unwrap().parse()?;
    let base = sub
        .get_one::<String>("base")
        .map(|s| parse_amount(s))
        .transpose()?;
    let percentage = sub
        .get_one::<String>("percentage")
        .map(|s| parse_rate(s))
        .transpose()?;
    let memo = sub.get_one::<String>("memo").cloned();

    match payment_type {
        PaymentType::Fixed if base.is_none() => bail!("fixed payment needs --base"),
        PaymentType::Percentage if percentage.is_none() => bail!("percentage payment needs --percentage"),
        PaymentType::Hybrid if base.is_none() || percentage.is_none() => {
            bail!("hybrid payment needs --base and --percentage")
        }
        _ => {}
    }
    if let Some(p) = percentage {
        if !(0.0..=100.0).contains(&p) {
            bail!("Percentage must be in 0..=100, got {}", p);
        }
    }

    conn.execute(
        "INSERT INTO collaborators(name, role, payment_type, base_amount, percentage, memo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![name, role, payment_type.as_str(), base, percentage, memo],
    )?;
    println!("Registered collaborator '{}' ({})", name, payment_type);
    Ok(())
}

/// Human description of the payroll terms, e.g. "₩300,000 + 5%".
fn terms(c: &Collaborator) -> String {
    match c.payment_type {
        PaymentType::Fixed => match c.base_amount {
            Some(base) => format!("{}/month", format_krw(base)),
            None => "fixed".to_string(),
        },
        PaymentType::Percentage => match c.percentage {
            Some(p) => format!("{}% of income", p),
            None => "revenue share".to_string(),
        },
        PaymentType::Hybrid => match (c.base_amount, c.percentage) {
            (Some(base), Some(p)) => format!("{} + {}%", format_krw(base), p),
            _ => "fixed + revenue share".to_string(),
        },
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = db::all_collaborators(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.role.clone().unwrap_or_default(),
                    terms(c),
                    c.memo.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Role", "Terms", "Memo"], rows));
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let n = conn.execute("DELETE FROM collaborators WHERE name=?1", params![name])?;
    if n == 0 {
        bail!("Collaborator '{}' not found", name);
    }
    println!("Removed collaborator '{}'", name);
    Ok(())
}

#[derive(Serialize)]
struct ExpectedRow {
    name: String,
    terms: String,
    expected: i64,
}

/// Projects payroll from a month's realized income. Purely a preview;
/// nothing is persisted until an expense is actually recorded.
fn expected(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };

    let incomes = db::incomes_with_date_prefix(conn, &month)?;
    let campaigns = db::campaigns_with_date_prefix(conn, &month)?;
    let month_income = report::total_income(&incomes, &campaigns);

    let data: Vec<ExpectedRow> = db::all_collaborators(conn)?
        .iter()
        .map(|c| ExpectedRow {
            name: c.name.clone(),
            terms: terms(c),
            expected: report::collaborator_expected_expense(c, month_income),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("Realized income for {}: {}", month, format_krw(month_income));
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.name.clone(), r.terms.clone(), format_krw(r.expected)])
            .collect();
        println!("{}", pretty_table(&["Name", "Terms", "Expected"], rows));
    }
    Ok(())
}
