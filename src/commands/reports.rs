// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::Platform;
use crate::report::{self, AnnualReport};
use crate::utils::{
    current_month, format_krw, format_percent, maybe_print_json, parse_month, pretty_table,
    previous_month,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("annual", sub)) => annual(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Current month against the prior calendar month, each fetched on its
/// own. Distinct from the chained rates inside the annual report.
fn dashboard(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };
    let prev = previous_month(&month)?;

    let incomes = db::incomes_with_date_prefix(conn, &month)?;
    let campaigns = db::campaigns_with_date_prefix(conn, &month)?;
    let expenses = db::expenses_with_date_prefix(conn, &month)?;
    let prev_incomes = db::incomes_with_date_prefix(conn, &prev)?;
    let prev_campaigns = db::campaigns_with_date_prefix(conn, &prev)?;
    let prev_expenses = db::expenses_with_date_prefix(conn, &prev)?;

    let s = report::dashboard_summary(
        &incomes,
        &campaigns,
        &expenses,
        &prev_incomes,
        &prev_campaigns,
        &prev_expenses,
    );

    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec![
                "Income".to_string(),
                format_krw(s.total_income),
                format_percent(s.income_change_rate, true),
            ],
            vec![
                "Expense".to_string(),
                format_krw(s.total_expense),
                format_percent(s.expense_change_rate, true),
            ],
            vec![
                "Net".to_string(),
                format_krw(s.net_income),
                format_percent(s.change_rate, true),
            ],
            vec![
                format!("Net ({})", prev),
                format_krw(s.previous_month_net_income),
                String::new(),
            ],
        ];
        println!("{}", pretty_table(&[month.as_str(), "Amount", "MoM"], rows));
    }
    Ok(())
}

fn load_annual(conn: &Connection, year: i32) -> Result<AnnualReport> {
    let prefix = format!("{:04}", year);
    let incomes = db::incomes_with_date_prefix(conn, &prefix)?;
    let campaigns = db::campaigns_with_date_prefix(conn, &prefix)?;
    let expenses = db::expenses_with_date_prefix(conn, &prefix)?;
    let collaborators = db::all_collaborators(conn)?;
    Ok(report::build_annual_report(
        year,
        &incomes,
        &campaigns,
        &expenses,
        &collaborators,
    ))
}

fn monthly_rows(r: &AnnualReport) -> Vec<Vec<String>> {
    r.monthly_summaries
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                format_krw(m.total_income),
                format_krw(m.total_expense),
                format_krw(m.net_income),
                format_percent(m.change_rate, true),
            ]
        })
        .collect()
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let r = load_annual(conn, year)?;
    if !maybe_print_json(json_flag, jsonl_flag, &r.monthly_summaries)? {
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Expense", "Net", "MoM"],
                monthly_rows(&r)
            )
        );
    }
    Ok(())
}

fn annual(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let r = load_annual(conn, year)?;
    if maybe_print_json(json_flag, jsonl_flag, &r)? {
        return Ok(());
    }

    println!(
        "{}: income {}, expense {}, net {}",
        r.year,
        format_krw(r.total_income),
        format_krw(r.total_expense),
        format_krw(r.net_income)
    );

    let mut source_rows: Vec<Vec<String>> = Platform::ALL
        .iter()
        .map(|p| vec![p.to_string(), format_krw(r.income_by_source.get(*p))])
        .collect();
    source_rows.push(vec!["ad".to_string(), format_krw(r.income_by_source.ad)]);
    println!("{}", pretty_table(&["Source", "Income"], source_rows));

    if !r.expense_by_collaborator.is_empty() {
        let rows: Vec<Vec<String>> = r
            .expense_by_collaborator
            .iter()
            .map(|c| vec![c.name.clone(), format_krw(c.amount)])
            .collect();
        println!("{}", pretty_table(&["Collaborator", "Paid"], rows));
    }

    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Net", "MoM"],
            monthly_rows(&r)
        )
    );
    Ok(())
}
