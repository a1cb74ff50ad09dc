// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::{self, CalculationResult};
use crate::models::{InputMethod, Platform, YoutubeIncomeType};
use crate::utils::{
    format_krw, maybe_print_json, parse_amount, parse_date, parse_month, parse_rate, pretty_table,
    resolve_chzzk_tier, resolve_custom_rate, resolve_soop_tier,
};
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// One fully-resolved entry ready to persist. Tip platforms entered by
/// raw count run the forward calculation; YouTube entries keep the
/// settled amount and store the reconstructed breakdown alongside it.
struct Entry {
    source: Platform,
    income_type: Option<YoutubeIncomeType>,
    input_method: InputMethod,
    raw_count: Option<i64>,
    breakdown: Option<CalculationResult>,
    amount: i64,
    date: String,
    memo: Option<String>,
}

fn entry_from_args(conn: &Connection, sub: &clap::ArgMatches) -> Result<Entry> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?.to_string();
    let source: Platform = sub.get_one::<String>("source").unwrap().parse()?;
    let memo = sub.get_one::<String>("memo").cloned();
    let count = sub.get_one::<i64>("count").copied();
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?;
    let rate = sub
        .get_one::<String>("rate")
        .map(|s| parse_rate(s))
        .transpose()?;

    let (income_type, input_method, raw_count, breakdown, amount) = match source {
        Platform::Soop if count.is_some() => {
            let tier = resolve_soop_tier(conn, sub.get_one::<String>("tier").map(|s| s.as_str()))?;
            let rate = resolve_custom_rate(conn, source, rate)?;
            let r = calc::soop_income(count.unwrap(), tier, rate)?;
            (None, InputMethod::RawCount, count, Some(r), r.net_amount)
        }
        Platform::Chzzk if count.is_some() => {
            let tier = resolve_chzzk_tier(conn, sub.get_one::<String>("tier").map(|s| s.as_str()))?;
            let rate = resolve_custom_rate(conn, source, rate)?;
            let r = calc::chzzk_income(count.unwrap(), tier, rate)?;
            (None, InputMethod::RawCount, count, Some(r), r.net_amount)
        }
        Platform::Youtube => {
            let net = amount.context("YouTube entries need --amount (the settled net)")?;
            let income_type: YoutubeIncomeType = sub
                .get_one::<String>("income-type")
                .context("YouTube entries need --income-type (ad|superchat|membership)")?
                .parse()?;
            let r = calc::youtube_income_from_net(net, income_type)?;
            (Some(income_type), InputMethod::Direct, None, Some(r), net)
        }
        _ => {
            if count.is_some() {
                bail!("--count only applies to soop and chzzk");
            }
            let net = amount.context("Direct entries need --amount")?;
            if net < 0 {
                bail!("Amount must be non-negative, got {}", net);
            }
            (None, InputMethod::Direct, None, None, net)
        }
    };

    Ok(Entry {
        source,
        income_type,
        input_method,
        raw_count,
        breakdown,
        amount,
        date,
        memo,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let e = entry_from_args(conn, sub)?;
    conn.execute(
        "INSERT INTO incomes(type, source, income_type, input_method, raw_count, raw_amount,
                             commission_rate, commission_amount, withholding_tax, amount, date, memo)
         VALUES ('platform', ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            e.source.as_str(),
            e.income_type.map(|t| t.as_str()),
            e.input_method.as_str(),
            e.raw_count,
            e.breakdown.map(|b| b.raw_amount),
            e.breakdown.map(|b| b.commission_rate),
            e.breakdown.map(|b| b.commission_amount),
            e.breakdown.map(|b| b.withholding_tax),
            e.amount,
            e.date,
            e.memo
        ],
    )?;
    describe(&e);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let e = entry_from_args(conn, sub)?;
    // Full replace: every column is rewritten from the new arguments.
    let n = conn.execute(
        "UPDATE incomes SET type='platform', source=?1, income_type=?2, input_method=?3,
                raw_count=?4, raw_amount=?5, commission_rate=?6, commission_amount=?7,
                withholding_tax=?8, amount=?9, date=?10, memo=?11
         WHERE id=?12",
        params![
            e.source.as_str(),
            e.income_type.map(|t| t.as_str()),
            e.input_method.as_str(),
            e.raw_count,
            e.breakdown.map(|b| b.raw_amount),
            e.breakdown.map(|b| b.commission_rate),
            e.breakdown.map(|b| b.commission_amount),
            e.breakdown.map(|b| b.withholding_tax),
            e.amount,
            e.date,
            e.memo,
            id
        ],
    )?;
    if n == 0 {
        bail!("Income #{} not found", id);
    }
    describe(&e);
    Ok(())
}

fn describe(e: &Entry) {
    match (&e.breakdown, e.raw_count) {
        (Some(b), Some(count)) => println!(
            "Recorded {} x{} on {}: gross {}, commission {}%, withholding {}, net {}",
            e.source,
            count,
            e.date,
            format_krw(b.raw_amount),
            b.commission_rate,
            format_krw(b.withholding_tax),
            format_krw(b.net_amount)
        ),
        (Some(b), None) => println!(
            "Recorded {} settlement of {} on {} (implied gross {}, commission {})",
            e.source,
            format_krw(e.amount),
            e.date,
            format_krw(b.raw_amount),
            format_krw(b.commission_amount)
        ),
        _ => println!(
            "Recorded {} income of {} on {}",
            e.source,
            format_krw(e.amount),
            e.date
        ),
    }
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
                    r.source.clone(),
                    r.raw_count.map(|c| c.to_string()).unwrap_or_default(),
                    format_krw(r.amount),
                    r.memo.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Source", "Units", "Net", "Memo"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub id: i64,
    pub date: String,
    pub source: String,
    pub raw_count: Option<i64>,
    pub amount: i64,
    pub memo: Option<String>,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<IncomeRow>> {
    let mut sql = String::from(
        "SELECT id, date, source, raw_count, amount, memo FROM incomes WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?;
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
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
        let source: Option<String> = r.get(2)?;
        data.push(IncomeRow {
            id: r.get(0)?,
            date: r.get(1)?,
            source: source.unwrap_or_default(),
            raw_count: r.get(3)?,
            amount: r.get(4)?,
            memo: r.get(5)?,
        });
    }
    Ok(data)
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM incomes WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Income #{} not found", id);
    }
    println!("Deleted income #{}", id);
    Ok(())
}
