// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("incomes", sub)) => export_incomes(conn, sub),
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn export_incomes(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT date, source, income_type, input_method, raw_count, raw_amount,
                commission_rate, commission_amount, withholding_tax, amount, memo
         FROM incomes ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<i64>>(4)?,
            r.get::<_, Option<i64>>(5)?,
            r.get::<_, Option<f64>>(6)?,
            r.get::<_, Option<i64>>(7)?,
            r.get::<_, Option<i64>>(8)?,
            r.get::<_, i64>(9)?,
            r.get::<_, Option<String>>(10)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "source",
                "income_type",
                "input_method",
                "raw_count",
                "raw_amount",
                "commission_rate",
                "commission_amount",
                "withholding_tax",
                "amount",
                "memo",
            ])?;
            for row in rows {
                let (d, src, ty, im, rc, ra, cr, ca, wt, amt, memo) = row?;
                wtr.write_record([
                    d,
                    src.unwrap_or_default(),
                    ty.unwrap_or_default(),
                    im.unwrap_or_default(),
                    rc.map(|v| v.to_string()).unwrap_or_default(),
                    ra.map(|v| v.to_string()).unwrap_or_default(),
                    cr.map(|v| v.to_string()).unwrap_or_default(),
                    ca.map(|v| v.to_string()).unwrap_or_default(),
                    wt.map(|v| v.to_string()).unwrap_or_default(),
                    amt.to_string(),
                    memo.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, src, ty, im, rc, ra, cr, ca, wt, amt, memo) = row?;
                items.push(json!({
                    "date": d, "source": src, "income_type": ty, "input_method": im,
                    "raw_count": rc, "raw_amount": ra, "commission_rate": cr,
                    "commission_amount": ca, "withholding_tax": wt, "amount": amt, "memo": memo
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported incomes to {}", out);
    Ok(())
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT e.date, e.type, c.name, e.description, e.amount, e.is_paid, e.memo
         FROM expenses e LEFT JOIN collaborators c ON e.collaborator_id=c.id
         ORDER BY e.date, e.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, i64>(4)?,
            r.get::<_, bool>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "collaborator",
                "description",
                "amount",
                "is_paid",
                "memo",
            ])?;
            for row in rows {
                let (d, ty, name, desc, amt, paid, memo) = row?;
                wtr.write_record([
                    d,
                    ty,
                    name.unwrap_or_default(),
                    desc.unwrap_or_default(),
                    amt.to_string(),
                    paid.to_string(),
                    memo.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, ty, name, desc, amt, paid, memo) = row?;
                items.push(json!({
                    "date": d, "type": ty, "collaborator": name, "description": desc,
                    "amount": amt, "is_paid": paid, "memo": memo
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported expenses to {}", out);
    Ok(())
}
