// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{ChzzkTier, Platform, SoopTier};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

/// Amounts are integer won; no fractional input accepted.
pub fn parse_amount(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .with_context(|| format!("Invalid amount '{}', expected integer won", s))
}

pub fn parse_rate(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("Invalid rate '{}', expected percent", s))
}

pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

/// "2025-01" -> "2024-12".
pub fn previous_month(month: &str) -> Result<String> {
    let first = parse_date(&format!("{}-01", month))
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    let prev = first.pred_opt().context("Date out of range")?;
    Ok(format!("{}-{:02}", prev.year(), prev.month()))
}

/// ₩1,234,567 style, no fractional digits.
pub fn format_krw(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-₩{}", grouped)
    } else {
        format!("₩{}", grouped)
    }
}

/// Compact Korean-unit form: 1,234,567 -> "123.5만", 250,000,000 -> "2.5억".
pub fn format_krw_compact(amount: i64) -> String {
    if amount.abs() >= 100_000_000 {
        format!("{:.1}억", amount as f64 / 100_000_000.0)
    } else if amount.abs() >= 10_000 {
        format!("{:.1}만", amount as f64 / 10_000.0)
    } else {
        format_krw(amount)
    }
}

pub fn format_percent(value: f64, show_sign: bool) -> String {
    let sign = if show_sign && value > 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, value)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_collaborator(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM collaborators WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Collaborator '{}' not found", name))?;
    Ok(id)
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Tier from the command line, falling back to the stored default.
pub fn resolve_soop_tier(conn: &Connection, explicit: Option<&str>) -> Result<SoopTier> {
    let s = match explicit {
        Some(s) => s.to_string(),
        None => get_setting(conn, "soop_tier")?
            .context("No tier given and no default set (see 'settings tier')")?,
    };
    Ok(s.parse()?)
}

pub fn resolve_chzzk_tier(conn: &Connection, explicit: Option<&str>) -> Result<ChzzkTier> {
    let s = match explicit {
        Some(s) => s.to_string(),
        None => get_setting(conn, "chzzk_tier")?
            .context("No tier given and no default set (see 'settings tier')")?,
    };
    Ok(s.parse()?)
}

/// Custom commission rate: the command line wins, then the stored
/// per-platform override, then none (tier default applies).
pub fn resolve_custom_rate(
    conn: &Connection,
    platform: Platform,
    explicit: Option<f64>,
) -> Result<Option<f64>> {
    if explicit.is_some() {
        return Ok(explicit);
    }
    match get_setting(conn, &format!("{}_rate", platform))? {
        Some(s) => Ok(Some(parse_rate(&s)?)),
        None => Ok(None),
    }
}

pub fn settings_platform(s: &str) -> Result<Platform> {
    let platform: Platform = s.parse()?;
    match platform {
        Platform::Soop | Platform::Chzzk => Ok(platform),
        _ => bail!("Only soop and chzzk carry tier/rate defaults"),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
