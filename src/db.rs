// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

use crate::models::{Campaign, Collaborator, Expense, Income};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Creatorcash", "creatorcash"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("creatorcash.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS collaborators(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        role TEXT,
        payment_type TEXT NOT NULL CHECK(payment_type IN ('fixed','percentage','hybrid')),
        base_amount INTEGER,
        percentage REAL,
        memo TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS incomes(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('platform','ad')),
        source TEXT,
        income_type TEXT,
        input_method TEXT,
        raw_count INTEGER,
        raw_amount INTEGER,
        commission_rate REAL,
        commission_amount INTEGER,
        withholding_tax INTEGER,
        amount INTEGER NOT NULL, -- net take-home, integer won
        date TEXT NOT NULL,
        memo TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_incomes_date ON incomes(date);

    CREATE TABLE IF NOT EXISTS campaigns(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand_name TEXT NOT NULL,
        amount INTEGER NOT NULL,
        payment_date TEXT,
        is_paid INTEGER NOT NULL DEFAULT 0,
        memo TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_campaigns_payment_date ON campaigns(payment_date);

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('collaborator','other')),
        collaborator_id INTEGER,
        description TEXT,
        amount INTEGER NOT NULL,
        date TEXT NOT NULL,
        is_paid INTEGER NOT NULL DEFAULT 0,
        memo TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(collaborator_id) REFERENCES collaborators(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
    "#,
    )?;
    Ok(())
}

/// Incomes whose date starts with `prefix` ("YYYY-MM" for a month,
/// "YYYY" for a year). Rows with malformed dates match no prefix, which
/// is exactly how the report engine treats them.
pub fn incomes_with_date_prefix(conn: &Connection, prefix: &str) -> Result<Vec<Income>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, source, income_type, input_method, raw_count, raw_amount,
                commission_rate, commission_amount, withholding_tax, amount, date, memo
         FROM incomes WHERE substr(date, 1, length(?1)) = ?1 ORDER BY date, id",
    )?;
    let mut rows = stmt.query([prefix])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(1)?;
        let source: Option<String> = r.get(2)?;
        let income_type: Option<String> = r.get(3)?;
        let input_method: Option<String> = r.get(4)?;
        data.push(Income {
            id: r.get(0)?,
            r#type: kind.parse()?,
            source: source.as_deref().map(|s| s.parse()).transpose()?,
            income_type: income_type.as_deref().map(|s| s.parse()).transpose()?,
            input_method: input_method.as_deref().map(|s| s.parse()).transpose()?,
            raw_count: r.get(5)?,
            raw_amount: r.get(6)?,
            commission_rate: r.get(7)?,
            commission_amount: r.get(8)?,
            withholding_tax: r.get(9)?,
            amount: r.get(10)?,
            date: r.get(11)?,
            memo: r.get(12)?,
        });
    }
    Ok(data)
}

/// Campaigns whose payment date starts with `prefix`. Rows without a
/// payment date belong to no window and are skipped here; `doctor`
/// surfaces them.
pub fn campaigns_with_date_prefix(conn: &Connection, prefix: &str) -> Result<Vec<Campaign>> {
    let mut stmt = conn.prepare(
        "SELECT id, brand_name, amount, payment_date, is_paid, memo
         FROM campaigns
         WHERE payment_date IS NOT NULL AND substr(payment_date, 1, length(?1)) = ?1
         ORDER BY payment_date, id",
    )?;
    let mut rows = stmt.query([prefix])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(Campaign {
            id: r.get(0)?,
            brand_name: r.get(1)?,
            amount: r.get(2)?,
            payment_date: r.get(3)?,
            is_paid: r.get(4)?,
            memo: r.get(5)?,
        });
    }
    Ok(data)
}

pub fn expenses_with_date_prefix(conn: &Connection, prefix: &str) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, collaborator_id, description, amount, date, is_paid, memo
         FROM expenses WHERE substr(date, 1, length(?1)) = ?1 ORDER BY date, id",
    )?;
    let mut rows = stmt.query([prefix])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(1)?;
        data.push(Expense {
            id: r.get(0)?,
            r#type: kind.parse()?,
            collaborator_id: r.get(2)?,
            description: r.get(3)?,
            amount: r.get(4)?,
            date: r.get(5)?,
            is_paid: r.get(6)?,
            memo: r.get(7)?,
        });
    }
    Ok(data)
}

pub fn all_collaborators(conn: &Connection) -> Result<Vec<Collaborator>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, role, payment_type, base_amount, percentage, memo
         FROM collaborators ORDER BY name",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let payment_type: String = r.get(3)?;
        data.push(Collaborator {
            id: r.get(0)?,
            name: r.get(1)?,
            role: r.get(2)?,
            payment_type: payment_type.parse()?,
            base_amount: r.get(4)?,
            percentage: r.get(5)?,
            memo: r.get(6)?,
        });
    }
    Ok(data)
}
