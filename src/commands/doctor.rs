// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Malformed dates: these rows silently fall out of every report
    //    window, so surface them here instead.
    let mut stmt = conn.prepare("SELECT id, date FROM incomes")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        if parse_date(&d).is_err() {
            rows.push(vec!["bad_income_date".into(), format!("#{} '{}'", id, d)]);
        }
    }
    let mut stmt2 = conn.prepare("SELECT id, date FROM expenses")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        if parse_date(&d).is_err() {
            rows.push(vec!["bad_expense_date".into(), format!("#{} '{}'", id, d)]);
        }
    }
    let mut stmt3 =
        conn.prepare("SELECT id, payment_date FROM campaigns WHERE payment_date IS NOT NULL")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        if parse_date(&d).is_err() {
            rows.push(vec!["bad_campaign_date".into(), format!("#{} '{}'", id, d)]);
        }
    }

    // 2) Campaigns without a payment date belong to no aggregation window.
    let mut stmt4 =
        conn.prepare("SELECT id, brand_name FROM campaigns WHERE payment_date IS NULL")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        let brand: String = r.get(1)?;
        rows.push(vec!["no_payment_date".into(), format!("#{} {}", id, brand)]);
    }

    // 3) Payroll rows that will render as "unspecified" in reports.
    let mut stmt5 = conn.prepare(
        "SELECT e.id FROM expenses e LEFT JOIN collaborators c ON e.collaborator_id=c.id
         WHERE e.type='collaborator' AND c.id IS NULL AND e.description IS NULL",
    )?;
    let mut cur5 = stmt5.query([])?;
    while let Some(r) = cur5.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["unlabeled_payroll".into(), format!("#{}", id)]);
    }

    // 4) Unpaid campaigns past their expected payment date.
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut stmt6 = conn.prepare(
        "SELECT id, brand_name, payment_date FROM campaigns
         WHERE is_paid=0 AND payment_date IS NOT NULL AND payment_date < ?1",
    )?;
    let mut cur6 = stmt6.query([&today])?;
    while let Some(r) = cur6.next()? {
        let id: i64 = r.get(0)?;
        let brand: String = r.get(1)?;
        let d: String = r.get(2)?;
        rows.push(vec![
            "overdue_campaign".into(),
            format!("#{} {} (due {})", id, brand, d),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
