// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorcash::{cli, commands::exporter, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO incomes(type, source, input_method, amount, date, memo)
         VALUES ('platform','soop','direct',63822,'2025-08-10','august balloons')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO collaborators(name, payment_type, base_amount) VALUES ('editor-kim','fixed',300000)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(type, collaborator_id, amount, date, is_paid)
         VALUES ('collaborator',1,300000,'2025-08-25',1)",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn export_incomes_csv() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("incomes.csv");
    let out_str = out.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "creatorcash",
        "export",
        "incomes",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    if let Some(("export", sub)) = matches.subcommand() {
        exporter::handle(&conn, sub).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let body = std::fs::read_to_string(&out).unwrap();
    let mut lines = body.lines();
    assert!(lines.next().unwrap().starts_with("date,source,income_type"));
    let row = lines.next().unwrap();
    assert!(row.contains("2025-08-10"));
    assert!(row.contains("soop"));
    assert!(row.contains("63822"));
}

#[test]
fn export_expenses_json_resolves_collaborator_name() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("expenses.json");
    let out_str = out.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "creatorcash",
        "export",
        "expenses",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", sub)) = matches.subcommand() {
        exporter::handle(&conn, sub).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let body = std::fs::read_to_string(&out).unwrap();
    let items: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(items[0]["collaborator"], "editor-kim");
    assert_eq!(items[0]["amount"], 300000);
    assert_eq!(items[0]["is_paid"], true);
}
