// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorcash::{cli, commands::income, db, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn income_matches(args: &[&str]) -> clap::ArgMatches {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some(("income", sub)) => sub.clone(),
        _ => panic!("no income subcommand"),
    }
}

#[test]
fn forward_calc_persists_full_breakdown() {
    let conn = setup();
    let m = income_matches(&[
        "creatorcash",
        "income",
        "add",
        "--date",
        "2025-08-10",
        "--source",
        "soop",
        "--count",
        "1000",
        "--tier",
        "normal",
    ]);
    income::handle(&conn, &m).unwrap();

    let (raw, rate, tax, amount): (i64, f64, i64, i64) = conn
        .query_row(
            "SELECT raw_amount, commission_rate, withholding_tax, amount FROM incomes",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(raw, 110_000);
    assert_eq!(rate, 40.0);
    assert_eq!(tax, 2_178);
    assert_eq!(amount, 63_822);
}

#[test]
fn stored_default_tier_and_rate_apply() {
    let conn = setup();
    utils::set_setting(&conn, "soop_tier", "partner").unwrap();
    utils::set_setting(&conn, "soop_rate", "20").unwrap();
    let m = income_matches(&[
        "creatorcash",
        "income",
        "add",
        "--date",
        "2025-08-10",
        "--source",
        "soop",
        "--count",
        "1000",
    ]);
    income::handle(&conn, &m).unwrap();

    // 110,000 gross at 20% commission: 88,000 - 2,904 withholding
    let amount: i64 = conn
        .query_row("SELECT amount FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(amount, 85_096);
}

#[test]
fn youtube_settlement_keeps_net_as_amount() {
    let conn = setup();
    let m = income_matches(&[
        "creatorcash",
        "income",
        "add",
        "--date",
        "2025-08-12",
        "--source",
        "youtube",
        "--amount",
        "55000",
        "--income-type",
        "ad",
    ]);
    income::handle(&conn, &m).unwrap();

    let (amount, raw, tax): (i64, i64, i64) = conn
        .query_row(
            "SELECT amount, raw_amount, withholding_tax FROM incomes",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(amount, 55_000);
    assert_eq!(raw, 100_000); // reconstructed gross, display only
    assert_eq!(tax, 0);
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    for i in 1..=3 {
        let m = income_matches(&[
            "creatorcash",
            "income",
            "add",
            "--date",
            &format!("2025-01-0{}", i),
            "--source",
            "other",
            "--amount",
            "10000",
        ]);
        income::handle(&conn, &m).unwrap();
    }
    let m = income_matches(&["creatorcash", "income", "list", "--limit", "2"]);
    if let Some(("list", list_m)) = m.subcommand() {
        let rows = income::query_rows(&conn, list_m).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2025-01-03");
    } else {
        panic!("no list subcommand");
    }
}

#[test]
fn edit_replaces_the_row_wholesale() {
    let conn = setup();
    let m = income_matches(&[
        "creatorcash",
        "income",
        "add",
        "--date",
        "2025-08-10",
        "--source",
        "soop",
        "--count",
        "1000",
        "--tier",
        "normal",
    ]);
    income::handle(&conn, &m).unwrap();
    let id: i64 = conn.query_row("SELECT id FROM incomes", [], |r| r.get(0)).unwrap();

    let m = income_matches(&[
        "creatorcash",
        "income",
        "edit",
        "--id",
        &id.to_string(),
        "--date",
        "2025-08-11",
        "--source",
        "other",
        "--amount",
        "42000",
    ]);
    income::handle(&conn, &m).unwrap();

    let (date, source, amount, raw): (String, String, i64, Option<i64>) = conn
        .query_row(
            "SELECT date, source, amount, raw_amount FROM incomes WHERE id=?1",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(date, "2025-08-11");
    assert_eq!(source, "other");
    assert_eq!(amount, 42_000);
    // the old breakdown does not linger after a replace
    assert_eq!(raw, None);
}

#[test]
fn rm_deletes_and_reports_missing() {
    let conn = setup();
    let m = income_matches(&[
        "creatorcash",
        "income",
        "add",
        "--date",
        "2025-08-10",
        "--source",
        "other",
        "--amount",
        "1000",
    ]);
    income::handle(&conn, &m).unwrap();

    let m = income_matches(&["creatorcash", "income", "rm", "--id", "1"]);
    income::handle(&conn, &m).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);

    let m = income_matches(&["creatorcash", "income", "rm", "--id", "1"]);
    assert!(income::handle(&conn, &m).is_err());
}
