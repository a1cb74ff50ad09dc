// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorcash::{cli, commands::campaign, commands::expense, db, report};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn sub_matches(args: &[&str], name: &str) -> clap::ArgMatches {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some((n, sub)) if n == name => sub.clone(),
        _ => panic!("no {} subcommand", name),
    }
}

#[test]
fn unpaid_campaigns_never_inflate_income() {
    let conn = setup();
    let m = sub_matches(
        &[
            "creatorcash",
            "campaign",
            "add",
            "--brand",
            "AcmeWater",
            "--amount",
            "2000000",
            "--payment-date",
            "2025-08-20",
        ],
        "campaign",
    );
    campaign::handle(&conn, &m).unwrap();

    let campaigns = db::campaigns_with_date_prefix(&conn, "2025-08").unwrap();
    assert_eq!(campaigns.len(), 1);
    assert!(!campaigns[0].is_paid);
    assert_eq!(report::total_income(&[], &campaigns), 0);

    let m = sub_matches(
        &["creatorcash", "campaign", "mark-paid", "--id", "1"],
        "campaign",
    );
    campaign::handle(&conn, &m).unwrap();

    let campaigns = db::campaigns_with_date_prefix(&conn, "2025-08").unwrap();
    assert_eq!(report::total_income(&[], &campaigns), 2_000_000);
}

#[test]
fn campaign_without_payment_date_belongs_to_no_window() {
    let conn = setup();
    let m = sub_matches(
        &[
            "creatorcash",
            "campaign",
            "add",
            "--brand",
            "NoDate",
            "--amount",
            "500000",
            "--paid",
        ],
        "campaign",
    );
    campaign::handle(&conn, &m).unwrap();
    assert!(db::campaigns_with_date_prefix(&conn, "2025").unwrap().is_empty());
}

#[test]
fn expense_paid_gating_flows_into_totals() {
    let conn = setup();
    for (amount, paid) in [("50000", true), ("30000", false), ("20000", true)] {
        let mut args = vec![
            "creatorcash",
            "expense",
            "add",
            "--amount",
            amount,
            "--date",
            "2025-08-05",
        ];
        if paid {
            args.push("--paid");
        }
        let m = sub_matches(&args, "expense");
        expense::handle(&conn, &m).unwrap();
    }
    let expenses = db::expenses_with_date_prefix(&conn, "2025-08").unwrap();
    assert_eq!(report::total_expense(&expenses), 70_000);

    // flipping one pending row moves the total
    let m = sub_matches(
        &["creatorcash", "expense", "mark-paid", "--id", "2"],
        "expense",
    );
    expense::handle(&conn, &m).unwrap();
    let expenses = db::expenses_with_date_prefix(&conn, "2025-08").unwrap();
    assert_eq!(report::total_expense(&expenses), 100_000);
}
