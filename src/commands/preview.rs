// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! `calc`: the live settlement preview shown before anything is saved.

use crate::calc::{self, CalculationResult};
use crate::models::{Platform, YoutubeIncomeType};
use crate::utils::{
    format_krw, maybe_print_json, parse_amount, parse_rate, pretty_table, resolve_chzzk_tier,
    resolve_custom_rate, resolve_soop_tier,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("soop", sub)) => soop(conn, sub)?,
        Some(("chzzk", sub)) => chzzk(conn, sub)?,
        Some(("youtube", sub)) => youtube(sub)?,
        _ => {}
    }
    Ok(())
}

fn soop(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let count = *sub.get_one::<i64>("count").unwrap();
    let tier = resolve_soop_tier(conn, sub.get_one::<String>("tier").map(|s| s.as_str()))?;
    let rate = sub
        .get_one::<String>("rate")
        .map(|s| parse_rate(s))
        .transpose()?;
    let rate = resolve_custom_rate(conn, Platform::Soop, rate)?;
    print_result(sub, &calc::soop_income(count, tier, rate)?)
}

fn chzzk(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let count = *sub.get_one::<i64>("count").unwrap();
    let tier = resolve_chzzk_tier(conn, sub.get_one::<String>("tier").map(|s| s.as_str()))?;
    let rate = sub
        .get_one::<String>("rate")
        .map(|s| parse_rate(s))
        .transpose()?;
    let rate = resolve_custom_rate(conn, Platform::Chzzk, rate)?;
    print_result(sub, &calc::chzzk_income(count, tier, rate)?)
}

fn youtube(sub: &clap::ArgMatches) -> Result<()> {
    let net = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let income_type: YoutubeIncomeType = sub.get_one::<String>("income-type").unwrap().parse()?;
    print_result(sub, &calc::youtube_income_from_net(net, income_type)?)
}

fn print_result(sub: &clap::ArgMatches, r: &CalculationResult) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, r)? {
        let rows = vec![
            vec!["Gross".to_string(), format_krw(r.raw_amount)],
            vec![
                format!("Commission ({}%)", r.commission_rate),
                format_krw(r.commission_amount),
            ],
            vec!["Withholding (3.3%)".to_string(), format_krw(r.withholding_tax)],
            vec!["Net".to_string(), format_krw(r.net_amount)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}
