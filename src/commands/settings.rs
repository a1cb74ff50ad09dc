// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ChzzkTier, Platform, SoopTier};
use crate::utils::{get_setting, parse_rate, pretty_table, set_setting, settings_platform};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("tier", sub)) => tier(conn, sub)?,
        Some(("rate", sub)) => rate(conn, sub)?,
        Some(("show", _)) => show(conn)?,
        _ => {}
    }
    Ok(())
}

fn tier(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let platform = settings_platform(sub.get_one::<String>("platform").unwrap())?;
    let tier = sub.get_one::<String>("tier").unwrap();
    // Validate against the right tier set before storing.
    match platform {
        Platform::Soop => {
            tier.parse::<SoopTier>()?;
        }
        _ => {
            tier.parse::<ChzzkTier>()?;
        }
    }
    set_setting(conn, &format!("{}_tier", platform), tier)?;
    println!("Default {} tier set to {}", platform, tier);
    Ok(())
}

fn rate(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let platform = settings_platform(sub.get_one::<String>("platform").unwrap())?;
    let key = format!("{}_rate", platform);
    if sub.get_flag("clear") {
        conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
        println!("Cleared custom {} commission rate", platform);
        return Ok(());
    }
    let Some(rate) = sub.get_one::<String>("rate") else {
        bail!("Provide --rate or --clear");
    };
    let rate = parse_rate(rate)?;
    if !(0.0..=100.0).contains(&rate) {
        bail!("Rate must be in 0..=100, got {}", rate);
    }
    set_setting(conn, &key, &rate.to_string())?;
    println!("Custom {} commission rate set to {}%", platform, rate);
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();
    for key in ["soop_tier", "soop_rate", "chzzk_tier", "chzzk_rate"] {
        if let Some(v) = get_setting(conn, key)? {
            rows.push(vec![key.to_string(), v]);
        }
    }
    if rows.is_empty() {
        println!("No defaults stored");
    } else {
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}
