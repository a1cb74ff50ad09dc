// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn with_output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON Lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("creatorcash")
        .about("Creator revenue, sponsorship, and payroll tracking (KRW)")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("income")
                .about("Platform revenue entries")
                .subcommand(
                    Command::new("add")
                        .about("Record a revenue entry")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .required(true)
                                .help("youtube|soop|chzzk|instagram|tiktok|other"),
                        )
                        .arg(
                            Arg::new("count")
                                .long("count")
                                .value_parser(value_parser!(i64))
                                .help("Raw tip units (balloons/cheese); computes the payout"),
                        )
                        .arg(Arg::new("amount").long("amount").help("Net amount in won (direct entry)"))
                        .arg(
                            Arg::new("tier")
                                .long("tier")
                                .help("SOOP: normal|best|partner, Chzzk: rookie|pro|partner"),
                        )
                        .arg(
                            Arg::new("income-type")
                                .long("income-type")
                                .help("YouTube only: ad|superchat|membership"),
                        )
                        .arg(Arg::new("rate").long("rate").help("Custom commission rate (percent)"))
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace an entry wholesale (no partial edits)")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .required(true)
                                .help("youtube|soop|chzzk|instagram|tiktok|other"),
                        )
                        .arg(
                            Arg::new("count")
                                .long("count")
                                .value_parser(value_parser!(i64))
                                .help("Raw tip units (balloons/cheese); computes the payout"),
                        )
                        .arg(Arg::new("amount").long("amount").help("Net amount in won (direct entry)"))
                        .arg(Arg::new("tier").long("tier"))
                        .arg(Arg::new("income-type").long("income-type"))
                        .arg(Arg::new("rate").long("rate").help("Custom commission rate (percent)"))
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(with_output_flags(
                    Command::new("list")
                        .about("List revenue entries")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").about("Delete an entry").arg(id_arg())),
        )
        .subcommand(
            Command::new("campaign")
                .about("Sponsorship/ad campaigns")
                .subcommand(
                    Command::new("add")
                        .about("Record a campaign deal")
                        .arg(Arg::new("brand").long("brand").required(true))
                        .arg(Arg::new("amount").long("amount").required(true).help("Agreed amount in won"))
                        .arg(Arg::new("payment-date").long("payment-date").help("Expected YYYY-MM-DD"))
                        .arg(
                            Arg::new("paid")
                                .long("paid")
                                .action(ArgAction::SetTrue)
                                .help("Already deposited"),
                        )
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(with_output_flags(
                    Command::new("list")
                        .about("List campaigns")
                        .arg(Arg::new("month").long("month").help("Filter by payment month YYYY-MM"))
                        .arg(
                            Arg::new("unpaid")
                                .long("unpaid")
                                .action(ArgAction::SetTrue)
                                .help("Only campaigns awaiting deposit"),
                        ),
                ))
                .subcommand(Command::new("mark-paid").about("Mark deposited").arg(id_arg()))
                .subcommand(Command::new("mark-unpaid").about("Revert to awaiting deposit").arg(id_arg()))
                .subcommand(Command::new("rm").about("Delete a campaign").arg(id_arg())),
        )
        .subcommand(
            Command::new("expense")
                .about("Payroll and other expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(Arg::new("amount").long("amount").required(true).help("Amount in won"))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("collaborator")
                                .long("collaborator")
                                .help("Collaborator name; makes this a payroll expense"),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("paid")
                                .long("paid")
                                .action(ArgAction::SetTrue)
                                .help("Already paid out"),
                        )
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(with_output_flags(
                    Command::new("list")
                        .about("List expenses")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(
                            Arg::new("unpaid")
                                .long("unpaid")
                                .action(ArgAction::SetTrue)
                                .help("Only expenses awaiting payout"),
                        ),
                ))
                .subcommand(Command::new("mark-paid").about("Mark paid out").arg(id_arg()))
                .subcommand(Command::new("mark-unpaid").about("Revert to pending").arg(id_arg()))
                .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg())),
        )
        .subcommand(
            Command::new("collaborator")
                .about("Collaborators and payroll terms")
                .subcommand(
                    Command::new("add")
                        .about("Register a collaborator")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("role").long("role").help("e.g. editor, thumbnail, manager"))
                        .arg(
                            Arg::new("payment-type")
                                .long("payment-type")
                                .required(true)
                                .help("fixed|percentage|hybrid"),
                        )
                        .arg(Arg::new("base").long("base").help("Fixed monthly amount in won"))
                        .arg(Arg::new("percentage").long("percentage").help("Share of period income (percent)"))
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(with_output_flags(Command::new("list").about("List collaborators")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a collaborator")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(with_output_flags(
                    Command::new("expected")
                        .about("Expected payroll from a month's realized income")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                )),
        )
        .subcommand(
            Command::new("calc")
                .about("Preview a settlement without recording anything")
                .subcommand(with_output_flags(
                    Command::new("soop")
                        .about("Balloon payout preview")
                        .arg(
                            Arg::new("count")
                                .long("count")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("tier").long("tier").help("normal|best|partner"))
                        .arg(Arg::new("rate").long("rate").help("Custom commission rate (percent)")),
                ))
                .subcommand(with_output_flags(
                    Command::new("chzzk")
                        .about("Cheese payout preview")
                        .arg(
                            Arg::new("count")
                                .long("count")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("tier").long("tier").help("rookie|pro|partner"))
                        .arg(Arg::new("rate").long("rate").help("Custom commission rate (percent)")),
                ))
                .subcommand(with_output_flags(
                    Command::new("youtube")
                        .about("Gross/commission breakdown from a settled amount")
                        .arg(Arg::new("amount").long("amount").required(true).help("Settled amount in won"))
                        .arg(
                            Arg::new("income-type")
                                .long("income-type")
                                .required(true)
                                .help("ad|superchat|membership"),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries and reports")
                .subcommand(with_output_flags(
                    Command::new("dashboard")
                        .about("This month vs the previous calendar month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                ))
                .subcommand(with_output_flags(
                    Command::new("monthly")
                        .about("Month-by-month summary for a year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        ),
                ))
                .subcommand(with_output_flags(
                    Command::new("annual")
                        .about("Full annual report")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export records")
                .subcommand(
                    Command::new("incomes")
                        .arg(Arg::new("format").long("format").default_value("csv").help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("expenses")
                        .arg(Arg::new("format").long("format").default_value("csv").help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Default tiers and commission rates")
                .subcommand(
                    Command::new("tier")
                        .about("Set the default tier for a tip platform")
                        .arg(Arg::new("platform").long("platform").required(true).help("soop|chzzk"))
                        .arg(Arg::new("tier").long("tier").required(true)),
                )
                .subcommand(
                    Command::new("rate")
                        .about("Set or clear a custom commission rate")
                        .arg(Arg::new("platform").long("platform").required(true).help("soop|chzzk"))
                        .arg(Arg::new("rate").long("rate").help("Percent; omit with --clear"))
                        .arg(Arg::new("clear").long("clear").action(ArgAction::SetTrue)),
                )
                .subcommand(Command::new("show").about("Show stored defaults")),
        )
        .subcommand(Command::new("doctor").about("Data quality checks"))
}
