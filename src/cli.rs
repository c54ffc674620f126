// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn output_flags(cmd: Command) -> Command {
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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("lifeclip")
        .about("Personal finance timeline: income, expenses, loans, and life events")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("tx")
                .about("Manage income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("One of the fixed categories; determines income vs expense"),
                        )
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("recurrence")
                                .long("recurrence")
                                .default_value("once")
                                .help("once, monthly, or yearly"),
                        )
                        .arg(
                            Arg::new("until")
                                .long("until")
                                .help("Last date a recurrence may fire (YYYY-MM-DD)"),
                        )
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List stored transactions")
                        .arg(Arg::new("month").long("month").help("Filter by anchor month YYYY-MM"))
                        .arg(Arg::new("type").long("type").help("income or expense"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("remove").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("loan")
                .about("Manage amortizing loans")
                .subcommand(
                    Command::new("add")
                        .about("Register a loan")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("principal").long("principal").required(true))
                        .arg(Arg::new("rate").long("rate").required(true).help("Annual rate in percent"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("equal_principal_interest, equal_principal, or bullet"),
                        )
                        .arg(
                            Arg::new("term")
                                .long("term")
                                .required(true)
                                .value_parser(value_parser!(u32))
                                .help("Number of monthly payments"),
                        )
                        .arg(Arg::new("start").long("start").required(true).help("First payment month YYYY-MM-DD"))
                        .arg(
                            Arg::new("payment-day")
                                .long("payment-day")
                                .value_parser(value_parser!(u32))
                                .default_value("25")
                                .help("Day of month the payment posts (1-28)"),
                        )
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List loans with the current month's payment state")
                        .arg(Arg::new("month").long("month").help("As-of month YYYY-MM, default today")),
                ))
                .subcommand(output_flags(
                    Command::new("schedule")
                        .about("Print the full amortization schedule for one loan")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ))
                .subcommand(
                    Command::new("remove").about("Delete a loan").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("asset")
                .about("Manage owned assets and net worth")
                .subcommand(
                    Command::new("add")
                        .about("Register an asset")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("other_asset")
                                .help("real_estate, vehicle, savings, investment, or other_asset"),
                        )
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .help("Current value"),
                        )
                        .arg(
                            Arg::new("purchase-value")
                                .long("purchase-value")
                                .help("Value at acquisition"),
                        )
                        .arg(
                            Arg::new("acquired")
                                .long("acquired")
                                .help("Acquisition date YYYY-MM-DD"),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List assets with totals and net worth")
                        .arg(Arg::new("month").long("month").help("As-of month YYYY-MM for loan balances, default today")),
                ))
                .subcommand(
                    Command::new("remove").about("Delete an asset").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("event")
                .about("Manage life events on the timeline")
                .subcommand(
                    Command::new("add")
                        .about("Record a life event")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("other")
                                .help("housing, contract, career, family, education, or other"),
                        )
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .default_value("blue")
                                .help("red, orange, yellow, green, blue, purple, or pink"),
                        )
                        .arg(
                            Arg::new("important")
                                .long("important")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List life events")
                        .arg(Arg::new("category").long("category")),
                ))
                .subcommand(
                    Command::new("remove").about("Delete a life event").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Timeline reports computed from the stored entities")
                .subcommand(output_flags(
                    Command::new("month")
                        .about("One month: transactions, loan payments, events, summary")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default today")),
                ))
                .subcommand(output_flags(
                    Command::new("year")
                        .about("Twelve month summaries plus totals")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Calendar year, default today's"),
                        ),
                ))
                .subcommand(output_flags(
                    Command::new("outlook")
                        .about("Per-year rollups over a multi-year horizon")
                        .arg(
                            Arg::new("years")
                                .long("years")
                                .value_parser(value_parser!(u32))
                                .default_value("30"),
                        )
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .value_parser(value_parser!(i32))
                                .help("First year, default today's"),
                        ),
                )),
        )
        .subcommand(Command::new("doctor").about("Check stored rows against the entry invariants"))
}
