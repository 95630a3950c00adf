// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! MetaLite CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands, QueryArgs};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // RUST_LOG can still raise this
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    // Handlers return errors unprinted; report each failure once
    if let Err(e) = run(cli.command) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Version => {
            println!("{} {}", "MetaLite".bold().green(), metalite::VERSION);
            println!("Data catalog query engine");
            Ok(())
        }

        Commands::Query {
            records,
            page,
            limit,
            search,
            tags,
            updated_since,
            format,
            config,
        } => cli::handle_query(QueryArgs {
            records,
            page,
            limit,
            search,
            tags,
            updated_since,
            format,
            config,
        }),

        Commands::Show {
            records,
            id,
            format,
        } => cli::handle_show(records, id, format),

        Commands::Tags { records } => cli::handle_tags(records),
    }
}
