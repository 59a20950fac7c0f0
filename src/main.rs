//! data-validation: command-line front-end for cross-source data validation.
//!
//! Parses the command line, assembles typed configuration and dispatches to
//! the library's command handlers.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use data_validation::cli::{self, Cli, Commands, ConnectionsCommand};
use data_validation::config::{build_find_tables_config, build_run_config};
use data_validation::DataValidationError;
use std::error::Error as _;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match dispatch(&cli) {
        Ok(()) => Ok(()),
        Err(err) if err.is_usage() => usage_error(&err),
        Err(err) => Err(err.into()),
    }
}

fn dispatch(cli: &Cli) -> data_validation::Result<()> {
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Run(args) => {
            let config = build_run_config(args, cli.verbose, cli)?;
            cli::run_validation(&config, args.config_file.as_deref(), &mut stdout)
        }

        Commands::Connections { connect_cmd } => {
            let store = cli.connection_store()?;
            match connect_cmd {
                ConnectionsCommand::Add(args) => cli::run_connections_add(&store, args),
                ConnectionsCommand::List => cli::list_connections(&store, &mut stdout),
            }
        }

        Commands::FindTables(args) => {
            let config = build_find_tables_config(args, cli)?;
            cli::run_find_tables(&config, &mut stdout)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "data-validation", &mut stdout);
            Ok(())
        }
    }
}

/// Report a validation failure the way clap reports parse failures, then exit 2.
fn usage_error(err: &DataValidationError) -> ! {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    Cli::command().error(ErrorKind::ValueValidation, message).exit()
}
