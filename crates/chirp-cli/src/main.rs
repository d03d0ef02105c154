//! chirp - terminal client for the chirp micro-blogging service.
//!
//! A thin front end over `chirp-rest`: every subcommand resolves the stored
//! session, performs one user intent and renders the result.

mod cli;
mod commands;
mod output;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match commands::handle(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&describe(&e));
            ExitCode::FAILURE
        }
    }
}

/// The context chain, ending in the message a user can act on.
fn describe(e: &anyhow::Error) -> String {
    match e.downcast_ref::<chirp_core::Error>() {
        Some(err) => format!("{e}: {}", err.user_message()),
        None => format!("{e:#}"),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
