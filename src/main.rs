mod aggregate;
mod cli;
mod error;
mod extremes;
mod parquet;
mod reading;
mod report;
mod stats;

use std::process;

use anyhow::Result;
use clap::Parser;
use cli::{command, Cli, Commands};
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(message) => println!("{}", message),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Runs one command and returns the line to print on success.
fn run(command: Commands) -> Result<String> {
    match command {
        Commands::Report {
            input,
            output,
            highlights,
        } => {
            let path = command::report(&input.into_options(output, highlights))?;
            Ok(format!("Report saved to `{}`", path.display()))
        }
        Commands::Summary { input } => command::summary(&input.into_options(None, vec![])),
        Commands::Export { input, output } => {
            let dir = command::export(&input.into_options(output, vec![]))?;
            Ok(format!("Files saved to `{}`", dir.display()))
        }
    }
}

// -- Tests -------------------------------------------------------------------
