//! sbtup - dependency version patcher CLI for sbt build definitions

use clap::Parser;
use sbtup::cli::CliArgs;
use sbtup::logging;
use sbtup::orchestrator::Orchestrator;
use sbtup::output::create_formatter;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sbtup starting");

    let formatter = create_formatter(&args);
    let list_only = args.list;
    let orchestrator = Orchestrator::new(args)?;
    let mut stdout = io::stdout().lock();

    if list_only {
        let (listings, errors) = orchestrator.list();
        formatter.format_listing(&listings, &mut stdout)?;
        stdout.flush()?;
        for error in &errors {
            eprintln!("Error: {}", error);
        }
        return Ok(if errors.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(2)
        });
    }

    let result = orchestrator.run();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    for error in &result.errors {
        eprintln!("Error: {}", error);
    }

    // Errors and refused patches both leave work undone
    if !result.errors.is_empty() || result.has_conflicts() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
