mod checks;

use anyhow::{Context, Result};
use clap::Parser;
use netdef_error_reporting::NetdefError;
use netdef_yaml::{SourceUnit, parse};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Check a network definition file
#[derive(Parser, Debug)]
#[command(name = "validate-netdef")]
#[command(about = "Check network definition files and print located errors", long_about = None)]
struct Args {
    /// Path to the network definition to check
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print errors as JSON, including the numeric error code
    #[arg(long)]
    json: bool,

    /// Do not print anything on success
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "validate_netdef=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the definition is valid.
fn run() -> Result<bool> {
    let args = Args::parse();

    let unit = SourceUnit::read(&args.input).context("Could not load network definition")?;

    let root = match parse(&unit) {
        Ok(root) => root,
        Err(netdef_yaml::Error::Invalid(error)) => {
            display_error(&error, args.json)?;
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    if let Err(error) = checks::check(&unit, &root) {
        display_error(&error, args.json)?;
        return Ok(false);
    }

    tracing::debug!(path = %args.input.display(), "Definition passed all checks");
    if !args.quiet {
        println!("✓ {}: network definition is valid", args.input.display());
    }
    Ok(true)
}

/// Print an error exactly as formatted, or as JSON.
fn display_error(error: &NetdefError, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(&error.to_json())?;
        eprintln!("{text}");
    } else {
        eprintln!("{error}");
    }
    Ok(())
}
