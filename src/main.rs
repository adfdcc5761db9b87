//! Ledger Engine CLI
//!
//! Command-line interface for replaying banking session scripts against an
//! in-memory ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- session.csv > accounts.csv
//! cargo run -- -v session.csv > accounts.csv
//! RUST_LOG=debug cargo run -- session.csv > accounts.csv
//! ```
//!
//! The program reads operations from the input CSV file, applies them to a
//! fresh ledger in order, and outputs the final account states to stdout.
//! Rejected operations are logged on stderr and skipped.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use rust_ledger_engine::cli;
use rust_ledger_engine::session;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Initialize tracing; RUST_LOG overrides the -v derived filter.
    // Log events go to stderr so stdout stays clean for the CSV output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Replay the session script; output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = session::run_session(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
