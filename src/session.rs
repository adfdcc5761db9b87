//! Session script processing
//!
//! This module drives a complete run of the engine from a session script:
//! it streams operations from the CSV input, applies each one to a [`Ledger`],
//! and writes the final account states as CSV.
//!
//! # Error Handling
//!
//! Fatal errors (file not found, I/O errors) abort the run. Malformed rows
//! and operations rejected by the ledger (insufficient funds, locked
//! accounts, and so on) are logged and skipped; processing continues with the
//! next row. The final output reflects every operation that was accepted.
//!
//! # Memory Efficiency
//!
//! Operations are processed one at a time via the streaming reader; memory
//! usage is O(accounts + log entries), not O(script size).

use crate::core::Ledger;
use crate::io::csv_format::{write_accounts_csv, Operation};
use crate::io::session_reader::SessionReader;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Process a session script and write final account states
///
/// This function orchestrates the complete pipeline:
/// 1. Creates a SessionReader to stream operations from the CSV file
/// 2. Applies each operation to a fresh Ledger
/// 3. Writes the final account states to output as CSV
///
/// # Arguments
///
/// * `input_path` - Path to the session script
/// * `output` - Writer receiving the final account states
///
/// # Returns
///
/// * `Ok(())` if processing completed successfully
/// * `Err(LedgerError)` if a fatal error occurred
pub fn run_session(input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut ledger = Ledger::new();

    let reader = SessionReader::new(input_path)?;
    for result in reader {
        match result {
            Ok(operation) => {
                // Rejected operations leave the ledger unchanged; log and move on
                if let Err(error) = apply_operation(&mut ledger, &operation) {
                    warn!(%error, ?operation, "operation rejected");
                }
            }
            Err(error) => {
                warn!(%error, "skipping malformed record");
            }
        }
    }

    write_accounts_csv(&ledger.accounts(), output)
        .map_err(|message| LedgerError::IoError { message })
}

/// Apply one parsed operation to the ledger
///
/// # Errors
///
/// Propagates the ledger's rejection reason unchanged; see [`Ledger`] for
/// the per-operation error contracts.
pub fn apply_operation(ledger: &mut Ledger, operation: &Operation) -> Result<(), LedgerError> {
    match operation {
        Operation::Open {
            account,
            secret,
            initial_balance,
            kind,
        } => {
            ledger.create_account(*account, secret, *initial_balance, *kind)?;
        }
        Operation::Deposit { account, amount } => {
            ledger.deposit(*account, *amount)?;
        }
        Operation::Withdraw { account, amount } => {
            ledger.withdraw(*account, *amount)?;
        }
        Operation::Transfer {
            source,
            target,
            amount,
        } => {
            ledger.transfer(*source, *target, *amount)?;
        }
        Operation::ApplyInterest { account } => {
            ledger.apply_interest(*account)?;
        }
        Operation::Authenticate { account, secret } => {
            ledger.authenticate(*account, secret)?;
        }
        Operation::ChangeSecret {
            account,
            new_secret,
        } => {
            ledger.change_credential(*account, new_secret)?;
        }
    }
    Ok(())
}
