//! CSV format handling for session scripts and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain operations
//! - Account state output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Session script format
//!
//! Columns: `op,account,target,amount,secret,kind`. The `target`, `amount`,
//! `secret` and `kind` columns are required or ignored depending on the
//! operation:
//!
//! | op       | target | amount | secret | kind |
//! |----------|--------|--------|--------|------|
//! | open     |   -    |  yes   |  yes   | yes  |
//! | deposit  |   -    |  yes   |   -    |  -   |
//! | withdraw |   -    |  yes   |   -    |  -   |
//! | transfer |  yes   |  yes   |   -    |  -   |
//! | interest |   -    |   -    |   -    |  -   |
//! | auth     |   -    |   -    |  yes   |  -   |
//! | passwd   |   -    |   -    |  yes   |  -   |

use crate::types::{Account, AccountKind, AccountNumber};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the session script format with columns:
/// op, account, target, amount, secret, kind. All columns past the account
/// number are optional at the CSV level; presence requirements depend on the
/// operation and are enforced during conversion.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub account: AccountNumber,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// One parsed session-script operation
///
/// The domain-facing form of a [`CsvRecord`]: amounts are decimals, the
/// account kind is typed and required fields are guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Open a new account with an opening balance
    Open {
        account: AccountNumber,
        secret: String,
        initial_balance: Decimal,
        kind: AccountKind,
    },
    /// Credit funds to an account
    Deposit {
        account: AccountNumber,
        amount: Decimal,
    },
    /// Debit funds from an account
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
    },
    /// Move funds between two accounts
    Transfer {
        source: AccountNumber,
        target: AccountNumber,
        amount: Decimal,
    },
    /// Accrue one month of interest
    ApplyInterest { account: AccountNumber },
    /// Check a secret against the account credential
    Authenticate {
        account: AccountNumber,
        secret: String,
    },
    /// Replace the account credential
    ChangeSecret {
        account: AccountNumber,
        new_secret: String,
    },
}

/// Convert a CsvRecord to an Operation
///
/// This function:
/// - Parses the operation name (case-insensitive)
/// - Parses the amount string into a Decimal where the operation needs one
/// - Parses the target account number for transfers
/// - Parses the account kind for opens
/// - Validates that required fields are present
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(Operation) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Operation, String> {
    let account = csv_record.account;

    match csv_record.op.to_lowercase().as_str() {
        "open" => Ok(Operation::Open {
            account,
            secret: require_text(csv_record.secret, "secret", "open", account)?,
            initial_balance: require_amount(csv_record.amount, "open", account)?,
            kind: parse_kind(csv_record.kind, account)?,
        }),
        "deposit" => Ok(Operation::Deposit {
            account,
            amount: require_amount(csv_record.amount, "deposit", account)?,
        }),
        "withdraw" => Ok(Operation::Withdraw {
            account,
            amount: require_amount(csv_record.amount, "withdraw", account)?,
        }),
        "transfer" => Ok(Operation::Transfer {
            source: account,
            target: parse_target(csv_record.target, account)?,
            amount: require_amount(csv_record.amount, "transfer", account)?,
        }),
        "interest" => Ok(Operation::ApplyInterest { account }),
        "auth" => Ok(Operation::Authenticate {
            account,
            secret: require_text(csv_record.secret, "secret", "auth", account)?,
        }),
        "passwd" => Ok(Operation::ChangeSecret {
            account,
            new_secret: require_text(csv_record.secret, "secret", "passwd", account)?,
        }),
        other => Err(format!(
            "Invalid operation '{}' for account {}",
            other, account
        )),
    }
}

/// Require and parse a decimal amount field
fn require_amount(
    amount: Option<String>,
    op: &str,
    account: AccountNumber,
) -> Result<Decimal, String> {
    match amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            Decimal::from_str(amount_str.trim()).map_err(|_| {
                format!("Invalid amount '{}' for account {}", amount_str, account)
            })
        }
        _ => Err(format!(
            "{} operation for account {} requires an amount",
            op, account
        )),
    }
}

/// Require a non-empty text field
fn require_text(
    value: Option<String>,
    field: &str,
    op: &str,
    account: AccountNumber,
) -> Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(format!(
            "{} operation for account {} requires a {}",
            op, account, field
        )),
    }
}

/// Require and parse the target account number of a transfer
fn parse_target(
    target: Option<String>,
    account: AccountNumber,
) -> Result<AccountNumber, String> {
    match target {
        Some(target_str) if !target_str.trim().is_empty() => {
            target_str.trim().parse::<AccountNumber>().map_err(|_| {
                format!(
                    "Invalid target account '{}' for account {}",
                    target_str, account
                )
            })
        }
        _ => Err(format!(
            "transfer operation for account {} requires a target",
            account
        )),
    }
}

/// Require and parse the account kind of an open
fn parse_kind(kind: Option<String>, account: AccountNumber) -> Result<AccountKind, String> {
    match kind.as_deref().map(str::trim) {
        Some(kind_str) if !kind_str.is_empty() => match kind_str.to_lowercase().as_str() {
            "standard" => Ok(AccountKind::Standard),
            "interest_bearing" => Ok(AccountKind::InterestBearing),
            other => Err(format!(
                "Invalid account kind '{}' for account {}",
                other, account
            )),
        },
        _ => Err(format!(
            "open operation for account {} requires a kind",
            account
        )),
    }
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: account, kind, balance, locked.
/// Accounts are sorted by account number for deterministic output, and
/// balances follow the two-fraction-digit display convention.
///
/// # Arguments
///
/// * `accounts` - Slice of account states to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    // Write header
    writer
        .write_record(["account", "kind", "balance", "locked"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Sort accounts by account number for deterministic output
    let mut sorted_accounts: Vec<&Account> = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.number);

    // Write each account
    for account in sorted_accounts {
        writer
            .write_record(&[
                account.number.to_string(),
                account.kind.as_str().to_string(),
                format!("{:.2}", account.balance()),
                account.is_locked().to_string(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
