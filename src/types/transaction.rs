//! Transaction log types for the Rust Ledger Engine
//!
//! This module defines the append-only transaction log entries that record
//! every balance change on an account, along with the account identifier type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account number
///
/// The sole identity of an account within a registry.
/// Supports account numbers from 0 to 4,294,967,295.
pub type AccountNumber = u32;

/// Kinds of transaction log entries
///
/// Each variant records a different cause for a balance change. The opening
/// balance is recorded as `InitialDeposit` rather than `Deposit` so that
/// account-opening activity stays distinguishable from later deposits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Opening balance recorded when the account is created
    InitialDeposit,

    /// Funds credited directly to the account
    Deposit,

    /// Funds debited directly from the account
    Withdraw,

    /// Funds debited as the source side of a transfer
    TransferOut,

    /// Funds credited as the target side of a transfer
    TransferIn,

    /// Monthly interest credited to an interest-bearing account
    Interest,
}

impl EntryKind {
    /// Stable lowercase name used in CSV output and log messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::InitialDeposit => "initial_deposit",
            EntryKind::Deposit => "deposit",
            EntryKind::Withdraw => "withdraw",
            EntryKind::TransferOut => "transfer_out",
            EntryKind::TransferIn => "transfer_in",
            EntryKind::Interest => "interest",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable fact about one balance change
///
/// Entries are appended to an account's log in chronological order and are
/// never mutated or removed. The `resulting_balance` captures the owning
/// account's balance immediately after the change was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// What kind of balance change this entry records
    pub kind: EntryKind,

    /// The magnitude moved (always the positive amount, regardless of direction)
    pub amount: Decimal,

    /// The owning account's balance immediately after this entry
    pub resulting_balance: Decimal,

    /// Instant the entry was created
    pub timestamp: DateTime<Utc>,

    /// Free-text context, e.g. the counterparty account number for transfers
    pub note: String,
}

impl LogEntry {
    /// Create a log entry stamped with the current time
    pub fn new(
        kind: EntryKind,
        amount: Decimal,
        resulting_balance: Decimal,
        note: impl Into<String>,
    ) -> Self {
        LogEntry {
            kind,
            amount,
            resulting_balance,
            timestamp: Utc::now(),
            note: note.into(),
        }
    }
}
