//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and the account-kind withdrawal/interest policy
//! - `transaction`: Transaction log entries and the account identifier
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use error::LedgerError;
pub use transaction::{AccountNumber, EntryKind, LogEntry};
