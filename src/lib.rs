//! Rust Ledger Engine Library
//! # Overview
//!
//! This library provides an in-memory banking ledger with a streaming
//! CSV-based session script processor
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountKind, LogEntry, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Cross-account operation orchestration
//!   - [`core::registry`] - Account storage keyed by account number
//!   - [`core::shared`] - Thread-safe handle for concurrent callers
//! - [`io`] - Session script parsing and account state output
//! - [`session`] - End-to-end script replay pipeline
//!
//! # Operation Types
//!
//! A session script drives seven operations:
//!
//! - **Open**: Register a new account with an opening balance
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds from an account (subject to the account kind's policy)
//! - **Transfer**: Atomically move funds between two accounts
//! - **Interest**: Credit one month of interest to an interest-bearing account
//! - **Auth**: Check an account's credential, locking after repeated failures
//! - **Passwd**: Replace an account's credential
//!
//! # Account States
//!
//! Each account maintains:
//! - `balance`: Current funds, as an exact decimal
//! - `locked`: Whether the account is locked (after three failed authentications)
//! - `failed_attempts`: Consecutive authentication failures so far
//! - `log`: Append-only history of every accepted balance change

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod session;
pub mod types;

pub use core::{AccountRegistry, Ledger, SharedLedger};
pub use io::write_accounts_csv;
pub use types::{Account, AccountKind, AccountNumber, EntryKind, LedgerError, LogEntry};
