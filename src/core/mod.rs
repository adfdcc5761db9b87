//! Core business logic module
//!
//! This module contains the core ledger components:
//! - `registry` - Account ownership, lookup and uniqueness enforcement
//! - `ledger` - Orchestration of deposits, withdrawals, transfers, interest,
//!   authentication and credential changes
//! - `shared` - Thread-safe ledger handle serializing operations behind one lock

pub mod ledger;
pub mod registry;
pub mod shared;

pub use ledger::Ledger;
pub use registry::AccountRegistry;
pub use shared::SharedLedger;
