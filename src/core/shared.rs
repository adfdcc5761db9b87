//! Thread-safe ledger wrapper
//!
//! This module provides `SharedLedger`, a cloneable handle around a [`Ledger`]
//! guarded by one exclusive lock. The lock serializes every orchestrated
//! operation as a single unit, so a concurrent reader never observes a
//! transfer's source debited without the target credited (or vice versa), and
//! two opposite-direction transfers cannot deadlock: there is only one lock
//! to acquire.
//!
//! Read operations return owned snapshots (cloned account state, cloned
//! history) because borrows cannot outlive the lock guard.

use crate::core::ledger::Ledger;
use crate::types::{Account, AccountKind, AccountNumber, LedgerError, LogEntry};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Cloneable, thread-safe handle to a ledger
///
/// All clones refer to the same underlying ledger. Each method acquires the
/// lock, runs the operation to completion and releases the lock before
/// returning; no operation is cancellable mid-flight.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    /// Create a handle around an empty ledger
    pub fn new() -> Self {
        SharedLedger {
            inner: Arc::new(Mutex::new(Ledger::new())),
        }
    }

    /// Open a new account; returns a snapshot of its initial state
    pub fn create_account(
        &self,
        number: AccountNumber,
        secret: &str,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> Result<Account, LedgerError> {
        self.inner
            .lock()
            .create_account(number, secret, initial_balance, kind)
            .map(Account::clone)
    }

    /// Snapshot of one account's current state
    pub fn account(&self, number: AccountNumber) -> Result<Account, LedgerError> {
        self.inner.lock().account(number).map(Account::clone)
    }

    /// Snapshots of all accounts sorted by account number
    pub fn accounts(&self) -> Vec<Account> {
        self.inner
            .lock()
            .accounts()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Credit funds; returns the new balance
    pub fn deposit(&self, number: AccountNumber, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.inner.lock().deposit(number, amount)
    }

    /// Debit funds under the kind policy; returns the new balance
    pub fn withdraw(&self, number: AccountNumber, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.inner.lock().withdraw(number, amount)
    }

    /// Move funds between two accounts as one indivisible unit
    pub fn transfer(
        &self,
        source: AccountNumber,
        target: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        self.inner.lock().transfer(source, target, amount)
    }

    /// Accrue one month of interest; returns the new balance
    pub fn apply_interest(&self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        self.inner.lock().apply_interest(number)
    }

    /// Check a secret, advancing the lockout state machine on failure
    pub fn authenticate(&self, number: AccountNumber, secret: &str) -> Result<(), LedgerError> {
        self.inner.lock().authenticate(number, secret)
    }

    /// Replace an account credential
    pub fn change_credential(
        &self,
        number: AccountNumber,
        new_secret: &str,
    ) -> Result<(), LedgerError> {
        self.inner.lock().change_credential(number, new_secret)
    }

    /// Snapshot of one account's transaction history, oldest entry first
    pub fn history(&self, number: AccountNumber) -> Result<Vec<LogEntry>, LedgerError> {
        self.inner.lock().history(number).map(<[LogEntry]>::to_vec)
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new()
    }
}
