//! Ledger operations orchestrator
//!
//! This module provides the `Ledger` that implements the external interface
//! of the engine: account creation, deposits, withdrawals, atomic two-account
//! transfers, interest accrual, authentication with lockout, and credential
//! changes. The orchestrator is stateless beyond owning the registry; it
//! resolves accounts via the `AccountRegistry` and applies kind-policy-gated
//! mutations on them.
//!
//! # Atomicity
//!
//! Each operation executes as one indivisible unit with respect to the
//! accounts it touches. For transfers, both lookups and the target's
//! capacity to absorb the credit are verified before any mutation, so a
//! rejected transfer leaves both accounts byte-for-byte unchanged and a
//! successful debit is always followed by a credit that cannot fail.

use crate::core::registry::AccountRegistry;
use crate::types::{Account, AccountKind, AccountNumber, LedgerError, LogEntry};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// The ledger: all accounts plus the cross-account operations over them
pub struct Ledger {
    registry: AccountRegistry,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            registry: AccountRegistry::new(),
        }
    }

    /// Open a new account with an opening balance
    ///
    /// # Errors
    ///
    /// * `DuplicateAccount` - the number is already registered
    /// * `InvalidAmount` - the opening balance is negative
    pub fn create_account(
        &mut self,
        number: AccountNumber,
        secret: &str,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> Result<&Account, LedgerError> {
        let account = self.registry.register(number, secret, initial_balance, kind)?;
        info!(account = number, kind = %kind, %initial_balance, "account opened");
        Ok(account)
    }

    /// Current state of one account
    ///
    /// Read-only: never mutates state.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the number is unknown.
    pub fn account(&self, number: AccountNumber) -> Result<&Account, LedgerError> {
        self.registry.get(number)
    }

    /// All accounts sorted by account number
    ///
    /// Read-only: never mutates state.
    pub fn accounts(&self) -> Vec<&Account> {
        self.registry.all_sorted()
    }

    /// Credit funds to an account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the number is unknown
    /// * `InvalidAmount` - the amount is zero or negative
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let balance = self.registry.get_mut(number)?.deposit(amount)?;
        debug!(account = number, %amount, %balance, "deposit applied");
        Ok(balance)
    }

    /// Debit funds from an account under its kind policy
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the number is unknown
    /// * `InvalidAmount` - the amount is zero or negative
    /// * `AccountLocked` - the account is locked
    /// * `LimitExceeded` / `BelowMinimumBalance` / `InsufficientFunds` - the
    ///   kind policy rejected the withdrawal
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let balance = self.registry.get_mut(number)?.withdraw(amount)?;
        debug!(account = number, %amount, %balance, "withdrawal applied");
        Ok(balance)
    }

    /// Move funds between two accounts atomically
    ///
    /// Checks, in order: source and target differ; both accounts exist; the
    /// source is not locked and its kind policy admits the debit. Only then
    /// are both balances mutated and a `TransferOut`/`TransferIn` entry pair
    /// appended. If any check fails, neither account changes.
    ///
    /// # Errors
    ///
    /// * `SameAccount` - source equals target (checked before any lookup)
    /// * `AccountNotFound` - either account is unknown
    /// * `AccountLocked` - the source account is locked
    /// * `InvalidAmount` - the amount is zero or negative
    /// * `LimitExceeded` / `BelowMinimumBalance` / `InsufficientFunds` - the
    ///   source kind policy rejected the debit
    /// * `ArithmeticOverflow` - the target balance cannot absorb the credit
    pub fn transfer(
        &mut self,
        source: AccountNumber,
        target: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if source == target {
            return Err(LedgerError::same_account(source));
        }

        // Both accounts must exist and the target must be able to absorb
        // the credit before the source is debited; once the debit has
        // succeeded the credit must not be able to fail.
        self.registry.get(source)?;
        let target_balance = self.registry.get(target)?.balance();
        if target_balance.checked_add(amount).is_none() {
            return Err(LedgerError::arithmetic_overflow("transfer", target));
        }

        self.registry.get_mut(source)?.transfer_out(amount, target)?;
        self.registry.get_mut(target)?.transfer_in(amount, source)?;

        info!(source, target, %amount, "transfer completed");
        Ok(())
    }

    /// Accrue one month of interest on an interest-bearing account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the number is unknown
    /// * `UnsupportedOperation` - the account kind is `Standard`
    /// * `AccountLocked` - the account is locked
    pub fn apply_interest(&mut self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        let balance = self.registry.get_mut(number)?.apply_interest()?;
        info!(account = number, %balance, "monthly interest applied");
        Ok(balance)
    }

    /// Check a secret against an account credential
    ///
    /// This is the sole entry point that advances or resets the per-account
    /// failure counter and lock flag.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the number is unknown
    /// * `AccountLocked` - the account is locked (possibly by this call)
    /// * `InvalidCredential` - wrong secret, with remaining attempts
    pub fn authenticate(
        &mut self,
        number: AccountNumber,
        secret: &str,
    ) -> Result<(), LedgerError> {
        let result = self.registry.get_mut(number)?.authenticate(secret);
        if let Err(error) = &result {
            warn!(account = number, %error, "authentication rejected");
        }
        result
    }

    /// Replace an account credential
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the number is unknown
    /// * `WeakCredential` - the new secret is too short
    pub fn change_credential(
        &mut self,
        number: AccountNumber,
        new_secret: &str,
    ) -> Result<(), LedgerError> {
        self.registry.get_mut(number)?.change_secret(new_secret)?;
        info!(account = number, "credential changed");
        Ok(())
    }

    /// Transaction history of one account, oldest entry first
    ///
    /// Read-only: never mutates state.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the number is unknown.
    pub fn history(&self, number: AccountNumber) -> Result<&[LogEntry], LedgerError> {
        Ok(self.registry.get(number)?.log())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
