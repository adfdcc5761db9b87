//! Account registry
//!
//! This module provides the `AccountRegistry` struct, the collection of all
//! accounts keyed by account number. The registry is the sole owner of
//! account instances: callers borrow an account for the duration of one
//! orchestrated operation and never receive copies.
//!
//! Account numbers are the sole identity; no two accounts may share a number,
//! and accounts are never deleted (there is no close-account operation).

use crate::types::{Account, AccountKind, AccountNumber, LedgerError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Owns all accounts and enforces account-number uniqueness
pub struct AccountRegistry {
    /// Map of account numbers to accounts
    accounts: HashMap<AccountNumber, Account>,
}

impl AccountRegistry {
    /// Create a registry with no accounts
    pub fn new() -> Self {
        AccountRegistry {
            accounts: HashMap::new(),
        }
    }

    /// Create and insert a new account
    ///
    /// The opening balance is recorded on the new account as an
    /// `InitialDeposit` log entry.
    ///
    /// # Arguments
    ///
    /// * `number` - Account number, unique across the registry
    /// * `secret` - Initial credential secret
    /// * `initial_balance` - Opening balance (non-negative)
    /// * `kind` - Account kind, immutable after creation
    ///
    /// # Returns
    ///
    /// A reference to the newly inserted account.
    ///
    /// # Errors
    ///
    /// * `DuplicateAccount` - an account with this number already exists
    /// * `InvalidAmount` - the opening balance is negative
    pub fn register(
        &mut self,
        number: AccountNumber,
        secret: &str,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> Result<&Account, LedgerError> {
        if self.accounts.contains_key(&number) {
            return Err(LedgerError::duplicate_account(number));
        }

        let account = Account::new(number, secret, initial_balance, kind)?;
        Ok(self.accounts.entry(number).or_insert(account))
    }

    /// Look up an account for reading
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account exists for the number.
    pub fn get(&self, number: AccountNumber) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Look up an account for in-place mutation
    ///
    /// The returned borrow is valid for the duration of one orchestrated
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account exists for the number.
    pub fn get_mut(&mut self, number: AccountNumber) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Whether an account exists for the number
    pub fn contains(&self, number: AccountNumber) -> bool {
        self.accounts.contains_key(&number)
    }

    /// All accounts sorted by account number
    ///
    /// Sorting gives deterministic output for CSV generation and listings.
    pub fn all_sorted(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|account| account.number);
        accounts
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}
