//! Error types for the Rust Ledger Engine
//!
//! This module defines all error types that can occur while operating on the
//! ledger. Errors are designed to be descriptive and user-friendly for CLI
//! output, and every variant is recoverable by the caller: the core never
//! aborts the process and never leaves a partial mutation behind on failure.
//!
//! # Error Categories
//!
//! - **Amount Errors**: Non-positive or malformed amounts
//! - **Policy Errors**: Insufficient funds, withdrawal limit, minimum balance
//! - **Identity Errors**: Unknown or duplicate account numbers
//! - **Credential Errors**: Wrong secrets, weak secrets, locked accounts
//! - **File I/O and CSV Errors**: Session script reading failures

use crate::types::transaction::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger engine
///
/// This enum represents all possible errors that can occur while processing
/// ledger operations. Each variant includes relevant context to help diagnose
/// and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is zero or negative
    ///
    /// Deposits, withdrawals and transfers all require strictly positive
    /// amounts. This is a recoverable error - the operation is rejected.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Insufficient balance for a withdrawal or transfer
    ///
    /// This is a recoverable error - the debit is rejected and the account
    /// state remains unchanged.
    #[error("Insufficient funds for account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        account: AccountNumber,
        /// Current balance
        balance: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// Withdrawal exceeds the per-operation limit of an interest-bearing account
    ///
    /// The limit is a flat ceiling independent of the current balance, so it
    /// is checked before the minimum-balance and funds checks.
    #[error("Withdrawal limit exceeded for account {account}: limit {limit}, requested {requested}")]
    LimitExceeded {
        /// Account number
        account: AccountNumber,
        /// The per-withdrawal ceiling
        limit: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// Withdrawal would drop an interest-bearing account below its minimum balance
    ///
    /// This is a recoverable error - the debit is rejected.
    #[error("Account {account} must maintain a minimum balance of {minimum}: withdrawal would leave {resulting}")]
    BelowMinimumBalance {
        /// Account number
        account: AccountNumber,
        /// Minimum balance that must be maintained
        minimum: Decimal,
        /// Balance that the withdrawal would leave
        resulting: Decimal,
    },

    /// No account exists for the given number
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The account number that was not found
        account: AccountNumber,
    },

    /// An account with the given number already exists
    ///
    /// Account numbers are the sole identity in the registry and must be unique.
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// The duplicated account number
        account: AccountNumber,
    },

    /// Account is locked and rejects the operation
    ///
    /// Lockout is permanent within this design: there is no unlock operation.
    #[error("Account {account} is locked")]
    AccountLocked {
        /// Account number of the locked account
        account: AccountNumber,
    },

    /// Authentication failed with the wrong secret
    ///
    /// Carries the number of attempts remaining before the account locks.
    #[error("Invalid credential for account {account}: {attempts_left} attempt(s) left")]
    InvalidCredential {
        /// Account number
        account: AccountNumber,
        /// Failed attempts remaining before lockout
        attempts_left: u8,
    },

    /// Replacement secret is too short
    #[error("New credential must be at least {minimum} characters")]
    WeakCredential {
        /// Minimum accepted secret length
        minimum: usize,
    },

    /// Transfer names the same account as source and target
    #[error("Cannot transfer from account {account} to itself")]
    SameAccount {
        /// The account number used on both sides
        account: AccountNumber,
    },

    /// Operation is not defined for the account's kind
    ///
    /// Interest accrual on a standard account is the canonical case.
    #[error("Operation '{operation}' is not supported for account {account}")]
    UnsupportedOperation {
        /// Account number
        account: AccountNumber,
        /// The unsupported operation
        operation: String,
    },

    /// Balance arithmetic would overflow
    ///
    /// This is a recoverable error - the operation is rejected to maintain
    /// account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: AccountNumber,
    },

    /// I/O error occurred while reading the session script
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped and
    /// processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        account: AccountNumber,
        balance: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create a LimitExceeded error
    pub fn limit_exceeded(account: AccountNumber, limit: Decimal, requested: Decimal) -> Self {
        LedgerError::LimitExceeded {
            account,
            limit,
            requested,
        }
    }

    /// Create a BelowMinimumBalance error
    pub fn below_minimum_balance(
        account: AccountNumber,
        minimum: Decimal,
        resulting: Decimal,
    ) -> Self {
        LedgerError::BelowMinimumBalance {
            account,
            minimum,
            resulting,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountNumber) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: AccountNumber) -> Self {
        LedgerError::DuplicateAccount { account }
    }

    /// Create an AccountLocked error
    pub fn account_locked(account: AccountNumber) -> Self {
        LedgerError::AccountLocked { account }
    }

    /// Create an InvalidCredential error
    pub fn invalid_credential(account: AccountNumber, attempts_left: u8) -> Self {
        LedgerError::InvalidCredential {
            account,
            attempts_left,
        }
    }

    /// Create a WeakCredential error
    pub fn weak_credential(minimum: usize) -> Self {
        LedgerError::WeakCredential { minimum }
    }

    /// Create a SameAccount error
    pub fn same_account(account: AccountNumber) -> Self {
        LedgerError::SameAccount { account }
    }

    /// Create an UnsupportedOperation error
    pub fn unsupported_operation(account: AccountNumber, operation: &str) -> Self {
        LedgerError::UnsupportedOperation {
            account,
            operation: operation.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }
}
