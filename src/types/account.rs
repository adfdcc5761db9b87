//! Account types for the Rust Ledger Engine
//!
//! This module defines the Account structure that owns a single balance, its
//! credentials, its lock state and its append-only transaction log, together
//! with the account-kind policy that governs withdrawals and interest.

use crate::types::error::LedgerError;
use crate::types::transaction::{AccountNumber, EntryKind, LogEntry};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-withdrawal ceiling for interest-bearing accounts
pub const WITHDRAW_LIMIT: Decimal = dec!(10000);

/// Minimum balance an interest-bearing account must maintain after a withdrawal
pub const MIN_BALANCE: Decimal = dec!(500);

/// Yearly interest rate in percent, applied monthly as `rate / 12`
pub const YEARLY_RATE: Decimal = dec!(4.0);

/// Minimum accepted credential length
pub const MIN_SECRET_LEN: usize = 4;

/// Consecutive authentication failures that permanently lock an account
pub const MAX_AUTH_FAILURES: u8 = 3;

/// Account kind, selected at creation and immutable thereafter
///
/// Each kind supplies its own withdrawal rules; only `InterestBearing`
/// defines an interest operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Withdrawals succeed whenever the balance covers the amount
    Standard,

    /// Withdrawals are additionally capped per operation and must leave a
    /// minimum balance; monthly interest can be accrued
    InterestBearing,
}

impl AccountKind {
    /// Stable lowercase name used in CSV input/output
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Standard => "standard",
            AccountKind::InterestBearing => "interest_bearing",
        }
    }

    /// Check a withdrawal request against this kind's policy
    ///
    /// The checks run in a fixed order so that the first failing condition
    /// determines the reported error:
    ///
    /// 1. `LimitExceeded` - the amount exceeds the flat per-withdrawal ceiling
    ///    (interest-bearing only; independent of the current balance)
    /// 2. `BelowMinimumBalance` - the withdrawal would leave less than the
    ///    minimum balance (interest-bearing only)
    /// 3. `InsufficientFunds` - the balance does not cover the amount
    ///
    /// # Arguments
    ///
    /// * `number` - Account number, used for error context only
    /// * `amount` - Requested withdrawal amount (already validated positive)
    /// * `balance` - Current account balance
    pub fn check_withdrawal(
        &self,
        number: AccountNumber,
        amount: Decimal,
        balance: Decimal,
    ) -> Result<(), LedgerError> {
        if *self == AccountKind::InterestBearing {
            if amount > WITHDRAW_LIMIT {
                return Err(LedgerError::limit_exceeded(number, WITHDRAW_LIMIT, amount));
            }
            if balance - amount < MIN_BALANCE {
                return Err(LedgerError::below_minimum_balance(
                    number,
                    MIN_BALANCE,
                    balance - amount,
                ));
            }
        }

        if amount > balance {
            return Err(LedgerError::insufficient_funds(number, balance, amount));
        }

        Ok(())
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single account: balance, credentials, lock state and transaction log
///
/// The balance is never negative after a successful operation, and every
/// successful balance change appends exactly one log entry. The credential
/// secret and the log are private; the log is append-only and readable
/// through [`Account::log`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account number, immutable after creation
    pub number: AccountNumber,

    /// Account kind, immutable after creation
    pub kind: AccountKind,

    secret: String,
    balance: Decimal,
    failed_attempts: u8,
    locked: bool,
    log: Vec<LogEntry>,
}

impl Account {
    /// Create an account with an opening balance
    ///
    /// The opening balance is recorded as an `InitialDeposit` entry so that
    /// account-opening activity stays distinguishable from later deposits.
    /// A zero opening balance is allowed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `initial_balance` is negative.
    pub fn new(
        number: AccountNumber,
        secret: impl Into<String>,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> Result<Self, LedgerError> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(initial_balance));
        }

        let mut account = Account {
            number,
            kind,
            secret: secret.into(),
            balance: initial_balance,
            failed_attempts: 0,
            locked: false,
            log: Vec::new(),
        };
        account.record(EntryKind::InitialDeposit, initial_balance, "account opened");
        Ok(account)
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Whether the account is permanently locked
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Consecutive failed authentication attempts since the last success
    pub fn failed_attempts(&self) -> u8 {
        self.failed_attempts
    }

    /// The append-only transaction log, oldest entry first
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Credit funds to the account
    ///
    /// Deposits are accepted even on locked accounts: funds may come in,
    /// never out.
    ///
    /// # Returns
    ///
    /// The new balance after the deposit.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - the amount is zero or negative
    /// * `ArithmeticOverflow` - crediting the amount would overflow
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }
        self.credit(amount, "deposit")?;
        self.record(EntryKind::Deposit, amount, "deposit");
        Ok(self.balance)
    }

    /// Debit funds from the account under the kind policy
    ///
    /// On policy rejection the balance is unchanged and no log entry is
    /// appended; the specific rejection reason is returned to the caller.
    ///
    /// # Returns
    ///
    /// The new balance after the withdrawal.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - the amount is zero or negative
    /// * `AccountLocked` - the account is locked
    /// * `LimitExceeded` / `BelowMinimumBalance` / `InsufficientFunds` - the
    ///   kind policy rejected the withdrawal (see
    ///   [`AccountKind::check_withdrawal`] for the check order)
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.debit(amount)?;
        self.record(EntryKind::Withdraw, amount, "withdrawal");
        Ok(self.balance)
    }

    /// Debit funds as the source side of a transfer
    ///
    /// Applies the same checks as [`Account::withdraw`] but records a single
    /// `TransferOut` entry naming the counterparty instead of a `Withdraw`
    /// entry.
    pub(crate) fn transfer_out(
        &mut self,
        amount: Decimal,
        target: AccountNumber,
    ) -> Result<Decimal, LedgerError> {
        self.debit(amount)?;
        self.record(EntryKind::TransferOut, amount, format!("to #{}", target));
        Ok(self.balance)
    }

    /// Credit funds as the target side of a transfer
    ///
    /// The amount was already validated by the source debit, so this cannot
    /// fail for positive amounts short of arithmetic overflow.
    pub(crate) fn transfer_in(
        &mut self,
        amount: Decimal,
        source: AccountNumber,
    ) -> Result<Decimal, LedgerError> {
        self.credit(amount, "transfer_in")?;
        self.record(EntryKind::TransferIn, amount, format!("from #{}", source));
        Ok(self.balance)
    }

    /// Check a secret against the account credential
    ///
    /// State machine per account: `Unlocked(fail_count in 0..3)` with `Locked`
    /// as the terminal state. A success from any unlocked state resets the
    /// fail count; the third consecutive failure locks the account
    /// irreversibly. Calls on a locked account fail immediately with no side
    /// effect.
    ///
    /// # Errors
    ///
    /// * `AccountLocked` - the account is locked, or this failure locked it
    /// * `InvalidCredential` - wrong secret, with the remaining attempt count
    pub fn authenticate(&mut self, secret: &str) -> Result<(), LedgerError> {
        if self.locked {
            return Err(LedgerError::account_locked(self.number));
        }

        if self.secret == secret {
            self.failed_attempts = 0;
            return Ok(());
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_AUTH_FAILURES {
            self.locked = true;
            tracing::warn!(account = self.number, "account locked after repeated authentication failures");
            return Err(LedgerError::account_locked(self.number));
        }

        Err(LedgerError::invalid_credential(
            self.number,
            MAX_AUTH_FAILURES - self.failed_attempts,
        ))
    }

    /// Replace the credential secret
    ///
    /// No old-secret check happens at this layer; callers that require one
    /// perform it before delegating here.
    ///
    /// # Errors
    ///
    /// Returns `WeakCredential` if the new secret is shorter than
    /// [`MIN_SECRET_LEN`] characters.
    pub fn change_secret(&mut self, new_secret: &str) -> Result<(), LedgerError> {
        if new_secret.chars().count() < MIN_SECRET_LEN {
            return Err(LedgerError::weak_credential(MIN_SECRET_LEN));
        }
        self.secret = new_secret.to_string();
        Ok(())
    }

    /// Accrue one month of interest
    ///
    /// Computes `balance * YEARLY_RATE / 12 / 100`, credits it and appends an
    /// `Interest` entry. A zero balance yields zero interest; the operation
    /// never fails on an unlocked interest-bearing account.
    ///
    /// # Returns
    ///
    /// The new balance after the interest credit.
    ///
    /// # Errors
    ///
    /// * `UnsupportedOperation` - the account kind is `Standard`
    /// * `AccountLocked` - the account is locked
    pub fn apply_interest(&mut self) -> Result<Decimal, LedgerError> {
        if self.kind != AccountKind::InterestBearing {
            return Err(LedgerError::unsupported_operation(self.number, "interest"));
        }
        if self.locked {
            return Err(LedgerError::account_locked(self.number));
        }

        let interest = self.balance * YEARLY_RATE / dec!(12) / dec!(100);
        self.credit(interest, "interest")?;
        self.record(EntryKind::Interest, interest, "monthly interest");
        Ok(self.balance)
    }

    /// Shared validation and mutation for withdrawals and transfer debits
    fn debit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }
        if self.locked {
            return Err(LedgerError::account_locked(self.number));
        }
        self.kind.check_withdrawal(self.number, amount, self.balance)?;

        // The policy check guarantees amount <= balance, so this cannot underflow
        self.balance -= amount;
        Ok(())
    }

    /// Checked balance credit shared by deposits, transfers and interest
    fn credit(&mut self, amount: Decimal, operation: &str) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, self.number))?;
        Ok(())
    }

    /// Append a log entry stamped with the current balance
    fn record(&mut self, kind: EntryKind, amount: Decimal, note: impl Into<String>) {
        self.log.push(LogEntry::new(kind, amount, self.balance, note));
    }

    /// Verify a secret without touching the failure counter
    ///
    /// Test-only helper; production callers go through [`Account::authenticate`].
    #[cfg(test)]
    fn secret_matches(&self, secret: &str) -> bool {
        self.secret == secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn standard(balance: Decimal) -> Account {
        Account::new(1, "secret", balance, AccountKind::Standard).unwrap()
    }

    fn interest_bearing(balance: Decimal) -> Account {
        Account::new(1001, "pass", balance, AccountKind::InterestBearing).unwrap()
    }

    #[test]
    fn test_new_records_initial_deposit() {
        let account = standard(dec!(1000));

        assert_eq!(account.balance(), dec!(1000));
        assert!(!account.is_locked());
        assert_eq!(account.failed_attempts(), 0);

        assert_eq!(account.log().len(), 1);
        let entry = &account.log()[0];
        assert_eq!(entry.kind, EntryKind::InitialDeposit);
        assert_eq!(entry.amount, dec!(1000));
        assert_eq!(entry.resulting_balance, dec!(1000));
    }

    #[test]
    fn test_new_allows_zero_opening_balance() {
        let account = standard(Decimal::ZERO);
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.log()[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_new_rejects_negative_opening_balance() {
        let result = Account::new(1, "secret", dec!(-1), AccountKind::Standard);
        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
    }

    #[test]
    fn test_deposit_increases_balance_and_logs() {
        let mut account = standard(dec!(100));

        let balance = account.deposit(dec!(50.25)).unwrap();

        assert_eq!(balance, dec!(150.25));
        let entry = account.log().last().unwrap();
        assert_eq!(entry.kind, EntryKind::Deposit);
        assert_eq!(entry.amount, dec!(50.25));
        assert_eq!(entry.resulting_balance, dec!(150.25));
    }

    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-10))]
    fn test_deposit_rejects_non_positive_amounts(#[case] amount: Decimal) {
        let mut account = standard(dec!(100));

        let result = account.deposit(amount);

        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        assert_eq!(account.balance(), dec!(100));
        assert_eq!(account.log().len(), 1); // only the initial deposit
    }

    #[test]
    fn test_withdraw_decreases_balance_and_logs() {
        let mut account = standard(dec!(100));

        let balance = account.withdraw(dec!(40)).unwrap();

        assert_eq!(balance, dec!(60));
        let entry = account.log().last().unwrap();
        assert_eq!(entry.kind, EntryKind::Withdraw);
        assert_eq!(entry.amount, dec!(40));
        assert_eq!(entry.resulting_balance, dec!(60));
    }

    #[test]
    fn test_withdraw_full_balance_allowed_on_standard() {
        let mut account = standard(dec!(100));
        assert_eq!(account.withdraw(dec!(100)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_insufficient_funds_leaves_state_untouched() {
        let mut account = standard(dec!(100));

        let result = account.withdraw(dec!(100.01));

        assert_eq!(
            result,
            Err(LedgerError::insufficient_funds(1, dec!(100), dec!(100.01)))
        );
        assert_eq!(account.balance(), dec!(100));
        assert_eq!(account.log().len(), 1);
    }

    #[test]
    fn test_withdraw_rejected_when_locked() {
        let mut account = standard(dec!(100));
        for _ in 0..3 {
            let _ = account.authenticate("wrong");
        }
        assert!(account.is_locked());

        let result = account.withdraw(dec!(10));
        assert!(matches!(result, Err(LedgerError::AccountLocked { .. })));
        assert_eq!(account.balance(), dec!(100));
    }

    #[test]
    fn test_deposit_allowed_when_locked() {
        let mut account = standard(dec!(100));
        for _ in 0..3 {
            let _ = account.authenticate("wrong");
        }

        assert_eq!(account.deposit(dec!(50)).unwrap(), dec!(150));
    }

    // Interest-bearing withdrawal policy: the first failing check in the
    // order limit -> minimum balance -> funds determines the error.

    #[test]
    fn test_interest_bearing_withdrawal_scenario() {
        let mut account = interest_bearing(dec!(1000));

        let result = account.withdraw(dec!(10001));
        assert!(matches!(result, Err(LedgerError::LimitExceeded { .. })));
        assert_eq!(account.balance(), dec!(1000));

        let result = account.withdraw(dec!(600));
        assert_eq!(
            result,
            Err(LedgerError::below_minimum_balance(1001, dec!(500), dec!(400)))
        );
        assert_eq!(account.balance(), dec!(1000));

        assert_eq!(account.withdraw(dec!(500)).unwrap(), dec!(500));
    }

    #[test]
    fn test_interest_bearing_limit_checked_before_minimum_balance() {
        // 10001 trips both the limit and the minimum-balance rule; the flat
        // ceiling wins the tie-break.
        let mut account = interest_bearing(dec!(600));

        let result = account.withdraw(dec!(10001));
        assert!(matches!(result, Err(LedgerError::LimitExceeded { .. })));
    }

    #[test]
    fn test_interest_bearing_minimum_checked_before_funds() {
        // 700 exceeds the balance as well, but the minimum-balance rule is
        // evaluated first.
        let mut account = interest_bearing(dec!(600));

        let result = account.withdraw(dec!(700));
        assert!(matches!(result, Err(LedgerError::BelowMinimumBalance { .. })));
    }

    #[test]
    fn test_interest_bearing_maintains_minimum_after_withdrawal() {
        let mut account = interest_bearing(dec!(10500));

        account.withdraw(dec!(10000)).unwrap();

        assert_eq!(account.balance(), MIN_BALANCE);
    }

    #[test]
    fn test_apply_interest_monthly_rate() {
        let mut account = interest_bearing(dec!(1200.00));

        let balance = account.apply_interest().unwrap();

        // 1200 * (4.0 / 12) / 100 = 4.00
        assert_eq!(balance, dec!(1204.00));
        let entry = account.log().last().unwrap();
        assert_eq!(entry.kind, EntryKind::Interest);
        assert_eq!(entry.amount, dec!(4.00));
        assert_eq!(entry.resulting_balance, dec!(1204.00));
    }

    #[test]
    fn test_apply_interest_on_zero_balance_yields_zero() {
        let mut account = interest_bearing(Decimal::ZERO);

        assert_eq!(account.apply_interest().unwrap(), Decimal::ZERO);
        assert_eq!(account.log().last().unwrap().amount, Decimal::ZERO);
    }

    #[test]
    fn test_apply_interest_unsupported_for_standard() {
        let mut account = standard(dec!(1000));

        let result = account.apply_interest();

        assert_eq!(result, Err(LedgerError::unsupported_operation(1, "interest")));
        assert_eq!(account.balance(), dec!(1000));
        assert_eq!(account.log().len(), 1);
    }

    // Authentication state machine: Unlocked(0..3) -> Locked (terminal)

    #[test]
    fn test_authenticate_success_resets_failures() {
        let mut account = standard(dec!(100));

        assert!(account.authenticate("wrong").is_err());
        assert!(account.authenticate("wrong").is_err());
        assert_eq!(account.failed_attempts(), 2);

        assert!(account.authenticate("secret").is_ok());
        assert_eq!(account.failed_attempts(), 0);
        assert!(!account.is_locked());
    }

    #[test]
    fn test_authenticate_reports_remaining_attempts() {
        let mut account = standard(dec!(100));

        assert_eq!(
            account.authenticate("wrong"),
            Err(LedgerError::invalid_credential(1, 2))
        );
        assert_eq!(
            account.authenticate("wrong"),
            Err(LedgerError::invalid_credential(1, 1))
        );
    }

    #[test]
    fn test_authenticate_third_failure_locks_permanently() {
        let mut account = standard(dec!(100));

        let _ = account.authenticate("wrong");
        let _ = account.authenticate("wrong");
        assert_eq!(
            account.authenticate("wrong"),
            Err(LedgerError::account_locked(1))
        );
        assert!(account.is_locked());

        // Even the correct secret is rejected once locked, with no side effect
        assert_eq!(
            account.authenticate("secret"),
            Err(LedgerError::account_locked(1))
        );
        assert!(account.is_locked());
    }

    #[test]
    fn test_authenticate_success_between_failures_prevents_lockout() {
        let mut account = standard(dec!(100));

        let _ = account.authenticate("wrong");
        let _ = account.authenticate("wrong");
        account.authenticate("secret").unwrap();
        let _ = account.authenticate("wrong");

        // The counter restarted, so this is failure 2 of 3, not lockout
        assert!(!account.is_locked());
        assert_eq!(account.failed_attempts(), 1);
    }

    #[rstest]
    #[case::empty("")]
    #[case::three_chars("abc")]
    fn test_change_secret_rejects_weak_secrets(#[case] new_secret: &str) {
        let mut account = standard(dec!(100));

        let result = account.change_secret(new_secret);

        assert_eq!(result, Err(LedgerError::weak_credential(MIN_SECRET_LEN)));
        assert!(account.secret_matches("secret"));
    }

    #[test]
    fn test_change_secret_replaces_unconditionally() {
        let mut account = standard(dec!(100));

        account.change_secret("new-secret").unwrap();

        assert!(account.secret_matches("new-secret"));
        assert!(!account.secret_matches("secret"));
    }

    #[test]
    fn test_change_secret_counts_characters_not_bytes() {
        let mut account = standard(dec!(100));

        // Four characters, more than four bytes
        assert!(account.change_secret("päss").is_ok());
    }

    #[test]
    fn test_transfer_entries_name_counterparty() {
        let mut source = standard(dec!(1000));
        let mut target = Account::new(2, "other", Decimal::ZERO, AccountKind::Standard).unwrap();

        source.transfer_out(dec!(1000), 2).unwrap();
        target.transfer_in(dec!(1000), 1).unwrap();

        let out = source.log().last().unwrap();
        assert_eq!(out.kind, EntryKind::TransferOut);
        assert_eq!(out.amount, dec!(1000));
        assert_eq!(out.resulting_balance, Decimal::ZERO);
        assert_eq!(out.note, "to #2");

        let in_ = target.log().last().unwrap();
        assert_eq!(in_.kind, EntryKind::TransferIn);
        assert_eq!(in_.amount, dec!(1000));
        assert_eq!(in_.resulting_balance, dec!(1000));
        assert_eq!(in_.note, "from #1");
    }

    #[test]
    fn test_balance_never_negative_after_successful_operations() {
        let mut account = standard(dec!(10));

        account.withdraw(dec!(10)).unwrap();
        assert!(account.balance() >= Decimal::ZERO);

        assert!(account.withdraw(dec!(0.01)).is_err());
        assert_eq!(account.balance(), Decimal::ZERO);
    }
}
