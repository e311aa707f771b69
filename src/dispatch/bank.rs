//! External value accounts
//!
//! The settled world outgoing transfers land in. Accounts are plain
//! identity -> balance entries; the bank knows nothing about wallets,
//! quorums, or call data.

use crate::dispatch::invocation::DispatchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value accounts outside wallet custody
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Bank {
    /// Balances by identity
    accounts: HashMap<String, u64>,
}

impl Bank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Get the balance of an account (0 if unknown)
    pub fn balance_of(&self, account: &str) -> u64 {
        *self.accounts.get(account).unwrap_or(&0)
    }

    /// Credit an account
    pub fn credit(&mut self, account: &str, amount: u64) {
        *self.accounts.entry(account.to_string()).or_insert(0) += amount;
    }

    /// Debit an account
    pub fn debit(&mut self, account: &str, amount: u64) -> Result<(), DispatchError> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(DispatchError::InsufficientFunds {
                have: balance,
                need: amount,
            });
        }
        *self.accounts.entry(account.to_string()).or_insert(0) -= amount;
        Ok(())
    }

    /// Move value between two accounts
    pub fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), DispatchError> {
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    /// Accounts with a non-zero balance
    pub fn accounts(&self) -> Vec<(&String, &u64)> {
        self.accounts.iter().filter(|(_, &b)| b > 0).collect()
    }
}
