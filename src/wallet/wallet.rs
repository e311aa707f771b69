//! Multi-signature wallet aggregate
//!
//! A wallet holds the owner registry, the transaction ledger, and the
//! custodied balance as one owned unit. Owners submit proposals, confirm
//! them, and trigger execution once the quorum is reached; deposits are
//! accepted from anyone at any time.

use crate::dispatch::{DispatchError, Dispatcher, Invocation};
use crate::wallet::config::{ConfigError, WalletConfig};
use crate::wallet::transaction::{Transaction, TransactionLedger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum retained audit events per wallet
const MAX_EVENT_HISTORY: usize = 100;

/// Errors related to wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid wallet configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Not an authorized owner: {0}")]
    NotOwner(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(u64),
    #[error("Transaction {0} already executed")]
    AlreadyExecuted(u64),
    #[error("Insufficient confirmations: have {have}, need {need}")]
    InsufficientConfirmations { have: usize, need: usize },
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),
}

/// Audit trail entry for a wallet state change
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum WalletEvent {
    Deposited {
        from: String,
        amount: u64,
        at: DateTime<Utc>,
    },
    Submitted {
        id: u64,
        by: String,
        at: DateTime<Utc>,
    },
    Confirmed {
        id: u64,
        by: String,
        at: DateTime<Utc>,
    },
    Executed {
        id: u64,
        by: String,
        at: DateTime<Utc>,
    },
}

/// A multi-signature custody wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultiSigWallet {
    /// Deterministic wallet address, derived from the configuration
    address: String,
    /// Owner registry and quorum threshold
    config: WalletConfig,
    /// Append-only transaction records
    ledger: TransactionLedger,
    /// Custodied balance
    balance: u64,
    /// Recent state changes (bounded)
    history: Vec<WalletEvent>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl MultiSigWallet {
    /// Create a wallet from a validated configuration
    pub fn new(config: WalletConfig) -> Self {
        Self {
            address: config.derive_address(),
            config,
            ledger: TransactionLedger::new(),
            balance: 0,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a wallet directly from owners and a threshold
    pub fn create(owners: Vec<String>, required: usize) -> Result<Self, WalletError> {
        Ok(Self::new(WalletConfig::new(owners, required)?))
    }

    // =========================================================================
    // Owner operations
    // =========================================================================

    /// Submit a new outgoing transaction proposal
    ///
    /// The submitter's confirmation is recorded immediately, so a freshly
    /// submitted transaction already counts one confirmation.
    pub fn submit_transaction(
        &mut self,
        submitter: &str,
        destination: &str,
        value: u64,
        payload: Vec<u8>,
    ) -> Result<u64, WalletError> {
        if !self.config.is_owner(submitter) {
            return Err(WalletError::NotOwner(submitter.to_string()));
        }

        let id = self.ledger.append(
            destination.to_string(),
            value,
            payload,
            submitter.to_string(),
        );
        self.record_event(WalletEvent::Submitted {
            id,
            by: submitter.to_string(),
            at: Utc::now(),
        });
        log::info!(
            "Wallet {}: transaction {} submitted by {} ({} -> {})",
            self.address,
            id,
            submitter,
            value,
            destination
        );

        self.confirm_transaction(id, submitter)?;

        Ok(id)
    }

    /// Confirm a pending transaction
    ///
    /// Re-confirming by the same owner is a no-op. Confirmation is refused
    /// once the transaction has executed.
    pub fn confirm_transaction(&mut self, id: u64, owner: &str) -> Result<(), WalletError> {
        let record = self
            .ledger
            .get(id)
            .ok_or(WalletError::TransactionNotFound(id))?;

        if !self.config.is_owner(owner) {
            return Err(WalletError::NotOwner(owner.to_string()));
        }

        if record.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }

        let added = self
            .record_mut(id)?
            .record_confirmation(owner);
        if !added {
            log::debug!(
                "Wallet {}: owner {} re-confirmed transaction {}, ignoring",
                self.address,
                owner,
                id
            );
            return Ok(());
        }

        self.record_event(WalletEvent::Confirmed {
            id,
            by: owner.to_string(),
            at: Utc::now(),
        });
        log::info!(
            "Wallet {}: transaction {} confirmed by {} ({}/{})",
            self.address,
            id,
            owner,
            self.confirmation_count(id)?,
            self.config.required()
        );

        Ok(())
    }

    /// Execute a confirmed transaction
    ///
    /// The `executed` flag and the custody debit are committed before the
    /// dispatch, so any reentrant callback the dispatcher makes into this
    /// wallet observes the transaction as already executed. If the dispatch
    /// fails, both are rolled back and the transaction stays pending and
    /// retryable.
    pub fn execute_transaction<D>(
        &mut self,
        id: u64,
        caller: &str,
        dispatcher: &mut D,
    ) -> Result<(), WalletError>
    where
        D: Dispatcher + ?Sized,
    {
        let record = self
            .ledger
            .get(id)
            .ok_or(WalletError::TransactionNotFound(id))?;

        if !self.config.is_owner(caller) {
            return Err(WalletError::NotOwner(caller.to_string()));
        }

        if record.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }

        let have = record.confirmation_count();
        let need = self.config.required();
        if have < need {
            return Err(WalletError::InsufficientConfirmations { have, need });
        }

        if self.balance < record.value {
            // Nothing committed yet; the attempt stays retryable
            return Err(WalletError::Dispatch(DispatchError::InsufficientFunds {
                have: self.balance,
                need: record.value,
            }));
        }

        let invocation = Invocation::new(
            self.address.clone(),
            record.destination.clone(),
            record.value,
            record.payload.clone(),
        );

        // Commit before the external interaction
        self.record_mut(id)?.executed = true;
        self.balance -= invocation.value;

        if let Err(err) = dispatcher.dispatch(self, &invocation) {
            // Roll back atomically; adjustments are relative so state
            // changed by reentrant callbacks survives
            self.balance += invocation.value;
            self.record_mut(id)?.executed = false;
            log::warn!(
                "Wallet {}: dispatch of transaction {} failed, rolled back: {}",
                self.address,
                id,
                err
            );
            return Err(WalletError::Dispatch(err));
        }

        self.record_event(WalletEvent::Executed {
            id,
            by: caller.to_string(),
            at: Utc::now(),
        });
        log::info!(
            "Wallet {}: transaction {} executed by {} ({} -> {})",
            self.address,
            id,
            caller,
            invocation.value,
            invocation.destination
        );

        Ok(())
    }

    // =========================================================================
    // Deposits
    // =========================================================================

    /// Accept an incoming deposit
    ///
    /// The only unrestricted mutation: any sender may credit the custody
    /// balance at any time. No ledger record is created.
    pub fn deposit(&mut self, from: &str, amount: u64) {
        self.balance += amount;
        self.record_event(WalletEvent::Deposited {
            from: from.to_string(),
            amount,
            at: Utc::now(),
        });
        log::info!(
            "Wallet {}: deposit of {} from {} (balance {})",
            self.address,
            amount,
            from,
            self.balance
        );
    }

    // =========================================================================
    // Queries (unrestricted)
    // =========================================================================

    /// Get the wallet address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the configuration
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Get the owner at a construction-order index
    pub fn owner(&self, index: usize) -> Option<&str> {
        self.config.owner(index)
    }

    /// Get all owners in construction order
    pub fn owners(&self) -> &[String] {
        self.config.owners()
    }

    /// Get the required confirmation count
    pub fn required(&self) -> usize {
        self.config.required()
    }

    /// Get the custodied balance
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Total number of transactions ever submitted
    pub fn transaction_count(&self) -> u64 {
        self.ledger.count()
    }

    /// Get a transaction record by id
    pub fn transaction(&self, id: u64) -> Result<&Transaction, WalletError> {
        self.ledger
            .get(id)
            .ok_or(WalletError::TransactionNotFound(id))
    }

    /// Transactions still awaiting execution
    pub fn pending_transactions(&self) -> Vec<&Transaction> {
        self.ledger.pending()
    }

    /// Number of distinct confirmations for a transaction
    pub fn confirmation_count(&self, id: u64) -> Result<usize, WalletError> {
        Ok(self.transaction(id)?.confirmation_count())
    }

    /// Check whether a specific owner has confirmed a transaction
    pub fn is_confirmed_by(&self, id: u64, owner: &str) -> Result<bool, WalletError> {
        Ok(self.transaction(id)?.is_confirmed_by(owner))
    }

    /// Check whether a transaction has reached the quorum
    pub fn is_confirmed(&self, id: u64) -> Result<bool, WalletError> {
        Ok(self.confirmation_count(id)? >= self.config.required())
    }

    /// Recent audit events, oldest first
    pub fn history(&self) -> &[WalletEvent] {
        &self.history
    }

    /// Get human-readable description like "2-of-3"
    pub fn description(&self) -> String {
        self.config.description()
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn record_mut(&mut self, id: u64) -> Result<&mut Transaction, WalletError> {
        self.ledger
            .get_mut(id)
            .ok_or(WalletError::TransactionNotFound(id))
    }

    fn record_event(&mut self, event: WalletEvent) {
        self.history.push(event);
        if self.history.len() > MAX_EVENT_HISTORY {
            self.history.remove(0);
        }
    }
}
