//! Wallet coordination service
//!
//! Owns every wallet aggregate and serializes access to each one behind
//! its own lock, so every submit/confirm/execute/deposit invocation runs
//! to completion without interleaving with another invocation on the same
//! wallet. Wallets are independent: operations on different wallets do
//! not contend.

use crate::dispatch::Dispatcher;
use crate::wallet::config::WalletConfig;
use crate::wallet::wallet::{MultiSigWallet, WalletError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Manager for multisig wallets
#[derive(Debug, Default)]
pub struct WalletManager {
    /// Wallets by address, each behind its own lock
    wallets: RwLock<HashMap<String, Arc<Mutex<MultiSigWallet>>>>,
}

impl WalletManager {
    /// Create a new empty manager
    pub fn new() -> Self {
        Self {
            wallets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new multisig wallet and return its address
    ///
    /// The address is deterministic in the configuration, so creating a
    /// wallet for a committee that already has one returns the existing
    /// address unchanged.
    pub fn create_wallet(&self, config: WalletConfig) -> String {
        let wallet = MultiSigWallet::new(config);
        let address = wallet.address().to_string();

        let mut map = self
            .wallets
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if map.contains_key(&address) {
            return address;
        }

        log::info!("Multisig wallet {} created ({})", address, wallet.description());
        map.insert(address.clone(), Arc::new(Mutex::new(wallet)));
        address
    }

    /// Check if an address belongs to a managed wallet
    pub fn is_wallet_address(&self, address: &str) -> bool {
        self.wallets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(address)
    }

    /// Get the number of managed wallets
    pub fn wallet_count(&self) -> usize {
        self.wallets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Addresses of all managed wallets
    pub fn addresses(&self) -> Vec<String> {
        self.wallets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Submit a transaction proposal to a wallet
    pub fn submit(
        &self,
        address: &str,
        submitter: &str,
        destination: &str,
        value: u64,
        payload: Vec<u8>,
    ) -> Result<u64, WalletError> {
        let cell = self.wallet_cell(address)?;
        let mut wallet = lock(&cell);
        wallet.submit_transaction(submitter, destination, value, payload)
    }

    /// Confirm a pending transaction
    pub fn confirm(&self, address: &str, id: u64, owner: &str) -> Result<(), WalletError> {
        let cell = self.wallet_cell(address)?;
        let mut wallet = lock(&cell);
        wallet.confirm_transaction(id, owner)
    }

    /// Execute a confirmed transaction through the given dispatcher
    pub fn execute(
        &self,
        address: &str,
        id: u64,
        caller: &str,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<(), WalletError> {
        let cell = self.wallet_cell(address)?;
        let mut wallet = lock(&cell);
        wallet.execute_transaction(id, caller, dispatcher)
    }

    /// Deposit funds into a wallet's custody
    pub fn deposit(&self, address: &str, from: &str, amount: u64) -> Result<(), WalletError> {
        let cell = self.wallet_cell(address)?;
        let mut wallet = lock(&cell);
        wallet.deposit(from, amount);
        Ok(())
    }

    /// Run a read-only closure against a wallet under its lock
    pub fn with_wallet<R>(
        &self,
        address: &str,
        f: impl FnOnce(&MultiSigWallet) -> R,
    ) -> Result<R, WalletError> {
        let cell = self.wallet_cell(address)?;
        let wallet = lock(&cell);
        Ok(f(&wallet))
    }

    fn wallet_cell(&self, address: &str) -> Result<Arc<Mutex<MultiSigWallet>>, WalletError> {
        self.wallets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned()
            .ok_or_else(|| WalletError::WalletNotFound(address.to_string()))
    }
}

fn lock(cell: &Mutex<MultiSigWallet>) -> MutexGuard<'_, MultiSigWallet> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}
