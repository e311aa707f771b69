//! Multi-signature custody wallets
//!
//! Provides M-of-N wallets where a fixed committee of owners jointly
//! custodies funds: any owner may propose an outgoing transfer or opaque
//! call, and execution requires M distinct owner confirmations.
//!
//! # Example
//!
//! ```ignore
//! use quorum_wallet::wallet::{MultiSigWallet, WalletConfig};
//! use quorum_wallet::dispatch::{Bank, LocalDispatcher};
//!
//! // Create a 2-of-3 wallet
//! let config = WalletConfig::new(vec![alice, bob, carol], 2)?;
//! let mut wallet = MultiSigWallet::new(config);
//!
//! // Fund it, propose, confirm, execute
//! wallet.deposit(&sender, 100);
//! let id = wallet.submit_transaction(&alice, &dest, 40, vec![])?;
//! wallet.confirm_transaction(id, &bob)?;
//! wallet.execute_transaction(id, &carol, &mut dispatcher)?;
//! ```

pub mod config;
pub mod manager;
pub mod transaction;
pub mod wallet;

pub use config::{ConfigError, WalletConfig};
pub use manager::WalletManager;
pub use transaction::{Transaction, TransactionLedger};
pub use wallet::{MultiSigWallet, WalletError, WalletEvent};
