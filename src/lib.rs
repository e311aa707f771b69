//! Quorum-Wallet: a multi-signature custody engine in Rust
//!
//! A fixed committee of owners jointly custodies funds and authorizes
//! outgoing transfers or opaque external calls. This crate provides:
//! - M-of-N wallet configuration with validated, immutable owner sets
//! - An append-only transaction ledger with per-record confirmation sets
//! - Exactly-once execution with commit-before-dispatch reentrancy safety
//!   and atomic rollback on failed dispatch
//! - Unconditional deposit handling into the custody balance
//! - A pluggable dispatch boundary, with an in-process settlement
//!   implementation (value accounts plus ERC-20 style tokens)
//! - A coordination service serializing access per wallet
//!
//! # Example
//!
//! ```rust
//! use quorum_wallet::crypto::KeyPair;
//! use quorum_wallet::dispatch::{Bank, LocalDispatcher};
//! use quorum_wallet::wallet::MultiSigWallet;
//!
//! let owners: Vec<String> = (0..3).map(|_| KeyPair::generate().address()).collect();
//! let destination = KeyPair::generate().address();
//!
//! // A 2-of-3 wallet
//! let mut wallet = MultiSigWallet::create(owners.clone(), 2).unwrap();
//! let mut dispatcher = LocalDispatcher::new(Bank::new());
//!
//! // Anyone can fund custody; moving funds out takes a quorum
//! wallet.deposit(&owners[0], 100);
//! let id = wallet
//!     .submit_transaction(&owners[0], &destination, 40, vec![])
//!     .unwrap();
//! wallet.confirm_transaction(id, &owners[1]).unwrap();
//! wallet
//!     .execute_transaction(id, &owners[2], &mut dispatcher)
//!     .unwrap();
//!
//! assert_eq!(wallet.balance(), 60);
//! assert_eq!(dispatcher.bank().balance_of(&destination), 40);
//! ```

pub mod crypto;
pub mod dispatch;
pub mod token;
pub mod wallet;

// Re-export commonly used types
pub use crypto::KeyPair;
pub use dispatch::{Bank, DispatchError, Dispatcher, Invocation, LocalDispatcher};
pub use token::{Token, TokenCall, TokenError, TokenManager};
pub use wallet::{
    ConfigError, MultiSigWallet, Transaction, WalletConfig, WalletError, WalletEvent,
    WalletManager,
};
