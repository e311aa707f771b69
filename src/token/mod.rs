//! Fungible tokens and the call format they decode
//!
//! The destination world for opaque wallet call payloads: a wallet
//! transaction whose payload encodes a [`TokenCall`] moves token
//! balances once executed, with the wallet as the calling identity.

pub mod calls;
pub mod manager;
pub mod token;

pub use calls::TokenCall;
pub use manager::TokenManager;
pub use token::{Token, TokenError, TokenMetadata};
