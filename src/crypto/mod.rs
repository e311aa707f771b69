//! Cryptographic utilities for the custody engine
//!
//! This module provides:
//! - SHA-256 hashing (address derivation, checksums)
//! - Owner identity key pairs (secp256k1)

pub mod hash;
pub mod keys;

pub use hash::{double_sha256, sha256, sha256_hex};
pub use keys::{public_key_from_hex, public_key_to_address, KeyError, KeyPair};
