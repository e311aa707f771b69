//! Owner registry and quorum configuration
//!
//! A wallet's committee is fixed at construction: an ordered set of owner
//! identities and the number of confirmations required before any outgoing
//! transaction may execute.

use crate::crypto::{double_sha256, sha256};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by wallet construction parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Owner set must not be empty")]
    EmptyOwners,
    #[error("Required confirmations must be at least 1")]
    RequiredZero,
    #[error("Required confirmations {required} exceeds owner count {owners}")]
    RequiredExceedsOwners { required: usize, owners: usize },
    #[error("Duplicate owner: {0}")]
    DuplicateOwner(String),
}

/// Configuration for a multi-signature wallet
///
/// Immutable for the lifetime of the wallet: no operation adds, removes,
/// or replaces owners, and the threshold never changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletConfig {
    /// Authorized owner identities, in construction order
    owners: Vec<String>,
    /// Minimum confirmations required to execute (M in M-of-N)
    required: usize,
}

impl WalletConfig {
    /// Create a new wallet configuration
    ///
    /// # Errors
    /// Returns an error if the owner set is empty, contains duplicates,
    /// or the threshold is zero or exceeds the owner count.
    pub fn new(owners: Vec<String>, required: usize) -> Result<Self, ConfigError> {
        if owners.is_empty() {
            return Err(ConfigError::EmptyOwners);
        }

        if required == 0 {
            return Err(ConfigError::RequiredZero);
        }

        if required > owners.len() {
            return Err(ConfigError::RequiredExceedsOwners {
                required,
                owners: owners.len(),
            });
        }

        // Check for duplicates
        let mut seen = HashSet::new();
        for owner in &owners {
            if !seen.insert(owner.as_str()) {
                return Err(ConfigError::DuplicateOwner(owner.clone()));
            }
        }

        Ok(Self { owners, required })
    }

    /// Check if an identity is an authorized owner
    pub fn is_owner(&self, identity: &str) -> bool {
        self.owners.iter().any(|o| o == identity)
    }

    /// Get the owner at the given construction-order index
    pub fn owner(&self, index: usize) -> Option<&str> {
        self.owners.get(index).map(String::as_str)
    }

    /// Get all owners in construction order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Get the required confirmation count (M)
    pub fn required(&self) -> usize {
        self.required
    }

    /// Get the total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required, self.owners.len())
    }

    /// Derive the wallet address for this configuration
    ///
    /// Address = Base58Check(version || RIPEMD160(SHA256(required || sorted owners)))
    ///
    /// Owners are sorted before hashing so the same committee always maps
    /// to the same address regardless of construction order.
    pub fn derive_address(&self) -> String {
        let mut sorted_owners = self.owners.clone();
        sorted_owners.sort();

        let mut script_data = self.required.to_be_bytes().to_vec();
        for owner in &sorted_owners {
            script_data.extend_from_slice(owner.as_bytes());
        }

        let sha256_hash = sha256(&script_data);

        let mut ripemd = Ripemd160::new();
        ripemd.update(&sha256_hash);
        let ripemd_hash = ripemd.finalize();

        // Script-style version byte 0x05 -> addresses starting with '3'
        let mut address_bytes = vec![0x05];
        address_bytes.extend_from_slice(&ripemd_hash);

        let checksum = double_sha256(&address_bytes);
        address_bytes.extend_from_slice(&checksum[..4]);

        bs58::encode(address_bytes).into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_owners() -> Vec<String> {
        vec![
            "1AliceXXXXXXXXXXXXXXXXXXXXXXXXXXX".to_string(),
            "1BobXXXXXXXXXXXXXXXXXXXXXXXXXXXXX".to_string(),
            "1CarolXXXXXXXXXXXXXXXXXXXXXXXXXXX".to_string(),
        ]
    }

    #[test]
    fn test_config_creation() {
        let config = WalletConfig::new(sample_owners(), 2).unwrap();

        assert_eq!(config.required(), 2);
        assert_eq!(config.owner_count(), 3);
        assert_eq!(config.description(), "2-of-3");
    }

    #[test]
    fn test_owners_read_back_in_order() {
        let owners = sample_owners();
        let config = WalletConfig::new(owners.clone(), 2).unwrap();

        assert_eq!(config.owner(0), Some(owners[0].as_str()));
        assert_eq!(config.owner(2), Some(owners[2].as_str()));
        assert_eq!(config.owner(3), None);
        assert_eq!(config.owners(), owners.as_slice());
    }

    #[test]
    fn test_config_validation() {
        // Empty owner set
        assert!(matches!(
            WalletConfig::new(vec![], 1),
            Err(ConfigError::EmptyOwners)
        ));

        // Zero threshold
        assert!(matches!(
            WalletConfig::new(sample_owners(), 0),
            Err(ConfigError::RequiredZero)
        ));

        // Threshold > owners
        assert!(matches!(
            WalletConfig::new(sample_owners(), 4),
            Err(ConfigError::RequiredExceedsOwners { .. })
        ));

        // Duplicate owners
        let dup = vec!["same".to_string(), "same".to_string()];
        assert!(matches!(
            WalletConfig::new(dup, 1),
            Err(ConfigError::DuplicateOwner(_))
        ));
    }

    #[test]
    fn test_is_owner() {
        let owners = sample_owners();
        let config = WalletConfig::new(owners.clone(), 2).unwrap();

        assert!(config.is_owner(&owners[0]));
        assert!(config.is_owner(&owners[2]));
        assert!(!config.is_owner("1MalloryXXXXXXXXXXXXXXXXXXXXXXXXX"));
    }

    #[test]
    fn test_address_determinism() {
        let config1 = WalletConfig::new(sample_owners(), 2).unwrap();
        let config2 = WalletConfig::new(sample_owners(), 2).unwrap();

        // Same committee, same address
        assert_eq!(config1.derive_address(), config2.derive_address());
        // Script-style addresses start with '3'
        assert!(config1.derive_address().starts_with('3'));
    }

    #[test]
    fn test_address_ignores_owner_order() {
        let mut reversed = sample_owners();
        reversed.reverse();

        let config1 = WalletConfig::new(sample_owners(), 2).unwrap();
        let config2 = WalletConfig::new(reversed, 2).unwrap();

        assert_eq!(config1.derive_address(), config2.derive_address());
    }

    #[test]
    fn test_address_depends_on_threshold() {
        let config1 = WalletConfig::new(sample_owners(), 2).unwrap();
        let config2 = WalletConfig::new(sample_owners(), 3).unwrap();

        assert_ne!(config1.derive_address(), config2.derive_address());
    }
}
