//! Fungible token ledger
//!
//! ERC-20 style tokens: a fixed supply allocated to the creator at
//! deployment, per-holder balances, and allowances for delegated
//! transfers. Tokens are the destinations wallet call payloads are
//! aimed at; the custody engine itself never touches these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Token not found: {0}")]
    TokenNotFound(String),
    #[error("Invalid address: cannot transfer to self")]
    SelfTransfer,
    #[error("Invalid symbol: must be 1-10 characters")]
    InvalidSymbol,
    #[error("Invalid name: must be 1-50 characters")]
    InvalidName,
    #[error("Invalid decimals: must be 0-18")]
    InvalidDecimals,
    #[error("Invalid supply: must be greater than 0")]
    InvalidSupply,
}

/// Token metadata (immutable after deployment)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenMetadata {
    /// Token name (e.g., "My Token")
    pub name: String,
    /// Token symbol (e.g., "MTK")
    pub symbol: String,
    /// Decimal places
    pub decimals: u8,
    /// Total supply (fixed at deployment)
    pub total_supply: u128,
    /// Creator identity
    pub creator: String,
    /// When the token was deployed
    pub created_at: DateTime<Utc>,
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(
        name: String,
        symbol: String,
        decimals: u8,
        total_supply: u128,
        creator: String,
    ) -> Result<Self, TokenError> {
        if name.is_empty() || name.len() > 50 {
            return Err(TokenError::InvalidName);
        }

        if symbol.is_empty() || symbol.len() > 10 {
            return Err(TokenError::InvalidSymbol);
        }

        if decimals > 18 {
            return Err(TokenError::InvalidDecimals);
        }

        if total_supply == 0 {
            return Err(TokenError::InvalidSupply);
        }

        Ok(Self {
            name,
            symbol,
            decimals,
            total_supply,
            creator,
            created_at: Utc::now(),
        })
    }
}

/// A fungible token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Unique token address
    pub address: String,
    /// Token metadata
    pub metadata: TokenMetadata,
    /// Balances: identity -> amount
    balances: HashMap<String, u128>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<String, HashMap<String, u128>>,
}

impl Token {
    /// Create a new token with all supply allocated to the creator
    pub fn new(address: String, metadata: TokenMetadata) -> Self {
        let mut balances = HashMap::new();
        balances.insert(metadata.creator.clone(), metadata.total_supply);

        Self {
            address,
            metadata,
            balances,
            allowances: HashMap::new(),
        }
    }

    /// Get token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Get total supply
    pub fn total_supply(&self) -> u128 {
        self.metadata.total_supply
    }

    /// Get balance of an identity
    pub fn balance_of(&self, holder: &str) -> u128 {
        *self.balances.get(holder).unwrap_or(&0)
    }

    /// Get allowance for a spender
    pub fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Transfer tokens between identities
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<(), TokenError> {
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }

        if from == to {
            return Err(TokenError::SelfTransfer);
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        *self.balances.entry(from.to_string()).or_insert(0) -= amount;
        *self.balances.entry(to.to_string()).or_insert(0) += amount;

        Ok(())
    }

    /// Approve a spender to transfer on behalf of the owner
    ///
    /// An amount of 0 revokes the approval.
    pub fn approve(&mut self, owner: &str, spender: &str, amount: u128) {
        self.allowances
            .entry(owner.to_string())
            .or_default()
            .insert(spender.to_string(), amount);
    }

    /// Transfer on behalf of an owner (requires prior approval)
    pub fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<(), TokenError> {
        let current_allowance = self.allowance(from, spender);
        if current_allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                have: current_allowance,
                need: amount,
            });
        }

        self.transfer(from, to, amount)?;

        // Reduce allowance only once the transfer went through
        if let Some(spenders) = self.allowances.get_mut(from) {
            if let Some(allowance) = spenders.get_mut(spender) {
                *allowance -= amount;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_token() -> Token {
        let metadata = TokenMetadata::new(
            "Test Token".to_string(),
            "TST".to_string(),
            18,
            1_000_000,
            "creator".to_string(),
        )
        .unwrap();

        Token::new("0xTEST".to_string(), metadata)
    }

    #[test]
    fn test_token_creation() {
        let token = create_test_token();

        assert_eq!(token.name(), "Test Token");
        assert_eq!(token.symbol(), "TST");
        assert_eq!(token.total_supply(), 1_000_000);
        assert_eq!(token.balance_of("creator"), 1_000_000);
    }

    #[test]
    fn test_metadata_validation() {
        // Empty name
        assert!(matches!(
            TokenMetadata::new("".to_string(), "TST".to_string(), 18, 1000, "c".to_string()),
            Err(TokenError::InvalidName)
        ));

        // Symbol too long
        assert!(matches!(
            TokenMetadata::new(
                "Test".to_string(),
                "TOOLONGSYMBOL".to_string(),
                18,
                1000,
                "c".to_string()
            ),
            Err(TokenError::InvalidSymbol)
        ));

        // Decimals out of range
        assert!(matches!(
            TokenMetadata::new("Test".to_string(), "TST".to_string(), 19, 1000, "c".to_string()),
            Err(TokenError::InvalidDecimals)
        ));

        // Zero supply
        assert!(matches!(
            TokenMetadata::new("Test".to_string(), "TST".to_string(), 18, 0, "c".to_string()),
            Err(TokenError::InvalidSupply)
        ));
    }

    #[test]
    fn test_transfer() {
        let mut token = create_test_token();

        token.transfer("creator", "recipient", 1000).unwrap();

        assert_eq!(token.balance_of("creator"), 999_000);
        assert_eq!(token.balance_of("recipient"), 1000);
    }

    #[test]
    fn test_transfer_conserves_supply() {
        let mut token = create_test_token();

        token.transfer("creator", "a", 300).unwrap();
        token.transfer("a", "b", 100).unwrap();

        let total = token.balance_of("creator") + token.balance_of("a") + token.balance_of("b");
        assert_eq!(total, token.total_supply());
    }

    #[test]
    fn test_transfer_errors() {
        let mut token = create_test_token();

        assert!(matches!(
            token.transfer("creator", "recipient", 2_000_000),
            Err(TokenError::InsufficientBalance { .. })
        ));
        assert!(matches!(
            token.transfer("creator", "recipient", 0),
            Err(TokenError::InvalidAmount)
        ));
        assert!(matches!(
            token.transfer("creator", "creator", 100),
            Err(TokenError::SelfTransfer)
        ));
        // Failed transfers leave balances untouched
        assert_eq!(token.balance_of("creator"), 1_000_000);
    }

    #[test]
    fn test_approve_and_transfer_from() {
        let mut token = create_test_token();

        assert_eq!(token.allowance("creator", "spender"), 0);
        token.approve("creator", "spender", 5000);
        assert_eq!(token.allowance("creator", "spender"), 5000);

        token
            .transfer_from("spender", "creator", "recipient", 1000)
            .unwrap();

        assert_eq!(token.balance_of("creator"), 999_000);
        assert_eq!(token.balance_of("recipient"), 1000);
        assert_eq!(token.allowance("creator", "spender"), 4000);
    }

    #[test]
    fn test_transfer_from_insufficient_allowance() {
        let mut token = create_test_token();

        token.approve("creator", "spender", 500);

        let result = token.transfer_from("spender", "creator", "recipient", 1000);
        assert!(matches!(
            result,
            Err(TokenError::InsufficientAllowance { .. })
        ));
        // Allowance untouched on failure
        assert_eq!(token.allowance("creator", "spender"), 500);
    }
}
