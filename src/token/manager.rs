//! Token registry and call routing
//!
//! Deploys tokens at deterministic addresses and applies decoded calls
//! to the right token on behalf of a caller.

use crate::crypto::sha256;
use crate::token::calls::TokenCall;
use crate::token::token::{Token, TokenError, TokenMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Manages all deployed tokens
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenManager {
    /// All tokens by address
    tokens: HashMap<String, Token>,
    /// Deployment counter for address generation
    nonce: u64,
}

impl TokenManager {
    /// Create a new empty manager
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
            nonce: 0,
        }
    }

    /// Deploy a new token and return its address
    ///
    /// All supply is initially allocated to the creator.
    pub fn deploy(
        &mut self,
        name: String,
        symbol: String,
        decimals: u8,
        total_supply: u128,
        creator: &str,
    ) -> Result<String, TokenError> {
        let metadata = TokenMetadata::new(name, symbol, decimals, total_supply, creator.to_string())?;

        let address = self.generate_address(creator, &metadata.symbol);
        self.nonce += 1;

        let token = Token::new(address.clone(), metadata);
        log::info!(
            "Token deployed: {} ({}) at {}",
            token.name(),
            token.symbol(),
            address
        );
        self.tokens.insert(address.clone(), token);

        Ok(address)
    }

    /// Generate a token address from creator, symbol and deployment nonce
    fn generate_address(&self, creator: &str, symbol: &str) -> String {
        let input = format!("{}:{}:{}", creator, symbol, self.nonce);
        let hash = sha256(input.as_bytes());
        format!("0x{}", &hex::encode(hash)[..40])
    }

    /// Get a token by address
    pub fn get(&self, address: &str) -> Option<&Token> {
        self.tokens.get(address)
    }

    /// Check if a token exists at an address
    pub fn exists(&self, address: &str) -> bool {
        self.tokens.contains_key(address)
    }

    /// Get token count
    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    /// Apply a decoded call to a token on behalf of a caller
    ///
    /// The caller is whoever the transport says is making the call; for
    /// wallet executions that is the wallet address.
    pub fn apply_call(
        &mut self,
        token_address: &str,
        caller: &str,
        call: &TokenCall,
    ) -> Result<(), TokenError> {
        let token = self
            .tokens
            .get_mut(token_address)
            .ok_or_else(|| TokenError::TokenNotFound(token_address.to_string()))?;

        match call {
            TokenCall::Transfer { to, amount } => token.transfer(caller, to, *amount),
            TokenCall::Approve { spender, amount } => {
                token.approve(caller, spender, *amount);
                Ok(())
            }
            TokenCall::TransferFrom { from, to, amount } => {
                token.transfer_from(caller, from, to, *amount)
            }
        }
    }

    /// Transfer tokens directly (host-side convenience, e.g. funding a
    /// wallet's token balance)
    pub fn transfer(
        &mut self,
        token_address: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<(), TokenError> {
        let token = self
            .tokens
            .get_mut(token_address)
            .ok_or_else(|| TokenError::TokenNotFound(token_address.to_string()))?;

        token.transfer(from, to, amount)
    }

    /// Get balance of an identity for a specific token
    pub fn balance_of(&self, token_address: &str, holder: &str) -> Result<u128, TokenError> {
        let token = self
            .tokens
            .get(token_address)
            .ok_or_else(|| TokenError::TokenNotFound(token_address.to_string()))?;

        Ok(token.balance_of(holder))
    }

    /// Get allowance for a spender on a specific token
    pub fn allowance(
        &self,
        token_address: &str,
        owner: &str,
        spender: &str,
    ) -> Result<u128, TokenError> {
        let token = self
            .tokens
            .get(token_address)
            .ok_or_else(|| TokenError::TokenNotFound(token_address.to_string()))?;

        Ok(token.allowance(owner, spender))
    }
}
