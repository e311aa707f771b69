//! In-process dispatch implementation
//!
//! Settles approved invocations against a [`Bank`] of value accounts and
//! a [`TokenManager`] of deployed tokens. An empty payload is a plain
//! value transfer to the destination account; a non-empty payload must be
//! aimed at a deployed token, which decodes and applies it with the
//! wallet as the calling identity.

use crate::dispatch::bank::Bank;
use crate::dispatch::invocation::{DispatchError, Dispatcher, Invocation};
use crate::token::{TokenCall, TokenManager};
use crate::wallet::MultiSigWallet;

/// Dispatcher settling invocations in-process
#[derive(Clone, Debug, Default)]
pub struct LocalDispatcher {
    bank: Bank,
    tokens: TokenManager,
}

impl LocalDispatcher {
    /// Create a dispatcher over a bank, with no tokens deployed
    pub fn new(bank: Bank) -> Self {
        Self {
            bank,
            tokens: TokenManager::new(),
        }
    }

    /// Create a dispatcher over a bank and an existing token registry
    pub fn with_tokens(bank: Bank, tokens: TokenManager) -> Self {
        Self { bank, tokens }
    }

    /// The bank of value accounts
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut Bank {
        &mut self.bank
    }

    /// The token registry
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenManager {
        &mut self.tokens
    }
}

impl Dispatcher for LocalDispatcher {
    fn dispatch(
        &mut self,
        _wallet: &mut MultiSigWallet,
        invocation: &Invocation,
    ) -> Result<(), DispatchError> {
        if invocation.is_plain_transfer() {
            self.bank.credit(&invocation.destination, invocation.value);
            log::debug!(
                "Dispatched {} from {} to {}",
                invocation.value,
                invocation.source,
                invocation.destination
            );
            return Ok(());
        }

        // Call data needs something at the destination to decode it
        if !self.tokens.exists(&invocation.destination) {
            return Err(DispatchError::NoHandler(invocation.destination.clone()));
        }

        let call = TokenCall::decode(&invocation.payload)?;
        self.tokens
            .apply_call(&invocation.destination, &invocation.source, &call)?;

        // Any riding value settles at the destination after the call
        if invocation.value > 0 {
            self.bank.credit(&invocation.destination, invocation.value);
        }

        log::debug!(
            "Dispatched call from {} to token {}",
            invocation.source,
            invocation.destination
        );
        Ok(())
    }
}
