//! The invoke boundary between the engine and the outside world
//!
//! An approved transaction is forwarded as an [`Invocation`] through a
//! [`Dispatcher`]. The engine never interprets the payload bytes; whatever
//! sits at the destination decodes them.

use crate::token::TokenError;
use crate::wallet::MultiSigWallet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a dispatch attempt
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Insufficient custody balance: have {have}, need {need}")]
    InsufficientFunds { have: u64, need: u64 },
    #[error("Destination cannot accept call data: {0}")]
    NoHandler(String),
    #[error("Malformed call data: {0}")]
    MalformedCall(#[from] serde_json::Error),
    #[error("Call reverted: {0}")]
    Reverted(#[from] TokenError),
}

/// The forwarded tuple: who is calling, where to, how much, and the
/// opaque call data
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invocation {
    /// Address of the wallet making the call
    pub source: String,
    /// Destination identity
    pub destination: String,
    /// Value riding along with the call
    pub value: u64,
    /// Opaque call data (empty for plain transfers)
    pub payload: Vec<u8>,
}

impl Invocation {
    /// Create a new invocation
    pub fn new(source: String, destination: String, value: u64, payload: Vec<u8>) -> Self {
        Self {
            source,
            destination,
            value,
            payload,
        }
    }

    /// Check if this is a plain value transfer (no call data)
    pub fn is_plain_transfer(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Transport for approved outgoing invocations
///
/// Implementations must apply their effect all-or-nothing: when
/// `dispatch` returns an error, no part of the effect may survive, so
/// the wallet can roll the execution back and leave the transaction
/// retryable.
///
/// The dispatcher receives the wallet it is dispatching for. This is
/// deliberate: a dispatch may call back into the wallet (submit,
/// confirm, even execute) before returning, and the wallet commits its
/// execution state before dispatching exactly so such callbacks observe
/// the transaction as already executed.
pub trait Dispatcher {
    /// Deliver value and payload to the destination
    fn dispatch(
        &mut self,
        wallet: &mut MultiSigWallet,
        invocation: &Invocation,
    ) -> Result<(), DispatchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_transfer_detection() {
        let plain = Invocation::new("src".to_string(), "dst".to_string(), 10, vec![]);
        let call = Invocation::new("src".to_string(), "dst".to_string(), 0, vec![1]);

        assert!(plain.is_plain_transfer());
        assert!(!call.is_plain_transfer());
    }
}
