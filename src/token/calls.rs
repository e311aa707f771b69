//! Call data format understood by token destinations
//!
//! A wallet transaction aimed at a token carries its request as opaque
//! bytes; this is the format the token side decodes them with. The
//! caller identity is never part of the payload — it is supplied by the
//! transport, the way a call's sender always is.

use serde::{Deserialize, Serialize};

/// A decoded token call
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenCall {
    /// Move tokens from the caller to a recipient
    Transfer { to: String, amount: u128 },
    /// Let a spender move tokens on the caller's behalf
    Approve { spender: String, amount: u128 },
    /// Move tokens the caller has an allowance for
    TransferFrom {
        from: String,
        to: String,
        amount: u128,
    },
}

impl TokenCall {
    /// Encode this call as payload bytes
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode payload bytes into a call
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let call = TokenCall::Transfer {
            to: "recipient".to_string(),
            amount: 10_000,
        };

        let payload = call.encode().unwrap();
        assert!(!payload.is_empty());
        assert_eq!(TokenCall::decode(&payload).unwrap(), call);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(TokenCall::decode(b"not json").is_err());
        assert!(TokenCall::decode(b"{\"Unknown\":{}}").is_err());
    }
}
