//! Transaction records and the append-only ledger
//!
//! Every proposed outgoing transfer or opaque call becomes a permanent
//! ledger record. Records are indexed by dense, monotonically assigned
//! 0-based ids; nothing is ever deleted, and after creation only the
//! `executed` flag and the confirmation set of a record change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A proposed outgoing transfer or opaque call
///
/// An empty payload denotes a plain value transfer; a non-empty payload
/// is an opaque call the engine forwards without interpreting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// Ledger id, assigned in submission order starting at 0
    pub id: u64,
    /// Destination identity
    pub destination: String,
    /// Amount of custodied funds to move
    pub value: u64,
    /// Opaque call data (empty for plain transfers)
    pub payload: Vec<u8>,
    /// Whether the transaction has been dispatched
    pub executed: bool,
    /// Confirming owners and when each confirmed
    confirmations: BTreeMap<String, DateTime<Utc>>,
    /// Owner who submitted the proposal
    pub submitted_by: String,
    /// When the proposal was submitted
    pub submitted_at: DateTime<Utc>,
}

impl Transaction {
    fn new(
        id: u64,
        destination: String,
        value: u64,
        payload: Vec<u8>,
        submitted_by: String,
    ) -> Self {
        Self {
            id,
            destination,
            value,
            payload,
            executed: false,
            confirmations: BTreeMap::new(),
            submitted_by,
            submitted_at: Utc::now(),
        }
    }

    /// Record a confirmation from an owner
    ///
    /// Returns false if the owner had already confirmed; the existing
    /// entry (and its timestamp) is left untouched.
    pub(super) fn record_confirmation(&mut self, owner: &str) -> bool {
        if self.confirmations.contains_key(owner) {
            return false;
        }
        self.confirmations.insert(owner.to_string(), Utc::now());
        true
    }

    /// Number of distinct owners that have confirmed
    pub fn confirmation_count(&self) -> usize {
        self.confirmations.len()
    }

    /// Check if a specific owner has confirmed
    pub fn is_confirmed_by(&self, owner: &str) -> bool {
        self.confirmations.contains_key(owner)
    }

    /// Owners that have confirmed, in identity order
    pub fn confirmed_by(&self) -> Vec<&str> {
        self.confirmations.keys().map(String::as_str).collect()
    }

    /// Check if this is a plain value transfer (no call data)
    pub fn is_plain_transfer(&self) -> bool {
        self.payload.is_empty()
    }

    /// Call data as a hex string, for display and logging
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }
}

/// Append-only store of transaction records
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransactionLedger {
    records: Vec<Transaction>,
}

impl TransactionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a new record and return its id
    ///
    /// Not public: proposals enter the ledger only through the wallet's
    /// submit flow, which seeds the submitter's confirmation.
    pub(super) fn append(
        &mut self,
        destination: String,
        value: u64,
        payload: Vec<u8>,
        submitted_by: String,
    ) -> u64 {
        let id = self.records.len() as u64;
        self.records
            .push(Transaction::new(id, destination, value, payload, submitted_by));
        id
    }

    /// Get a record by id
    pub fn get(&self, id: u64) -> Option<&Transaction> {
        self.records.get(id as usize)
    }

    pub(super) fn get_mut(&mut self, id: u64) -> Option<&mut Transaction> {
        self.records.get_mut(id as usize)
    }

    /// Total number of transactions ever submitted
    pub fn count(&self) -> u64 {
        self.records.len() as u64
    }

    /// Iterate over all records in submission order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.records.iter()
    }

    /// Records that are still awaiting execution
    pub fn pending(&self) -> Vec<&Transaction> {
        self.records.iter().filter(|tx| !tx.executed).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_monotonic() {
        let mut ledger = TransactionLedger::new();

        let id0 = ledger.append("dest1".to_string(), 10, vec![], "alice".to_string());
        let id1 = ledger.append("dest2".to_string(), 20, vec![1, 2], "bob".to_string());

        assert_eq!(id0, 0);
        assert_eq!(id1, 1);
        assert_eq!(ledger.count(), 2);
        assert_eq!(ledger.get(0).unwrap().destination, "dest1");
        assert_eq!(ledger.get(1).unwrap().value, 20);
        assert!(ledger.get(2).is_none());
    }

    #[test]
    fn test_new_record_state() {
        let mut ledger = TransactionLedger::new();
        let id = ledger.append("dest".to_string(), 5, vec![], "alice".to_string());
        let tx = ledger.get(id).unwrap();

        assert!(!tx.executed);
        assert_eq!(tx.confirmation_count(), 0);
        assert_eq!(tx.submitted_by, "alice");
        assert!(tx.is_plain_transfer());
    }

    #[test]
    fn test_confirmation_is_idempotent() {
        let mut ledger = TransactionLedger::new();
        let id = ledger.append("dest".to_string(), 5, vec![], "alice".to_string());
        let tx = ledger.get_mut(id).unwrap();

        assert!(tx.record_confirmation("alice"));
        assert!(!tx.record_confirmation("alice"));
        assert_eq!(tx.confirmation_count(), 1);

        assert!(tx.record_confirmation("bob"));
        assert_eq!(tx.confirmation_count(), 2);
        assert!(tx.is_confirmed_by("alice"));
        assert!(tx.is_confirmed_by("bob"));
        assert!(!tx.is_confirmed_by("carol"));
        assert_eq!(tx.confirmed_by(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_payload_hex() {
        let mut ledger = TransactionLedger::new();
        let id = ledger.append("dest".to_string(), 0, vec![0xde, 0xad], "alice".to_string());
        let tx = ledger.get(id).unwrap();

        assert!(!tx.is_plain_transfer());
        assert_eq!(tx.payload_hex(), "dead");
    }

    #[test]
    fn test_pending_filter() {
        let mut ledger = TransactionLedger::new();
        ledger.append("a".to_string(), 1, vec![], "alice".to_string());
        let id = ledger.append("b".to_string(), 2, vec![], "alice".to_string());
        ledger.get_mut(id).unwrap().executed = true;

        let pending = ledger.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 0);
    }
}
