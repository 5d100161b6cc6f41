//! Ordering buffer releasing pending transactions by timestamp

use crate::types::transaction::Transaction;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Pending transaction keyed by (timestamp, arrival sequence).
#[derive(Debug)]
struct Pending {
    timestamp: i64,
    seq: u64,
    transaction: Transaction,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-heap of not-yet-processed transactions.
///
/// Equal timestamps are released in insertion order. The buffer is unbounded.
#[derive(Debug, Default)]
pub struct OrderingBuffer {
    heap: BinaryHeap<Reverse<Pending>>,
    next_seq: u64,
}

impl OrderingBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction to the buffer
    pub fn push(&mut self, transaction: Transaction) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(Reverse(Pending {
            timestamp: transaction.timestamp(),
            seq,
            transaction,
        }));
    }

    /// Remove and return the earliest pending transaction
    pub fn pop_earliest(&mut self) -> Option<Transaction> {
        self.heap.pop().map(|Reverse(pending)| pending.transaction)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(timestamp: i64, service: &str) -> Transaction {
        Transaction::new(timestamp, 1.0, "u", service).unwrap()
    }

    #[test]
    fn test_releases_in_timestamp_order() {
        let mut buffer = OrderingBuffer::new();
        buffer.push(tx(30, "a"));
        buffer.push(tx(10, "b"));
        buffer.push(tx(20, "c"));

        assert_eq!(buffer.len(), 3);

        let order: Vec<i64> = std::iter::from_fn(|| buffer.pop_earliest())
            .map(|t| t.timestamp())
            .collect();
        assert_eq!(order, vec![10, 20, 30]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_ties_release_in_insertion_order() {
        let mut buffer = OrderingBuffer::new();
        buffer.push(tx(5, "first"));
        buffer.push(tx(1, "early"));
        buffer.push(tx(5, "second"));
        buffer.push(tx(5, "third"));

        let services: Vec<String> = std::iter::from_fn(|| buffer.pop_earliest())
            .map(|t| t.service_id().to_string())
            .collect();
        assert_eq!(services, vec!["early", "first", "second", "third"]);
    }

    #[test]
    fn test_empty_buffer() {
        let mut buffer = OrderingBuffer::new();
        assert!(buffer.pop_earliest().is_none());
    }
}
