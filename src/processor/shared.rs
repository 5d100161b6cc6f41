//! Thread-safe handle around a [`StreamProcessor`].

use super::StreamProcessor;
use crate::metrics::ProcessorMetrics;
use crate::types::alert::FraudAlert;
use crate::types::transaction::Transaction;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable processor handle that can be shared across threads.
///
/// Each submission holds the lock for its full push and drain, so a user's
/// accumulate, evaluate and mark-seen steps never interleave with another
/// submission. Readers get snapshots and never see a partially drained log.
#[derive(Debug, Clone, Default)]
pub struct SharedStreamProcessor {
    inner: Arc<Mutex<StreamProcessor>>,
}

impl SharedStreamProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer one transaction and drain, as [`StreamProcessor::submit`]
    pub fn submit(&self, transaction: Transaction) {
        self.lock().submit(transaction);
    }

    /// Buffer a batch and drain once, as [`StreamProcessor::submit_batch`]
    pub fn submit_batch<I>(&self, transactions: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        self.lock().submit_batch(transactions);
    }

    /// Snapshot of the alert log in emission order
    pub fn alerts(&self) -> Vec<FraudAlert> {
        self.lock().alerts().to_vec()
    }

    /// Snapshot of the processing metrics
    pub fn metrics(&self) -> ProcessorMetrics {
        self.lock().metrics().clone()
    }

    fn lock(&self) -> MutexGuard<'_, StreamProcessor> {
        // A panic cannot leave the processor mid-update between drains
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::alert::AlertRule;
    use std::thread;

    fn tx(timestamp: i64, amount: f64, user: &str, service: &str) -> Transaction {
        Transaction::new(timestamp, amount, user, service).unwrap()
    }

    #[test]
    fn test_matches_single_threaded_processor() {
        let input = vec![
            tx(0, 10.0, "alice", "A"),
            tx(60_000, 10.0, "alice", "B"),
            tx(120_000, 10.0, "alice", "A"),
        ];

        let mut single = StreamProcessor::new();
        single.submit_batch(input.clone());

        let shared = SharedStreamProcessor::new();
        shared.submit_batch(input);

        assert_eq!(shared.alerts(), single.alerts());
        assert_eq!(shared.metrics(), *single.metrics());
    }

    #[test]
    fn test_concurrent_users_processed_independently() {
        let shared = SharedStreamProcessor::new();
        let users = ["alice", "bob", "carol", "dave"];

        let handles: Vec<_> = users
            .iter()
            .map(|&user| {
                let handle = shared.clone();
                thread::spawn(move || {
                    for i in 0..4 {
                        handle.submit(tx(i * 60_000, 0.0, user, "A"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let alerts = shared.alerts();
        assert_eq!(alerts.len(), users.len());
        assert!(alerts.iter().all(|a| a.rule == AlertRule::ServiceCountBurst));
        assert_eq!(shared.metrics().transactions_processed, 16);
    }
}
