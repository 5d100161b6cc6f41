//! Timestamp-ordered stream processor and fraud rule evaluation.
//!
//! Each call to [`StreamProcessor::submit`] drains the whole ordering buffer,
//! so reordering only applies among transactions pending at the same time.
//! A transaction submitted after the buffer emptied is processed as-is even
//! if its timestamp is older than ones already processed. Use
//! [`StreamProcessor::submit_batch`] to order a whole batch before draining.

pub mod buffer;
pub mod rules;
pub mod shared;
pub mod state;

pub use buffer::OrderingBuffer;
pub use shared::SharedStreamProcessor;
pub use state::{UserState, UserStateStore};

use crate::metrics::ProcessorMetrics;
use crate::types::alert::FraudAlert;
use crate::types::transaction::{format_event_time, Transaction};
use tracing::{debug, trace};

/// Single-owner fraud detection engine.
///
/// Owns its ordering buffer, per-user state and alert log; independent
/// instances never share state.
#[derive(Debug, Default)]
pub struct StreamProcessor {
    buffer: OrderingBuffer,
    users: UserStateStore,
    alerts: Vec<FraudAlert>,
    metrics: ProcessorMetrics,
}

impl StreamProcessor {
    /// Create a processor with empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer one transaction, then drain the buffer in timestamp order.
    pub fn submit(&mut self, transaction: Transaction) {
        self.buffer.push(transaction);
        self.drain();
    }

    /// Buffer every transaction of a batch, then drain once.
    pub fn submit_batch<I>(&mut self, transactions: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        for transaction in transactions {
            self.buffer.push(transaction);
        }
        self.drain();
    }

    /// Alert log in emission order
    pub fn alerts(&self) -> &[FraudAlert] {
        &self.alerts
    }

    /// Consume the processor, returning the alert log
    pub fn into_alerts(self) -> Vec<FraudAlert> {
        self.alerts
    }

    /// Rolling state for a user, if any transaction was processed for it
    pub fn user_state(&self, user_id: &str) -> Option<&UserState> {
        self.users.get(user_id)
    }

    /// Number of distinct users seen
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Transactions still waiting in the ordering buffer
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn metrics(&self) -> &ProcessorMetrics {
        &self.metrics
    }

    fn drain(&mut self) {
        self.metrics.record_buffer_depth(self.buffer.len());

        while let Some(transaction) = self.buffer.pop_earliest() {
            self.process(&transaction);
        }
    }

    fn process(&mut self, transaction: &Transaction) {
        self.metrics.record_release(transaction.timestamp());

        let state = self.users.accumulate(transaction);
        let fired = rules::evaluate(state, transaction);

        trace!(
            user_id = %transaction.user_id(),
            service_id = %transaction.service_id(),
            event_time = %format_event_time(transaction.timestamp()),
            amount = transaction.amount(),
            transaction_count = state.transaction_count,
            running_mean = state.running_mean(),
            "Transaction evaluated"
        );

        for rule in fired {
            debug!(
                user_id = %transaction.user_id(),
                rule = %rule,
                event_time = %format_event_time(transaction.timestamp()),
                "Fraud rule fired"
            );
            self.metrics.record_alert(rule);
            self.alerts.push(FraudAlert::new(
                transaction.user_id(),
                rule,
                transaction.timestamp(),
            ));
        }

        self.users.mark_seen(transaction);
    }
}
