//! Per-user rolling state

use crate::types::transaction::Transaction;
use std::collections::HashMap;

/// Aggregates kept for one user across a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    /// Cumulative transactions seen for the user (not distinct services)
    pub transaction_count: u64,
    /// Cumulative amount over the whole run
    pub amount_sum: f64,
    /// Timestamp of the most recently processed transaction
    pub last_timestamp: Option<i64>,
    /// Service of the most recently processed transaction
    pub last_service_id: Option<String>,
}

impl UserState {
    /// Cumulative mean amount; the divisor is floored at 1.
    pub fn running_mean(&self) -> f64 {
        self.amount_sum / self.transaction_count.max(1) as f64
    }

    /// Gap from the previously processed transaction to `timestamp`.
    ///
    /// Negative when an older transaction is processed after a newer one.
    pub fn gap_since_last(&self, timestamp: i64) -> Option<i64> {
        self.last_timestamp
            .map(|last| timestamp.saturating_sub(last))
    }

    fn accumulate(&mut self, transaction: &Transaction) {
        self.transaction_count += 1;
        self.amount_sum += transaction.amount();
    }

    fn mark_seen(&mut self, transaction: &Transaction) {
        self.last_timestamp = Some(transaction.timestamp());
        self.last_service_id = Some(transaction.service_id().to_string());
    }
}

/// State container for all users seen by one processor.
#[derive(Debug, Default)]
pub struct UserStateStore {
    users: HashMap<String, UserState>,
}

impl UserStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a transaction's count and amount into its user's state,
    /// creating the state on first sight.
    pub fn accumulate(&mut self, transaction: &Transaction) -> &UserState {
        let state = self
            .users
            .entry(transaction.user_id().to_string())
            .or_default();
        state.accumulate(transaction);
        state
    }

    /// Record the transaction as the user's most recent one.
    pub fn mark_seen(&mut self, transaction: &Transaction) {
        if let Some(state) = self.users.get_mut(transaction.user_id()) {
            state.mark_seen(transaction);
        }
    }

    pub fn get(&self, user_id: &str) -> Option<&UserState> {
        self.users.get(user_id)
    }

    /// Number of distinct users seen
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
