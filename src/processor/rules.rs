//! Fixed fraud detection heuristics.
//!
//! Every rule reads the user's state after the current transaction's count
//! and amount were accumulated, but before its timestamp and service were
//! recorded. Windows are measured as the gap since the previous transaction,
//! not as event counts inside a sliding window. Gaps saturate at the `i64`
//! bounds instead of wrapping, so timestamps at opposite extremes read as a
//! huge gap rather than a small negative one.

use crate::processor::state::UserState;
use crate::types::alert::AlertRule;
use crate::types::transaction::Transaction;

/// Burst rule gap limit (5 minutes)
pub const BURST_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Ping-pong rule gap limit (10 minutes)
pub const PING_PONG_WINDOW_MS: i64 = 10 * 60 * 1000;

/// Burst rule fires once the cumulative count exceeds this
pub const BURST_MIN_COUNT: u64 = 3;

/// Amount rule multiplier applied to the transaction amount
pub const OUTLIER_FACTOR: f64 = 5.0;

/// Rule A: more than three cumulative transactions, and this one within five
/// minutes of the previous.
///
/// Counts all transactions of the user, not distinct services.
pub fn service_count_burst(state: &UserState, transaction: &Transaction) -> bool {
    state.transaction_count > BURST_MIN_COUNT
        && state
            .gap_since_last(transaction.timestamp())
            .is_some_and(|gap| gap <= BURST_WINDOW_MS)
}

/// Rule B: `5 * amount` exceeds the cumulative running mean.
///
/// The mean spans the whole run and includes the current transaction, so
/// any positive amount trips this on a user's first transaction.
pub fn amount_outlier(state: &UserState, transaction: &Transaction) -> bool {
    OUTLIER_FACTOR * transaction.amount() > state.running_mean()
}

/// Rule C: previous transaction within ten minutes on a different service.
pub fn ping_pong(state: &UserState, transaction: &Transaction) -> bool {
    let within_window = state
        .gap_since_last(transaction.timestamp())
        .is_some_and(|gap| gap <= PING_PONG_WINDOW_MS);

    within_window
        && state
            .last_service_id
            .as_deref()
            .is_some_and(|last| last != transaction.service_id())
}

/// Evaluate all rules in order and return those that fired.
pub fn evaluate(state: &UserState, transaction: &Transaction) -> Vec<AlertRule> {
    AlertRule::ALL
        .into_iter()
        .filter(|rule| match rule {
            AlertRule::ServiceCountBurst => service_count_burst(state, transaction),
            AlertRule::AmountOutlier => amount_outlier(state, transaction),
            AlertRule::PingPong => ping_pong(state, transaction),
        })
        .collect()
}
