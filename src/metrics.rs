//! Processing statistics for the stream processor.

use crate::types::alert::AlertRule;
use std::collections::BTreeMap;
use tracing::info;

/// Counters collected while draining the ordering buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessorMetrics {
    /// Total transactions drained and evaluated
    pub transactions_processed: u64,
    /// Total alerts appended to the log
    pub alerts_generated: u64,
    /// Alerts by rule
    alerts_by_rule: BTreeMap<AlertRule, u64>,
    /// Largest number of pending transactions seen before a drain
    pub peak_buffer_depth: usize,
    /// Transactions released with a timestamp older than the one released before
    pub late_releases: u64,
    /// Timestamp of the last released transaction
    last_released: Option<i64>,
}

impl ProcessorMetrics {
    /// Create an empty metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the buffer depth observed before a drain
    pub fn record_buffer_depth(&mut self, depth: usize) {
        self.peak_buffer_depth = self.peak_buffer_depth.max(depth);
    }

    /// Record a transaction released from the buffer
    pub fn record_release(&mut self, timestamp: i64) {
        self.transactions_processed += 1;

        if self.last_released.is_some_and(|last| timestamp < last) {
            self.late_releases += 1;
        }
        self.last_released = Some(timestamp);
    }

    /// Record an alert
    pub fn record_alert(&mut self, rule: AlertRule) {
        self.alerts_generated += 1;
        *self.alerts_by_rule.entry(rule).or_insert(0) += 1;
    }

    /// Alert count for a single rule
    pub fn alerts_for(&self, rule: AlertRule) -> u64 {
        self.alerts_by_rule.get(&rule).copied().unwrap_or(0)
    }

    /// Log summary statistics
    pub fn log_summary(&self, distinct_users: usize) {
        let alert_rate = if self.transactions_processed > 0 {
            (self.alerts_generated as f64 / self.transactions_processed as f64) * 100.0
        } else {
            0.0
        };

        info!("══════════ FRAUD STREAM PROCESSOR - SUMMARY ══════════");
        info!(
            "Transactions processed: {:>8}  │  Distinct users: {:>6}",
            self.transactions_processed, distinct_users
        );
        info!(
            "Alerts generated:       {:>8}  │  Alerts per tx:  {:>5.1}%",
            self.alerts_generated, alert_rate
        );
        info!(
            "Peak buffer depth:      {:>8}  │  Late releases:  {:>6}",
            self.peak_buffer_depth, self.late_releases
        );
        for rule in AlertRule::ALL {
            info!("  {:20}: {:>6}", rule.name(), self.alerts_for(rule));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let mut metrics = ProcessorMetrics::new();

        metrics.record_release(10);
        metrics.record_release(20);
        metrics.record_alert(AlertRule::AmountOutlier);
        metrics.record_alert(AlertRule::AmountOutlier);
        metrics.record_alert(AlertRule::PingPong);

        assert_eq!(metrics.transactions_processed, 2);
        assert_eq!(metrics.alerts_generated, 3);
        assert_eq!(metrics.alerts_for(AlertRule::AmountOutlier), 2);
        assert_eq!(metrics.alerts_for(AlertRule::ServiceCountBurst), 0);
    }

    #[test]
    fn test_late_releases_and_depth() {
        let mut metrics = ProcessorMetrics::new();

        metrics.record_buffer_depth(3);
        metrics.record_buffer_depth(1);
        metrics.record_release(100);
        metrics.record_release(50);
        metrics.record_release(50);
        metrics.record_release(200);

        assert_eq!(metrics.peak_buffer_depth, 3);
        assert_eq!(metrics.late_releases, 1);
    }
}
