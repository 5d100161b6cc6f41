//! Fraud Stream Processor Library
//!
//! Re-orders a batch of transaction events by logical timestamp, keeps
//! per-user rolling statistics and flags users with three fixed fraud
//! heuristics.

pub mod config;
pub mod metrics;
pub mod processor;
pub mod reader;
pub mod sink;
pub mod types;

pub use config::AppConfig;
pub use metrics::ProcessorMetrics;
pub use processor::{SharedStreamProcessor, StreamProcessor};
pub use reader::TransactionReader;
pub use sink::{AlertSink, WriterSink};
pub use types::{alert::AlertRule, alert::FraudAlert, transaction::Transaction};
