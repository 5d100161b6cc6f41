//! Fraud Stream Processor - Main Entry Point
//!
//! Reads a transaction file, processes it in timestamp order and writes
//! fraud alerts to standard output.

use anyhow::Result;
use fraud_stream_processor::{
    config::{AppConfig, LogFormat, DEFAULT_CONFIG_PATH},
    processor::StreamProcessor,
    reader::TransactionReader,
    sink::{AlertSink, WriterSink},
};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load_or_default(&config_path)?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!("fraud_stream_processor={}", config.logging.level))
    })?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    info!(config = %config_path, "Starting Fraud Stream Processor");

    let outcome = TransactionReader::from_path(&config.input.path)?;
    let start_time = Instant::now();

    let mut processor = StreamProcessor::new();
    if config.input.batch {
        processor.submit_batch(outcome.transactions);
    } else {
        for transaction in outcome.transactions {
            processor.submit(transaction);
        }
    }

    info!(
        processing_time_us = start_time.elapsed().as_micros() as u64,
        "Transactions processed"
    );

    let mut sink = WriterSink::stdout(config.output.format);
    let emitted = sink.emit_all(processor.alerts());
    sink.into_inner()?;
    info!(emitted, "Alerts written");

    processor.metrics().log_summary(processor.user_count());

    Ok(())
}
