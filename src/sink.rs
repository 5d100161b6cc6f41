//! Alert sinks consuming the processor's alert log

use crate::config::OutputFormat;
use crate::types::alert::FraudAlert;
use anyhow::Result;
use std::io::Write;
use tracing::{debug, error};

/// Destination for fraud alerts
pub trait AlertSink {
    /// Emit a single alert
    fn emit(&mut self, alert: &FraudAlert) -> Result<()>;

    /// Emit alerts in order, logging and skipping individual failures.
    ///
    /// Returns the number of alerts emitted successfully.
    fn emit_all(&mut self, alerts: &[FraudAlert]) -> usize {
        let mut emitted = 0;
        for alert in alerts {
            match self.emit(alert) {
                Ok(()) => emitted += 1,
                Err(e) => {
                    error!(
                        user_id = %alert.user_id,
                        rule = %alert.rule,
                        error = %e,
                        "Failed to emit alert"
                    );
                }
            }
        }
        emitted
    }
}

/// Sink writing one line per alert to any writer
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> WriterSink<W> {
    /// Create a new writer sink
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl WriterSink<std::io::Stdout> {
    /// Sink writing to standard output
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write> AlertSink for WriterSink<W> {
    fn emit(&mut self, alert: &FraudAlert) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(
                self.writer,
                "Alert for User {}: {}",
                alert.user_id, alert.message
            )?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, alert)?;
                self.writer.write_all(b"\n")?;
            }
        }

        debug!(
            user_id = %alert.user_id,
            rule = %alert.rule,
            "Emitted fraud alert"
        );
        Ok(())
    }
}
