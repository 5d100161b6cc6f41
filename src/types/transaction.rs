//! Transaction event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reasons a transaction record is rejected at construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionError {
    #[error("userID must not be empty")]
    EmptyUserId,
    #[error("serviceID must not be empty")]
    EmptyServiceId,
    #[error("amount must be a non-negative finite number, got {0}")]
    InvalidAmount(f64),
}

/// Wire shape of a transaction before validation.
#[derive(Debug, Deserialize)]
struct RawTransaction {
    timestamp: i64,
    amount: f64,
    #[serde(rename = "userID")]
    user_id: String,
    #[serde(rename = "serviceID")]
    service_id: String,
}

/// A single financial transaction event.
///
/// Fields are fixed at construction; deserialization runs the same
/// validation as [`Transaction::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransaction")]
pub struct Transaction {
    /// Logical event time in milliseconds
    timestamp: i64,

    /// Non-negative monetary amount
    amount: f64,

    /// Acting user
    #[serde(rename = "userID")]
    user_id: String,

    /// Service or endpoint the transaction targeted
    #[serde(rename = "serviceID")]
    service_id: String,
}

impl Transaction {
    /// Create a validated transaction
    pub fn new(
        timestamp: i64,
        amount: f64,
        user_id: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Result<Self, TransactionError> {
        let user_id = user_id.into();
        let service_id = service_id.into();

        if user_id.is_empty() {
            return Err(TransactionError::EmptyUserId);
        }
        if service_id.is_empty() {
            return Err(TransactionError::EmptyServiceId);
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(TransactionError::InvalidAmount(amount));
        }

        Ok(Self {
            timestamp,
            amount,
            user_id,
            service_id,
        })
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = TransactionError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        Self::new(raw.timestamp, raw.amount, raw.user_id, raw.service_id)
    }
}

/// Render a millisecond timestamp as RFC 3339 for logs and output.
///
/// Logical clocks that fall outside chrono's range are printed as raw
/// milliseconds.
pub fn format_event_time(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        None => format!("{timestamp_ms}ms"),
    }
}
