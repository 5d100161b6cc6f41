//! Type definitions for the fraud stream processor

pub mod alert;
pub mod transaction;

pub use alert::{AlertRule, FraudAlert};
pub use transaction::{Transaction, TransactionError};
