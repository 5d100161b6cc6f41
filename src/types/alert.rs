//! Fraud alert data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detection heuristic that produced an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertRule {
    /// More than 3 cumulative transactions, the latest within 5 minutes of the previous one
    ServiceCountBurst,
    /// Amount outlier against the user's running mean
    AmountOutlier,
    /// Consecutive transactions on different services within 10 minutes
    PingPong,
}

impl AlertRule {
    /// All rules in evaluation order
    pub const ALL: [AlertRule; 3] = [
        AlertRule::ServiceCountBurst,
        AlertRule::AmountOutlier,
        AlertRule::PingPong,
    ];

    /// Fixed human-readable message for this rule
    pub fn message(self) -> &'static str {
        match self {
            AlertRule::ServiceCountBurst => {
                "User conducted transactions in more than 3 distinct services within a 5-minute window."
            }
            AlertRule::AmountOutlier => {
                "User has a transaction significantly higher than the average amount."
            }
            AlertRule::PingPong => "User involved in ping-pong activity within 10 minutes.",
        }
    }

    /// Short stable name used in logs and metrics
    pub fn name(self) -> &'static str {
        match self {
            AlertRule::ServiceCountBurst => "service_count_burst",
            AlertRule::AmountOutlier => "amount_outlier",
            AlertRule::PingPong => "ping_pong",
        }
    }
}

impl fmt::Display for AlertRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Alert raised when a detection rule fires for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    /// Flagged user
    #[serde(rename = "userID")]
    pub user_id: String,

    /// Rule that fired
    pub rule: AlertRule,

    /// Human-readable description of the rule
    pub message: String,

    /// Logical timestamp of the transaction that triggered the alert
    pub transaction_timestamp: i64,
}

impl FraudAlert {
    /// Create a new fraud alert for a rule
    pub fn new(user_id: impl Into<String>, rule: AlertRule, transaction_timestamp: i64) -> Self {
        Self {
            user_id: user_id.into(),
            rule,
            message: rule.message().to_string(),
            transaction_timestamp,
        }
    }
}
