//! Withdrawals of merchant balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    /// Being processed.
    Processing,
    /// Rejected.
    Rejected,
    /// Transferred to the merchant's bank account (the API spells it `transfered`).
    #[serde(rename = "transfered")]
    Transferred,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A withdrawal of the merchant's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Withdrawal identifier.
    pub id: String,
    /// Amount in minor units.
    pub amount: i64,
    /// Current state.
    pub status: WithdrawalStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}
