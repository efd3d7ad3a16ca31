//! Webpay Plus redirect charges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A one-off Webpay Plus charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebpayRequest {
    /// Amount in minor units; must be positive.
    pub amount: i64,
    /// Where Webpay sends the customer back to.
    pub return_url: String,
    /// Customer to attach the transaction to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WebpayRequest {
    /// Charge with only the required fields set.
    #[must_use]
    pub fn new(amount: i64, return_url: impl Into<String>) -> Self {
        Self { amount, return_url: return_url.into(), customer_id: None, description: None }
    }
}

/// Where to send the customer to complete a Webpay Plus charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebpayResponse {
    /// Transaction created for the charge.
    pub transaction_id: String,
    /// Webpay page for the customer.
    pub redirect_url: String,
    /// When the redirect stops being valid.
    pub expiration_date: DateTime<Utc>,
}
