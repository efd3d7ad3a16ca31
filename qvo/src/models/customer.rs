//! Customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Card, Subscription, Transaction};

/// A customer of the merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Card charged by default, if one is set.
    #[serde(default)]
    pub default_payment_method: Option<Card>,
    /// Subscriptions held by the customer.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    /// Stored cards.
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Recent transactions.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Fields to change on an existing customer.
///
/// Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// Card to charge by default.
    pub default_payment_method_id: Option<String>,
}

impl CustomerUpdate {
    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.default_payment_method_id.is_none()
    }
}
