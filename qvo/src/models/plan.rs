//! Subscription plans.

use std::{convert::Infallible, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Subscription;

/// Currency a plan is priced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanCurrency {
    /// Chilean peso.
    Clp,
    /// Unidad de fomento.
    Uf,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl PlanCurrency {
    /// Wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clp => "CLP",
            Self::Uf => "UF",
            Self::Other(other) => other,
        }
    }
}

impl FromStr for PlanCurrency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "CLP" => Self::Clp,
            "UF" => Self::Uf,
            _ => Self::Other(s.to_owned()),
        })
    }
}

/// Billing interval unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Daily.
    Day,
    /// Weekly.
    Week,
    /// Monthly.
    Month,
    /// Yearly.
    Year,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Interval {
    /// Wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Other(other) => other,
        }
    }
}

impl FromStr for Interval {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "day" => Self::Day,
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::Other(s.to_owned()),
        })
    }
}

/// Whether a plan accepts new subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Accepts new subscriptions.
    Active,
    /// Closed to new subscriptions.
    Inactive,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan identifier, chosen by the merchant.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price per interval.
    pub price: Decimal,
    /// Pricing currency.
    pub currency: PlanCurrency,
    /// Billing interval unit.
    pub interval: Interval,
    /// Number of interval units per billing cycle.
    #[serde(default)]
    pub interval_count: i32,
    /// Free days before the first charge.
    #[serde(default)]
    pub trial_period_days: i32,
    /// Cycles a subscription lasts when it does not set its own count.
    #[serde(default)]
    pub default_cycle_count: Option<i32>,
    /// Availability.
    pub status: PlanStatus,
    /// Subscriptions on this plan.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlan {
    /// Identifier for the new plan.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price per interval; must not be negative.
    pub price: Decimal,
    /// Pricing currency.
    pub currency: PlanCurrency,
    /// Billing interval unit (server default when `None`).
    pub interval: Option<Interval>,
    /// Interval units per cycle.
    pub interval_count: Option<i32>,
    /// Free trial days.
    pub trial_period_days: Option<i32>,
    /// Default number of cycles.
    pub default_cycle_count: Option<i32>,
}

impl NewPlan {
    /// Plan with only the required fields set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        currency: PlanCurrency,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            currency,
            interval: None,
            interval_count: None,
            trial_period_days: None,
            default_cycle_count: None,
        }
    }
}
