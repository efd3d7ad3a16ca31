//! Subscriptions of customers to plans.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Customer, Plan, Transaction};

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and running.
    Active,
    /// Canceled.
    Canceled,
    /// In the trial period.
    Trialing,
    /// A charge failed and is being retried.
    Retrying,
    /// Not started or ended.
    Inactive,
    /// Charges failed and debt is pending.
    Unpaid,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A customer's subscription to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription identifier.
    pub id: String,
    /// Lifecycle state.
    pub status: SubscriptionStatus,
    /// Outstanding amount in minor units.
    #[serde(default)]
    pub debt: i64,
    /// Start of the subscription.
    pub start: DateTime<Utc>,
    /// End of the subscription, if it has one.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Number of cycles, if bounded.
    #[serde(default)]
    pub cycle_count: Option<i32>,
    /// Start of the current billing period.
    pub current_period_start: DateTime<Utc>,
    /// End of the current billing period.
    pub current_period_end: DateTime<Utc>,
    /// Subscribed customer (omitted when nested inside a customer).
    #[serde(default)]
    pub customer: Option<Box<Customer>>,
    /// Subscribed plan (omitted when nested inside a plan).
    #[serde(default)]
    pub plan: Option<Box<Plan>>,
    /// Charges made for this subscription.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Tax label.
    #[serde(default)]
    pub tax_name: Option<String>,
    /// Tax rate in percent.
    #[serde(default)]
    pub tax_percent: Option<Decimal>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Parameters for subscribing a customer to a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    /// Customer to subscribe.
    pub customer_id: String,
    /// Plan to subscribe to.
    pub plan_id: String,
    /// Tax label; must be given together with `tax_percent`.
    pub tax_name: Option<String>,
    /// Tax rate in percent; must be given together with `tax_name`.
    pub tax_percent: Option<Decimal>,
    /// Overrides the plan's default cycle count.
    pub cycle_count: Option<i32>,
    /// Deferred start.
    pub start: Option<DateTime<Utc>>,
}

impl NewSubscription {
    /// Subscription request with only the required ids.
    #[must_use]
    pub fn new(customer_id: impl Into<String>, plan_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            plan_id: plan_id.into(),
            tax_name: None,
            tax_percent: None,
            cycle_count: None,
            start: None,
        }
    }

    /// Sets the tax pair.
    #[must_use]
    pub fn tax(mut self, name: impl Into<String>, percent: Decimal) -> Self {
        self.tax_name = Some(name.into());
        self.tax_percent = Some(percent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_with_nested_plan_and_customer() {
        let subscription: Subscription = serde_json::from_str(
            r#"{
                "id": "sub_1",
                "status": "trialing",
                "debt": 0,
                "start": "2017-05-18T00:00:00Z",
                "end": null,
                "cycle_count": null,
                "current_period_start": "2017-05-18T00:00:00Z",
                "current_period_end": "2017-06-18T00:00:00Z",
                "customer": {
                    "id": "cus_1",
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "created_at": "2017-05-17T17:59:51Z",
                    "updated_at": "2017-05-17T17:59:51Z"
                },
                "plan": {
                    "id": "oro",
                    "name": "Plan Oro",
                    "price": 30000,
                    "currency": "CLP",
                    "interval": "month",
                    "status": "active",
                    "created_at": "2017-05-17T17:59:51Z",
                    "updated_at": "2017-05-17T17:59:51Z"
                },
                "transactions": [],
                "tax_name": "IVA",
                "tax_percent": "19.0",
                "created_at": "2017-05-18T00:00:00Z",
                "updated_at": "2017-05-18T00:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(subscription.status, SubscriptionStatus::Trialing);
        assert_eq!(subscription.customer.unwrap().id, "cus_1");
        assert_eq!(subscription.plan.unwrap().id, "oro");
        assert_eq!(subscription.tax_percent, Some(Decimal::from(19)));
        assert!(subscription.end.is_none());
    }

    #[test]
    fn test_unknown_status_roundtrips() {
        let status: SubscriptionStatus = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(status, SubscriptionStatus::Other("paused".to_owned()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""paused""#);
    }
}
