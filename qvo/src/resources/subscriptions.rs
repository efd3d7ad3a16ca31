//! Subscriptions: `subscriptions` and `subscriptions/{id}`.

use chrono::SecondsFormat;
use tracing::{info, instrument};

use super::validate_id;
use crate::{
    client::Client,
    error::{QvoError, Result},
    models::{NewSubscription, Subscription},
    params::Params,
    query::ListOptions,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Subscribes a customer to a plan.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] if an id is blank or only one half of
    /// the tax pair is set, or any executor error.
    #[instrument(
        skip(self, subscription),
        fields(customer_id = %subscription.customer_id, plan_id = %subscription.plan_id)
    )]
    pub async fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription> {
        let mut params = Params::new();
        params
            .push("customer_id", validate_id("customer_id", &subscription.customer_id)?)
            .push("plan_id", validate_id("plan_id", &subscription.plan_id)?);

        match (subscription.tax_name.as_deref(), subscription.tax_percent) {
            (Some(name), Some(percent)) if !name.trim().is_empty() => {
                params.push("tax_name", name).push("tax_percent", percent);
            }
            (None, None) => {}
            _ => {
                return Err(QvoError::Validation(
                    "tax_name and tax_percent must be given together".to_owned(),
                ));
            }
        }

        params.push_opt("cycle_count", subscription.cycle_count).push_opt(
            "start",
            subscription.start.map(|start| start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );

        info!("creating subscription");
        self.fetch(HttpMethod::Post, "subscriptions", &params).await
    }

    /// Retrieves a subscription.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        let id = validate_id("subscription_id", subscription_id)?;
        info!("fetching subscription");
        self.fetch(HttpMethod::Get, &format!("subscriptions/{id}"), &Params::new()).await
    }

    /// Moves a subscription to another plan.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid ids, or any executor error.
    #[instrument(skip(self))]
    pub async fn update_subscription(
        &self,
        subscription_id: &str,
        plan_id: &str,
    ) -> Result<Subscription> {
        let id = validate_id("subscription_id", subscription_id)?;
        let mut params = Params::new();
        params.push("plan_id", validate_id("plan_id", plan_id)?);

        info!("updating subscription");
        self.fetch(HttpMethod::Put, &format!("subscriptions/{id}"), &params).await
    }

    /// Cancels a subscription, either now or at the end of the current period.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn cancel_subscription(
        &self,
        subscription_id: &str,
        cancel_at_period_end: bool,
    ) -> Result<Subscription> {
        let id = validate_id("subscription_id", subscription_id)?;
        let mut params = Params::new();
        params.push("cancel_at_period_end", cancel_at_period_end);

        info!("canceling subscription");
        self.fetch(HttpMethod::Delete, &format!("subscriptions/{id}"), &params).await
    }

    /// Lists subscriptions.
    ///
    /// # Errors
    ///
    /// Returns any executor error.
    #[instrument(skip(self, options))]
    pub async fn list_subscriptions(&self, options: &ListOptions) -> Result<Vec<Subscription>> {
        info!("listing subscriptions");
        self.fetch(HttpMethod::Get, "subscriptions", &options.to_params()?).await
    }
}
