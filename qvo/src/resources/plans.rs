//! Plans: `plans` and `plans/{id}`.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::{require, validate_id};
use crate::{
    client::Client,
    error::{QvoError, Result},
    models::{Interval, NewPlan, Plan},
    params::Params,
    query::ListOptions,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Creates a plan.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] if `id`, `name` or `currency` is
    /// blank or `price` is negative, or any executor error.
    #[instrument(skip(self, plan), fields(plan_id = %plan.id))]
    pub async fn create_plan(&self, plan: &NewPlan) -> Result<Plan> {
        if plan.price < Decimal::ZERO {
            return Err(QvoError::Validation(format!(
                "price must not be negative, got {}",
                plan.price
            )));
        }

        let mut params = Params::new();
        params
            .push("id", validate_id("id", &plan.id)?)
            .push("name", require("name", &plan.name)?)
            .push("price", plan.price)
            .push("currency", require("currency", plan.currency.as_str())?)
            .push_opt("interval", plan.interval.as_ref().map(Interval::as_str))
            .push_opt("interval_count", plan.interval_count)
            .push_opt("trial_period_days", plan.trial_period_days)
            .push_opt("default_cycle_count", plan.default_cycle_count);

        info!("creating plan");
        self.fetch(HttpMethod::Post, "plans", &params).await
    }

    /// Retrieves a plan.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_plan(&self, plan_id: &str) -> Result<Plan> {
        let id = validate_id("plan_id", plan_id)?;
        info!("fetching plan");
        self.fetch(HttpMethod::Get, &format!("plans/{id}"), &Params::new()).await
    }

    /// Renames a plan. Prices cannot change once a plan exists.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `name` is blank, or any executor error.
    #[instrument(skip(self, name))]
    pub async fn update_plan(&self, plan_id: &str, name: &str) -> Result<Plan> {
        let id = validate_id("plan_id", plan_id)?;
        let mut params = Params::new();
        params.push("name", require("name", name)?);

        info!("updating plan");
        self.fetch(HttpMethod::Put, &format!("plans/{id}"), &params).await
    }

    /// Deletes a plan.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn delete_plan(&self, plan_id: &str) -> Result<()> {
        let id = validate_id("plan_id", plan_id)?;
        info!("deleting plan");
        self.execute(HttpMethod::Delete, &format!("plans/{id}"), &Params::new()).await
    }

    /// Lists plans.
    ///
    /// # Errors
    ///
    /// Returns any executor error.
    #[instrument(skip(self, options))]
    pub async fn list_plans(&self, options: &ListOptions) -> Result<Vec<Plan>> {
        info!("listing plans");
        self.fetch(HttpMethod::Get, "plans", &options.to_params()?).await
    }
}
