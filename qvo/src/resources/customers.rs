//! Customers: `customers` and `customers/{id}`.

use tracing::{info, instrument};

use super::{require, validate_id};
use crate::{
    client::Client,
    error::{QvoError, Result},
    models::{Customer, CustomerUpdate},
    params::Params,
    query::ListOptions,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] if `name` or `email` is blank, or any
    /// executor error.
    #[instrument(skip(self, name, email))]
    pub async fn create_customer(&self, name: &str, email: &str) -> Result<Customer> {
        let mut params = Params::new();
        params.push("name", require("name", name)?).push("email", require("email", email)?);

        info!("creating customer");
        self.fetch(HttpMethod::Post, "customers", &params).await
    }

    /// Retrieves a customer.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer> {
        let id = validate_id("customer_id", customer_id)?;
        info!("fetching customer");
        self.fetch(HttpMethod::Get, &format!("customers/{id}"), &Params::new()).await
    }

    /// Updates the given fields of a customer.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] if no field is set, or any executor error.
    #[instrument(skip(self, update))]
    pub async fn update_customer(
        &self,
        customer_id: &str,
        update: &CustomerUpdate,
    ) -> Result<Customer> {
        let id = validate_id("customer_id", customer_id)?;
        if update.is_empty() {
            return Err(QvoError::Validation("customer update has no fields set".to_owned()));
        }

        let mut params = Params::new();
        params
            .push_opt("name", update.name.as_deref())
            .push_opt("email", update.email.as_deref())
            .push_opt("default_payment_method_id", update.default_payment_method_id.as_deref());

        info!(fields = params.len(), "updating customer");
        self.fetch(HttpMethod::Put, &format!("customers/{id}"), &params).await
    }

    /// Deletes a customer.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: &str) -> Result<()> {
        let id = validate_id("customer_id", customer_id)?;
        info!("deleting customer");
        self.execute(HttpMethod::Delete, &format!("customers/{id}"), &Params::new()).await
    }

    /// Lists customers.
    ///
    /// # Errors
    ///
    /// Returns any executor error.
    #[instrument(skip(self, options))]
    pub async fn list_customers(&self, options: &ListOptions) -> Result<Vec<Customer>> {
        info!("listing customers");
        self.fetch(HttpMethod::Get, "customers", &options.to_params()?).await
    }
}
