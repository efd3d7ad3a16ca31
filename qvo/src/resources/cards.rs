//! Cards and card inscriptions, nested under `customers/{id}/cards`.
//!
//! Cards are added through an inscription: the merchant starts one, sends the
//! customer to the returned `redirect_url`, and later polls the inscription
//! until it reports `succeeded` or `failed`.

use tracing::{info, instrument};

use super::{require_absolute_url, require_positive, validate_id};
use crate::{
    client::Client,
    error::Result,
    models::{Card, CardInscription, CardInscriptionRequest, Transaction},
    params::Params,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Starts a card inscription for a customer.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`](crate::QvoError::Validation) if
    /// `return_url` is not an absolute URL, or any executor error.
    #[instrument(skip(self, return_url))]
    pub async fn create_card_inscription(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<CardInscriptionRequest> {
        let id = validate_id("customer_id", customer_id)?;
        let mut params = Params::new();
        params.push("return_url", require_absolute_url("return_url", return_url)?);

        info!("creating card inscription");
        self.fetch(HttpMethod::Post, &format!("customers/{id}/cards/inscriptions"), &params).await
    }

    /// Retrieves a card inscription.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid ids, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_card_inscription(
        &self,
        customer_id: &str,
        inscription_uid: &str,
    ) -> Result<CardInscription> {
        let id = validate_id("customer_id", customer_id)?;
        let uid = validate_id("inscription_uid", inscription_uid)?;
        let endpoint = format!("customers/{id}/cards/inscriptions/{uid}");
        info!("fetching card inscription");
        self.fetch(HttpMethod::Get, &endpoint, &Params::new()).await
    }

    /// Retrieves one card of a customer.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid ids, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_card(&self, customer_id: &str, card_id: &str) -> Result<Card> {
        let id = validate_id("customer_id", customer_id)?;
        let card = validate_id("card_id", card_id)?;
        info!("fetching card");
        self.fetch(HttpMethod::Get, &format!("customers/{id}/cards/{card}"), &Params::new()).await
    }

    /// Lists the cards of a customer.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn list_cards(&self, customer_id: &str) -> Result<Vec<Card>> {
        let id = validate_id("customer_id", customer_id)?;
        info!("listing cards");
        self.fetch(HttpMethod::Get, &format!("customers/{id}/cards"), &Params::new()).await
    }

    /// Removes a card from a customer.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid ids, or any executor error.
    #[instrument(skip(self))]
    pub async fn delete_card(&self, customer_id: &str, card_id: &str) -> Result<()> {
        let id = validate_id("customer_id", customer_id)?;
        let card = validate_id("card_id", card_id)?;

        info!("deleting card");
        self.execute(HttpMethod::Delete, &format!("customers/{id}/cards/{card}"), &Params::new())
            .await
    }

    /// Charges a stored card.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `amount` is not positive, or any executor
    /// error. A declined charge is not an error: inspect the returned
    /// transaction's status.
    #[instrument(skip(self, description))]
    pub async fn charge_card(
        &self,
        customer_id: &str,
        card_id: &str,
        amount: i64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        let id = validate_id("customer_id", customer_id)?;
        let card = validate_id("card_id", card_id)?;

        let mut params = Params::new();
        params
            .push("amount", require_positive("amount", amount)?)
            .push_opt("description", description.filter(|d| !d.is_empty()));

        info!("charging card");
        self.fetch(HttpMethod::Post, &format!("customers/{id}/cards/{card}/charge"), &params).await
    }
}
