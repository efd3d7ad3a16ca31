//! Withdrawals: `withdrawals` and `withdrawals/{id}`.

use tracing::{info, instrument};

use super::{require_positive, validate_id};
use crate::{
    client::Client,
    error::Result,
    models::Withdrawal,
    params::Params,
    query::ListOptions,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Withdraws part of the merchant balance.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `amount` is not positive, or any executor
    /// error.
    #[instrument(skip(self))]
    pub async fn create_withdrawal(&self, amount: i64) -> Result<Withdrawal> {
        let mut params = Params::new();
        params.push("amount", require_positive("amount", amount)?);

        info!("creating withdrawal");
        self.fetch(HttpMethod::Post, "withdrawals", &params).await
    }

    /// Retrieves a withdrawal.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_withdrawal(&self, withdrawal_id: &str) -> Result<Withdrawal> {
        let id = validate_id("withdrawal_id", withdrawal_id)?;
        info!("fetching withdrawal");
        self.fetch(HttpMethod::Get, &format!("withdrawals/{id}"), &Params::new()).await
    }

    /// Lists withdrawals.
    ///
    /// # Errors
    ///
    /// Returns any executor error.
    #[instrument(skip(self, options))]
    pub async fn list_withdrawals(&self, options: &ListOptions) -> Result<Vec<Withdrawal>> {
        info!("listing withdrawals");
        self.fetch(HttpMethod::Get, "withdrawals", &options.to_params()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::QvoError,
        models::WithdrawalStatus,
        testing::{WITHDRAWAL_JSON, list_of, stub_client},
    };

    #[tokio::test]
    async fn test_create_withdrawal() {
        let (client, transport) = stub_client();
        transport.respond(201, WITHDRAWAL_JSON);

        let withdrawal = client.create_withdrawal(50000).await.unwrap();
        assert_eq!(withdrawal.status, WithdrawalStatus::Processing);

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://playground.qvo.cl/withdrawals");
        assert_eq!(request.body.as_deref(), Some(&b"amount=50000"[..]));
        assert_eq!(request.header("Content-Length"), Some("12"));
    }

    #[tokio::test]
    async fn test_zero_withdrawal_makes_no_call() {
        let (client, transport) = stub_client();

        let err = client.create_withdrawal(0).await.unwrap_err();
        assert!(matches!(err, QvoError::Validation(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_withdrawal_sends_no_params() {
        let (client, transport) = stub_client();
        transport.respond(200, WITHDRAWAL_JSON);

        client.get_withdrawal("wdr_1").await.unwrap();
        assert_eq!(transport.last_request().url, "https://playground.qvo.cl/withdrawals/wdr_1");
    }

    #[tokio::test]
    async fn test_list_withdrawals() {
        let (client, transport) = stub_client();
        transport.respond(200, &list_of(WITHDRAWAL_JSON));

        let withdrawals = client.list_withdrawals(&ListOptions::new()).await.unwrap();
        assert_eq!(withdrawals[0].amount, 50000);
    }
}
