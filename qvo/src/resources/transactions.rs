//! Transactions: `transactions` and `transactions/{id}`.

use tracing::{info, instrument};

use super::{require_positive, validate_id};
use crate::{
    client::Client,
    error::Result,
    models::Transaction,
    params::Params,
    query::ListOptions,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Retrieves a transaction.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid id, or any executor error.
    #[instrument(skip(self))]
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let id = validate_id("transaction_id", transaction_id)?;
        info!("fetching transaction");
        self.fetch(HttpMethod::Get, &format!("transactions/{id}"), &Params::new()).await
    }

    /// Lists transactions.
    ///
    /// # Errors
    ///
    /// Returns any executor error.
    #[instrument(skip(self, options))]
    pub async fn list_transactions(&self, options: &ListOptions) -> Result<Vec<Transaction>> {
        info!("listing transactions");
        self.fetch(HttpMethod::Get, "transactions", &options.to_params()?).await
    }

    /// Refunds a transaction, fully when `amount` is `None`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a given `amount` is not positive, or any
    /// executor error.
    #[instrument(skip(self))]
    pub async fn refund_transaction(
        &self,
        transaction_id: &str,
        amount: Option<i64>,
    ) -> Result<Transaction> {
        let id = validate_id("transaction_id", transaction_id)?;
        let mut params = Params::new();
        params.push_opt("amount", amount.map(|a| require_positive("amount", a)).transpose()?);

        info!("refunding transaction");
        self.fetch(HttpMethod::Post, &format!("transactions/{id}/refund"), &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::TransactionStatus,
        testing::{TRANSACTION_JSON, list_of, stub_client},
    };

    #[tokio::test]
    async fn test_full_refund_sends_empty_body() {
        let (client, transport) = stub_client();
        transport.respond(201, &TRANSACTION_JSON.replace("successful", "refunded"));

        let refunded = client.refund_transaction("trx_1", None).await.unwrap();
        assert_eq!(refunded.status, TransactionStatus::Refunded);

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://playground.qvo.cl/transactions/trx_1/refund");
        assert_eq!(request.body.as_deref(), Some(&b""[..]));
        assert_eq!(request.header("Content-Length"), Some("0"));
    }

    #[tokio::test]
    async fn test_partial_refund() {
        let (client, transport) = stub_client();
        transport.respond(201, TRANSACTION_JSON);

        client.refund_transaction("trx_1", Some(1500)).await.unwrap();
        assert_eq!(transport.last_request().body.as_deref(), Some(&b"amount=1500"[..]));
    }

    #[tokio::test]
    async fn test_refund_rejects_non_positive_amount() {
        let (client, transport) = stub_client();
        assert!(client.refund_transaction("trx_1", Some(0)).await.unwrap_err().is_validation());
        assert!(client.refund_transaction("", None).await.unwrap_err().is_validation());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_and_list_transactions() {
        let (client, transport) = stub_client();
        transport.respond(200, TRANSACTION_JSON);
        transport.respond(200, &list_of(TRANSACTION_JSON));

        let transaction = client.get_transaction("trx_1").await.unwrap();
        assert_eq!(transaction.amount, 30000);
        assert_eq!(transport.last_request().url, "https://playground.qvo.cl/transactions/trx_1");

        let options = ListOptions::new().order_by("created_at DESC");
        assert_eq!(client.list_transactions(&options).await.unwrap().len(), 1);
        assert_eq!(
            transport.last_request().url,
            "https://playground.qvo.cl/transactions?order_by=created_at+DESC"
        );
    }
}
