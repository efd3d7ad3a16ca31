//! Webpay Plus redirect charges.

use tracing::{info, instrument};

use super::{require_absolute_url, require_positive, validate_id};
use crate::{
    client::Client,
    error::Result,
    models::{WebpayRequest, WebpayResponse},
    params::Params,
    transport::{HttpMethod, Transport},
};

impl<T: Transport> Client<T> {
    /// Starts a Webpay Plus charge.
    ///
    /// Send the customer to the returned `redirect_url`; Webpay returns them
    /// to `return_url` when done.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `amount` is not positive or `return_url`
    /// is not absolute, or any executor error.
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn webpay_charge(&self, request: &WebpayRequest) -> Result<WebpayResponse> {
        let mut params = Params::new();
        params
            .push("amount", require_positive("amount", request.amount)?)
            .push("return_url", require_absolute_url("return_url", &request.return_url)?);
        if let Some(customer_id) = request.customer_id.as_deref() {
            params.push("customer_id", validate_id("customer_id", customer_id)?);
        }
        params.push_opt("description", request.description.as_deref().filter(|d| !d.is_empty()));

        info!("starting webpay plus charge");
        self.fetch(HttpMethod::Post, "webpay_plus/charge", &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stub_client;

    const RESPONSE_JSON: &str = r#"{
        "transaction_id": "trx_2",
        "redirect_url": "https://playground.qvo.cl/webpay/trx_2",
        "expiration_date": "2017-05-23T19:48:10Z"
    }"#;

    #[tokio::test]
    async fn test_webpay_charge() {
        let (client, transport) = stub_client();
        transport.respond(201, RESPONSE_JSON);

        let mut request = WebpayRequest::new(2000, "https://shop.example.com/return");
        request.customer_id = Some("cus_1".to_owned());
        request.description = Some("Order 42".to_owned());

        let response = client.webpay_charge(&request).await.unwrap();
        assert_eq!(response.transaction_id, "trx_2");

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "https://playground.qvo.cl/webpay_plus/charge");
        assert_eq!(
            transport.last_form(),
            [
                ("amount".to_owned(), "2000".to_owned()),
                ("return_url".to_owned(), "https://shop.example.com/return".to_owned()),
                ("customer_id".to_owned(), "cus_1".to_owned()),
                ("description".to_owned(), "Order 42".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_webpay_charge_validation() {
        let (client, transport) = stub_client();

        let zero = WebpayRequest::new(0, "https://shop.example.com/return");
        assert!(client.webpay_charge(&zero).await.unwrap_err().is_validation());

        let relative = WebpayRequest::new(1000, "return");
        assert!(client.webpay_charge(&relative).await.unwrap_err().is_validation());

        assert_eq!(transport.calls(), 0);
    }
}
