//! Transactions, payments and refunds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Card, Customer};

/// Currency of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Chilean peso.
    Clp,
    /// US dollar.
    Usd,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Payment gateway that processed a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gateway {
    /// Webpay Plus (redirect flow).
    WebpayPlus,
    /// Webpay Oneclick (stored card).
    WebpayOneclick,
    /// OLPays.
    Olpays,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Outcome of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Charged.
    Successful,
    /// Rejected by the issuer.
    Rejected,
    /// Could not be attempted.
    UnableToCharge,
    /// Refunded after being charged.
    Refunded,
    /// Waiting for the gateway.
    WaitingForResponse,
    /// The gateway never answered.
    ResponseTimeout,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Credit or debit, as reported on a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Credit.
    Credit,
    /// Debit.
    Debit,
    /// Unrecognised value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Raw gateway verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Gateway status code.
    #[serde(default)]
    pub status: Option<String>,
    /// Gateway message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Settlement details of a successful charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Charged amount in minor units.
    pub amount: i64,
    /// Gateway used.
    pub gateway: Gateway,
    /// Credit or debit.
    pub payment_type: PaymentType,
    /// Fee retained by QVO.
    #[serde(default)]
    pub fee: i64,
    /// Number of installments.
    #[serde(default)]
    pub installments: i32,
    /// Card charged, for stored-card payments.
    #[serde(default)]
    pub payment_method: Option<Card>,
}

/// A refund applied to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// Refunded amount in minor units.
    pub amount: i64,
    /// Refund time.
    pub created_at: DateTime<Utc>,
}

/// A charge attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction identifier.
    pub id: String,
    /// Amount in minor units.
    pub amount: i64,
    /// Currency.
    pub currency: Currency,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Gateway used.
    pub gateway: Gateway,
    /// Credits applied.
    #[serde(default)]
    pub credits: i64,
    /// Outcome.
    pub status: TransactionStatus,
    /// Charged customer.
    #[serde(default)]
    pub customer: Option<Box<Customer>>,
    /// Settlement details, once paid.
    #[serde(default)]
    pub payment: Option<Payment>,
    /// Refund details, once refunded.
    #[serde(default)]
    pub refund: Option<Refund>,
    /// Object the transaction pays for (a subscription, for instance).
    #[serde(default)]
    pub transable: Option<serde_json::Value>,
    /// Raw gateway verdict.
    #[serde(default)]
    pub gateway_response: Option<GatewayResponse>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refunded_transaction_decodes() {
        let transaction: Transaction = serde_json::from_str(
            r#"{
                "id": "trx_1",
                "amount": 30000,
                "currency": "CLP",
                "description": "Plan Oro",
                "gateway": "webpay_oneclick",
                "credits": 0,
                "status": "refunded",
                "payment": {
                    "amount": 30000,
                    "gateway": "webpay_oneclick",
                    "payment_type": "credit",
                    "fee": 900,
                    "installments": 1,
                    "payment_method": null
                },
                "refund": {"amount": 30000, "created_at": "2017-05-20T12:00:00Z"},
                "transable": {"id": "sub_1", "type": "Subscription"},
                "gateway_response": {"status": "success", "message": "aprobado"},
                "created_at": "2017-05-19T12:00:00Z",
                "updated_at": "2017-05-20T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(transaction.status, TransactionStatus::Refunded);
        assert_eq!(transaction.gateway, Gateway::WebpayOneclick);
        assert_eq!(transaction.payment.unwrap().fee, 900);
        assert_eq!(transaction.refund.unwrap().amount, 30000);
        assert_eq!(transaction.transable.unwrap()["type"], "Subscription");
        assert_eq!(transaction.gateway_response.unwrap().message.as_deref(), Some("aprobado"));
    }

    #[test]
    fn test_pending_transaction_has_no_payment() {
        let transaction: Transaction = serde_json::from_str(
            r#"{
                "id": "trx_2",
                "amount": 1000,
                "currency": "USD",
                "gateway": "webpay_plus",
                "status": "waiting_for_response",
                "payment": null,
                "refund": null,
                "created_at": "2017-05-19T12:00:00Z",
                "updated_at": "2017-05-19T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(transaction.currency, Currency::Usd);
        assert_eq!(transaction.status, TransactionStatus::WaitingForResponse);
        assert!(transaction.payment.is_none());
        assert!(transaction.refund.is_none());
        assert!(transaction.description.is_none());
    }
}
