//! Data returned by the QVO API.
//!
//! Status fields are open enumerations: values this client does not know
//! decode into an `Other(String)` variant holding the raw string, and
//! serialize back unchanged. Amounts are integers in minor units; plan
//! prices and tax rates are decimals.

mod card;
mod customer;
mod event;
mod plan;
mod subscription;
mod transaction;
mod webpay;
mod withdrawal;

pub use card::{
    Card, CardInscription, CardInscriptionRequest, CardPaymentType, CardType, InscriptionStatus,
};
pub use customer::{Customer, CustomerUpdate};
pub use event::Event;
pub use plan::{Interval, NewPlan, Plan, PlanCurrency, PlanStatus};
pub use subscription::{NewSubscription, Subscription, SubscriptionStatus};
pub use transaction::{
    Currency, Gateway, GatewayResponse, Payment, PaymentType, Refund, Transaction,
    TransactionStatus,
};
pub use webpay::{WebpayRequest, WebpayResponse};
pub use withdrawal::{Withdrawal, WithdrawalStatus};
