//! Async client for the QVO payments API.
//!
//! QVO is a Chilean payments platform: merchants register customers, store
//! cards through Webpay Oneclick inscriptions, bill them through plans and
//! subscriptions, take one-off Webpay Plus payments and withdraw their
//! balance. This crate wraps the REST API in typed, async methods on a single
//! [`Client`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Client::create_customer, list_plans, ...     │  resources: validate, build Params
//! └───────────────────────┬──────────────────────┘
//!                         │ method, endpoint, Params
//! ┌───────────────────────▼──────────────────────┐
//! │ Client::request                              │  URL, query or form body,
//! │                                              │  Bearer auth, error envelope
//! └───────────────────────┬──────────────────────┘
//!                         │ TransportRequest
//! ┌───────────────────────▼──────────────────────┐
//! │ Transport (HttpTransport over reqwest)       │  one exchange, no retries
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use qvo::{Client, Environment, ListOptions, query::Filter};
//!
//! # async fn example() -> qvo::Result<()> {
//! let client = Client::new("my-api-token", Environment::Sandbox)?;
//!
//! // Register a customer and start a card inscription
//! let customer = client.create_customer("Jane Doe", "jane@example.com").await?;
//! let inscription = client
//!     .create_card_inscription(&customer.id, "https://shop.example.com/cards/done")
//!     .await?;
//! println!("Send the customer to {}", inscription.redirect_url);
//!
//! // Find customers by email
//! let options = ListOptions::new()
//!     .filter(Filter::new().like("email", "%@example.com"))
//!     .order_by("created_at DESC");
//! for customer in client.list_customers(&options).await? {
//!     println!("{} <{}>", customer.name, customer.email);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`ClientConfig`] can be built in code, read from TOML or read from the
//! `QVO_*` environment variables:
//!
//! ```
//! use qvo::{ClientConfig, Environment};
//!
//! let config = ClientConfig::from_toml(
//!     r#"
//!     token = "my-api-token"
//!     environment = "production"
//!
//!     [http]
//!     timeout_secs = 30
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.environment, Environment::Production);
//! assert_eq!(config.http.timeout_secs, 30);
//! ```
//!
//! # Error Handling
//!
//! Every operation returns [`Result<T>`](error::Result). Local checks fail
//! before any request is made; API failures carry the envelope QVO sent:
//!
//! ```rust,no_run
//! use qvo::{Client, QvoError};
//!
//! # async fn example(client: Client) {
//! match client.create_withdrawal(10_000).await {
//!     Ok(withdrawal) => println!("Withdrawal {} is {:?}", withdrawal.id, withdrawal.status),
//!     Err(QvoError::RemoteApi { status, kind, message, .. }) => {
//!         eprintln!("QVO rejected the withdrawal ({status} {kind}): {message:?}");
//!     }
//!     Err(e) if e.is_validation() => eprintln!("Bad input: {e}"),
//!     Err(e) => eprintln!("Request failed: {e}"),
//! }
//! # }
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] spans and events and never installs a
//! subscriber. Tokens are never recorded.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod query;
pub mod resources;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::{ClientConfig, Environment};
pub use error::{QvoError, Result};
pub use params::Params;
pub use query::{Filter, ListOptions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
        assert_send_sync::<QvoError>();
        let _ = std::marker::PhantomData::<(ClientConfig, Params, ListOptions, Filter)>;
    }
}
