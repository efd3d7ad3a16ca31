//! Subscribes a new customer to a plan in the QVO sandbox.
//!
//! Creates a customer, starts a card inscription for them, subscribes them to
//! an existing plan and lists the most recent events.
//!
//! # Running this example
//!
//! ```bash
//! export QVO_TOKEN=<sandbox token>
//! cargo run --example subscription_flow -- <plan id>
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use std::env;

use qvo::{
    Client, ClientConfig, ListOptions, QvoError, config::ENV_TOKEN, models::NewSubscription,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let plan_id = env::args().nth(1).ok_or("usage: subscription_flow <plan id>")?;
    let config = ClientConfig::from_env()
        .map_err(|e| format!("{e}\nSet {ENV_TOKEN} to your sandbox token"))?;
    let client = Client::from_config(config)?;

    let customer = client.create_customer("Jane Doe", "jane.doe@example.com").await?;
    println!("Created customer {}", customer.id);

    let inscription = client
        .create_card_inscription(&customer.id, "https://shop.example.com/cards/done")
        .await?;
    println!("Card inscription: send the customer to {}", inscription.redirect_url);

    match client.create_subscription(&NewSubscription::new(&customer.id, &plan_id)).await {
        Ok(subscription) => {
            println!("Subscription {} is {:?}", subscription.id, subscription.status);
        }
        Err(QvoError::RemoteApi { status, kind, message, param }) => {
            eprintln!("QVO refused the subscription ({status} {kind}): {message:?} on {param:?}");
        }
        Err(e) => return Err(e.into()),
    }

    let events = client.list_events(&ListOptions::new().page(1, 5).order_by("created_at DESC")).await?;
    for event in events {
        println!("{}  {}", event.created_at, event.kind);
    }

    Ok(())
}
