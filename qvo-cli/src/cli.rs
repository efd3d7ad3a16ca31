//! Command line definition and dispatch.

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use qvo::{
    Client, ClientConfig, Environment, Filter, ListOptions,
    models::{CustomerUpdate, Interval, NewPlan, NewSubscription, PlanCurrency, WebpayRequest},
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

/// Explore the QVO payments API from the command line.
///
/// Credentials come from `--config` or from the `QVO_TOKEN`,
/// `QVO_ENVIRONMENT`, `QVO_BASE_URL` and `QVO_TIMEOUT_SECS` variables.
/// Results are printed to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "qvo", version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "QVO_CONFIG")]
    config: Option<PathBuf>,

    /// Use the production environment regardless of the configuration.
    #[arg(long, global = true)]
    production: bool,

    /// Override the API base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage customers.
    #[command(subcommand)]
    Customers(CustomerAction),
    /// Manage cards and card inscriptions.
    #[command(subcommand)]
    Cards(CardAction),
    /// Manage plans.
    #[command(subcommand)]
    Plans(PlanAction),
    /// Manage subscriptions.
    #[command(subcommand)]
    Subscriptions(SubscriptionAction),
    /// Inspect and refund transactions.
    #[command(subcommand)]
    Transactions(TransactionAction),
    /// Manage withdrawals.
    #[command(subcommand)]
    Withdrawals(WithdrawalAction),
    /// Webpay Plus charges.
    #[command(subcommand)]
    Webpay(WebpayAction),
    /// Inspect account events.
    #[command(subcommand)]
    Events(EventAction),
}

/// A `field:operator:value` condition for `--where`.
#[derive(Debug, Clone, PartialEq)]
struct WhereArg {
    field: String,
    operator: String,
    value: Value,
}

/// Parses `field:operator:value`; the value is JSON when it parses as JSON.
fn parse_where(s: &str) -> Result<WhereArg, String> {
    let mut parts = s.splitn(3, ':');
    let (Some(field), Some(operator), Some(raw)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected field:operator:value, got {s:?}"));
    };
    if field.is_empty() || operator.is_empty() {
        return Err(format!("field and operator must not be empty in {s:?}"));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    Ok(WhereArg { field: field.to_owned(), operator: operator.to_owned(), value })
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Page number, starting at 1.
    #[arg(long)]
    page: Option<u32>,

    /// Items per page.
    #[arg(long)]
    per_page: Option<u32>,

    /// Order clause, e.g. "created_at DESC".
    #[arg(long)]
    order_by: Option<String>,

    /// Filter condition as field:operator:value (repeatable).
    #[arg(long = "where", value_name = "FIELD:OP:VALUE", value_parser = parse_where)]
    conditions: Vec<WhereArg>,
}

impl ListArgs {
    fn to_options(&self) -> ListOptions {
        let mut filter = Filter::new();
        for condition in &self.conditions {
            filter.insert(&condition.field, &condition.operator, condition.value.clone());
        }
        ListOptions {
            page: self.page,
            per_page: self.per_page,
            filter,
            order_by: self.order_by.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum CustomerAction {
    /// List customers.
    List(ListArgs),
    /// Show one customer.
    Get { id: String },
    /// Create a customer.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Update a customer.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Card to charge by default.
        #[arg(long)]
        default_payment_method: Option<String>,
    },
    /// Delete a customer.
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum CardAction {
    /// List a customer's cards.
    List { customer: String },
    /// Show one card.
    Get { customer: String, card: String },
    /// Remove a card.
    Delete { customer: String, card: String },
    /// Start a card inscription.
    Inscribe {
        customer: String,
        #[arg(long)]
        return_url: String,
    },
    /// Show a card inscription.
    Inscription { customer: String, uid: String },
    /// Charge a stored card.
    Charge {
        customer: String,
        card: String,
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum PlanAction {
    /// List plans.
    List(ListArgs),
    /// Show one plan.
    Get { id: String },
    /// Create a plan.
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        /// CLP or UF.
        #[arg(long, default_value = "CLP")]
        currency: PlanCurrency,
        /// day, week, month or year.
        #[arg(long)]
        interval: Option<Interval>,
        #[arg(long)]
        interval_count: Option<i32>,
        #[arg(long)]
        trial_period_days: Option<i32>,
        #[arg(long)]
        default_cycle_count: Option<i32>,
    },
    /// Rename a plan.
    Update {
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a plan.
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum SubscriptionAction {
    /// List subscriptions.
    List(ListArgs),
    /// Show one subscription.
    Get { id: String },
    /// Subscribe a customer to a plan.
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        plan: String,
        #[arg(long, requires = "tax_percent")]
        tax_name: Option<String>,
        #[arg(long, requires = "tax_name")]
        tax_percent: Option<Decimal>,
        #[arg(long)]
        cycle_count: Option<i32>,
        /// RFC 3339 start time.
        #[arg(long)]
        start: Option<DateTime<Utc>>,
    },
    /// Move a subscription to another plan.
    Update {
        id: String,
        #[arg(long)]
        plan: String,
    },
    /// Cancel a subscription.
    Cancel {
        id: String,
        /// Keep it running until the current period ends.
        #[arg(long)]
        at_period_end: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TransactionAction {
    /// List transactions.
    List(ListArgs),
    /// Show one transaction.
    Get { id: String },
    /// Refund a transaction, fully unless --amount is given.
    Refund {
        id: String,
        #[arg(long)]
        amount: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
enum WithdrawalAction {
    /// List withdrawals.
    List(ListArgs),
    /// Show one withdrawal.
    Get { id: String },
    /// Withdraw part of the balance.
    Create {
        #[arg(long)]
        amount: i64,
    },
}

#[derive(Subcommand, Debug)]
enum WebpayAction {
    /// Start a Webpay Plus charge.
    Charge {
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        return_url: String,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum EventAction {
    /// List events.
    List(ListArgs),
    /// Show one event.
    Get { id: String },
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl Cli {
    /// Resolves the client configuration from the file or the environment,
    /// then applies the command line overrides.
    fn load_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => ClientConfig::from_env().context("failed to read QVO_* variables")?,
        };

        if self.production {
            config.environment = Environment::Production;
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        Ok(config)
    }

    /// Runs the selected command.
    ///
    /// # Errors
    ///
    /// Returns any configuration or API error.
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        debug!(?config, "configuration loaded");
        let client = Client::from_config(config)?;

        match self.command {
            Command::Customers(action) => customers(&client, action).await,
            Command::Cards(action) => cards(&client, action).await,
            Command::Plans(action) => plans(&client, action).await,
            Command::Subscriptions(action) => subscriptions(&client, action).await,
            Command::Transactions(action) => transactions(&client, action).await,
            Command::Withdrawals(action) => withdrawals(&client, action).await,
            Command::Webpay(action) => webpay(&client, action).await,
            Command::Events(action) => events(&client, action).await,
        }
    }
}

async fn customers(client: &Client, action: CustomerAction) -> anyhow::Result<()> {
    match action {
        CustomerAction::List(args) => print(&client.list_customers(&args.to_options()).await?),
        CustomerAction::Get { id } => print(&client.get_customer(&id).await?),
        CustomerAction::Create { name, email } => {
            print(&client.create_customer(&name, &email).await?)
        }
        CustomerAction::Update { id, name, email, default_payment_method } => {
            let update =
                CustomerUpdate { name, email, default_payment_method_id: default_payment_method };
            if update.is_empty() {
                bail!("nothing to update: pass --name, --email or --default-payment-method");
            }
            print(&client.update_customer(&id, &update).await?)
        }
        CustomerAction::Delete { id } => {
            client.delete_customer(&id).await?;
            print(&json!({ "deleted": id }))
        }
    }
}

async fn cards(client: &Client, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::List { customer } => print(&client.list_cards(&customer).await?),
        CardAction::Get { customer, card } => print(&client.get_card(&customer, &card).await?),
        CardAction::Delete { customer, card } => {
            client.delete_card(&customer, &card).await?;
            print(&json!({ "deleted": card }))
        }
        CardAction::Inscribe { customer, return_url } => {
            print(&client.create_card_inscription(&customer, &return_url).await?)
        }
        CardAction::Inscription { customer, uid } => {
            print(&client.get_card_inscription(&customer, &uid).await?)
        }
        CardAction::Charge { customer, card, amount, description } => print(
            &client.charge_card(&customer, &card, amount, description.as_deref()).await?,
        ),
    }
}

async fn plans(client: &Client, action: PlanAction) -> anyhow::Result<()> {
    match action {
        PlanAction::List(args) => print(&client.list_plans(&args.to_options()).await?),
        PlanAction::Get { id } => print(&client.get_plan(&id).await?),
        PlanAction::Create {
            id,
            name,
            price,
            currency,
            interval,
            interval_count,
            trial_period_days,
            default_cycle_count,
        } => {
            let plan = NewPlan {
                id,
                name,
                price,
                currency,
                interval,
                interval_count,
                trial_period_days,
                default_cycle_count,
            };
            print(&client.create_plan(&plan).await?)
        }
        PlanAction::Update { id, name } => print(&client.update_plan(&id, &name).await?),
        PlanAction::Delete { id } => {
            client.delete_plan(&id).await?;
            print(&json!({ "deleted": id }))
        }
    }
}

async fn subscriptions(client: &Client, action: SubscriptionAction) -> anyhow::Result<()> {
    match action {
        SubscriptionAction::List(args) => {
            print(&client.list_subscriptions(&args.to_options()).await?)
        }
        SubscriptionAction::Get { id } => print(&client.get_subscription(&id).await?),
        SubscriptionAction::Create { customer, plan, tax_name, tax_percent, cycle_count, start } => {
            let subscription = NewSubscription {
                customer_id: customer,
                plan_id: plan,
                tax_name,
                tax_percent,
                cycle_count,
                start,
            };
            print(&client.create_subscription(&subscription).await?)
        }
        SubscriptionAction::Update { id, plan } => {
            print(&client.update_subscription(&id, &plan).await?)
        }
        SubscriptionAction::Cancel { id, at_period_end } => {
            print(&client.cancel_subscription(&id, at_period_end).await?)
        }
    }
}

async fn transactions(client: &Client, action: TransactionAction) -> anyhow::Result<()> {
    match action {
        TransactionAction::List(args) => {
            print(&client.list_transactions(&args.to_options()).await?)
        }
        TransactionAction::Get { id } => print(&client.get_transaction(&id).await?),
        TransactionAction::Refund { id, amount } => {
            print(&client.refund_transaction(&id, amount).await?)
        }
    }
}

async fn withdrawals(client: &Client, action: WithdrawalAction) -> anyhow::Result<()> {
    match action {
        WithdrawalAction::List(args) => print(&client.list_withdrawals(&args.to_options()).await?),
        WithdrawalAction::Get { id } => print(&client.get_withdrawal(&id).await?),
        WithdrawalAction::Create { amount } => print(&client.create_withdrawal(amount).await?),
    }
}

async fn webpay(client: &Client, action: WebpayAction) -> anyhow::Result<()> {
    match action {
        WebpayAction::Charge { amount, return_url, customer, description } => {
            let request = WebpayRequest { amount, return_url, customer_id: customer, description };
            print(&client.webpay_charge(&request).await?)
        }
    }
}

async fn events(client: &Client, action: EventAction) -> anyhow::Result<()> {
    match action {
        EventAction::List(args) => print(&client.list_events(&args.to_options()).await?),
        EventAction::Get { id } => print(&client.get_event(&id).await?),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_where_values() {
        let arg = parse_where("name:=:Jane").unwrap();
        assert_eq!(arg.field, "name");
        assert_eq!(arg.operator, "=");
        assert_eq!(arg.value, json!("Jane"));

        assert_eq!(parse_where("debt:>:0").unwrap().value, json!(0));
        assert_eq!(parse_where("active:=:true").unwrap().value, json!(true));
        assert_eq!(parse_where("url:=:https://a.cl").unwrap().value, json!("https://a.cl"));
        assert_eq!(parse_where("email:like:%test%").unwrap().value, json!("%test%"));
    }

    #[test]
    fn test_parse_where_rejects_malformed() {
        assert!(parse_where("name").is_err());
        assert!(parse_where("name:=").is_err());
        assert!(parse_where(":=:Jane").is_err());
        assert!(parse_where("name::Jane").is_err());
    }

    #[test]
    fn test_list_args_to_options() {
        let cli = Cli::try_parse_from([
            "qvo",
            "customers",
            "list",
            "--page",
            "2",
            "--per-page",
            "10",
            "--where",
            "name:=:Jane",
            "--where",
            "email:like:%@manglar.cl",
            "--order-by",
            "created_at ASC",
        ])
        .unwrap();

        let Command::Customers(CustomerAction::List(args)) = cli.command else {
            panic!("expected customers list");
        };
        let options = args.to_options();
        assert_eq!(options.page, Some(2));
        assert_eq!(options.per_page, Some(10));
        assert_eq!(options.order_by.as_deref(), Some("created_at ASC"));
        assert_eq!(
            options.filter.to_json().unwrap(),
            r#"{"email":{"like":"%@manglar.cl"},"name":{"=":"Jane"}}"#
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "qvo",
            "events",
            "get",
            "evt_1",
            "--production",
            "--base-url",
            "http://localhost:8080",
        ])
        .unwrap();
        assert!(cli.production);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_subscription_tax_flags_come_in_pairs() {
        let result = Cli::try_parse_from([
            "qvo",
            "subscriptions",
            "create",
            "--customer",
            "cus_1",
            "--plan",
            "oro",
            "--tax-name",
            "IVA",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_create_parses_price_and_currency() {
        let cli = Cli::try_parse_from([
            "qvo", "plans", "create", "--id", "uf", "--name", "Plan UF", "--price", "1.5",
            "--currency", "uf", "--interval", "year",
        ])
        .unwrap();

        let Command::Plans(PlanAction::Create { price, currency, interval, .. }) = cli.command
        else {
            panic!("expected plans create");
        };
        assert_eq!(price.to_string(), "1.5");
        assert_eq!(currency, PlanCurrency::Uf);
        assert_eq!(interval, Some(Interval::Year));
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = std::env::temp_dir().join(format!("qvo-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("qvo.toml");
        std::fs::write(&path, "token = \"file-token\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "qvo",
            "--config",
            path.to_str().unwrap(),
            "--production",
            "--base-url",
            "http://127.0.0.1:4010",
            "plans",
            "list",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.token, "file-token");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:4010"));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
