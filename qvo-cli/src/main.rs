//! `qvo`: command line client for the QVO payments API.
//!
//! Meant for poking the sandbox by hand: every subcommand maps to one client
//! call and prints the decoded result as pretty JSON on stdout. Logs go to
//! stderr (`RUST_LOG`, `LOG_FORMAT=json|pretty`).
//!
//! ```text
//! export QVO_TOKEN=...
//! qvo customers create --name "Jane Doe" --email jane@example.com
//! qvo customers list --where 'email:like:%@example.com' --order-by 'created_at DESC'
//! qvo withdrawals create --amount 10000
//! ```

#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

mod cli;
mod observability;

use clap::Parser;

use crate::{
    cli::Cli,
    observability::{LogFormat, init_observability},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_observability(LogFormat::from_env());

    cli.run().await
}
