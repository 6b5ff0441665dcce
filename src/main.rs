//! exercism-watch - manage GitHub watch subscriptions for an organization.
//!
//! Reads a personal access token from the platform secret store, lists the
//! organization's repositories and your current subscriptions, and lets you
//! pick which ones to watch:
//!   exercism-watch set-token <token>   # store the token
//!   exercism-watch                     # choose repositories to watch
//!   exercism-watch get-token           # print the stored token
//!   exercism-watch remove-token        # forget the token

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{format_outcomes_table, format_summary, WatchSession};
use cli::{Cli, Commands};
use domain::AppConfig;
use infrastructure::{
    load_config, CredentialStore, GitHubClient, ReqwestTransport, SecretToolStore,
    TerminalPrompter,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
async fn run(cli: Cli) -> domain::Result<()> {
    let config = load_config()?;
    let store = SecretToolStore::from_config(&config.credentials)?;

    match cli.command {
        Some(Commands::SetToken { token }) => cmd_set_token(&store, &token)?,
        Some(Commands::GetToken) => cmd_get_token(&store)?,
        Some(Commands::RemoveToken) => cmd_remove_token(&store)?,
        None => cmd_watch(&store, &config).await?,
    }

    Ok(())
}

/// Store a new token.
fn cmd_set_token(store: &impl CredentialStore, token: &str) -> domain::Result<()> {
    store.put(token)?;
    println!("{} Successfully set token", "✓".green().bold());
    Ok(())
}

/// Print the stored token.
fn cmd_get_token(store: &impl CredentialStore) -> domain::Result<()> {
    println!("{}", store.get()?);
    Ok(())
}

/// Remove the stored token.
fn cmd_remove_token(store: &impl CredentialStore) -> domain::Result<()> {
    store.delete()?;
    println!("{} Successfully removed token", "✓".green().bold());
    Ok(())
}

/// Interactive reconciliation of watched repositories.
async fn cmd_watch(store: &impl CredentialStore, config: &AppConfig) -> domain::Result<()> {
    let token = store.get()?;

    let transport = ReqwestTransport::with_timeout(config.github.timeout())?;
    let client = GitHubClient::new(Arc::new(transport), &config.github.api_url, token);

    let mut session = WatchSession::new(&client, &config.github, TerminalPrompter::stdio());
    let result = session.run().await;

    // Report what was applied even when a later mutation failed
    let applied = session.applied();
    if !applied.is_empty() {
        println!("{}", format_outcomes_table(applied));
        println!("{}", format_summary(applied));
    } else if result.is_ok() {
        println!("No changes made.");
    }

    result
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
