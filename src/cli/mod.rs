//! CLI interface using clap.
//!
//! Without a subcommand the tool runs the interactive watch session.

use clap::{Parser, Subcommand};

/// exercism-watch - choose which organization repositories you watch on GitHub.
#[derive(Parser, Debug)]
#[command(name = "exercism-watch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set your secret GitHub personal access token.
    SetToken {
        /// The personal access token to store.
        token: String,
    },

    /// Get your secret GitHub personal access token.
    GetToken,

    /// Remove your secret GitHub personal access token.
    #[command(alias = "unset-token")]
    RemoveToken,
}
