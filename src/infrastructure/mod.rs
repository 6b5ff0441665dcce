//! Infrastructure layer - external adapters (secret store, HTTP, terminal).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod github;
pub mod http;
pub mod prompt;
pub mod secret_store;

pub use config::load_config;
pub use github::GitHubClient;
pub use http::{HttpResponse, ReqwestTransport};
#[cfg(test)]
pub use http::{HttpMethod, MockTransport};
pub use prompt::{Prompter, TerminalPrompter};
pub use secret_store::{CredentialStore, SecretToolStore};
