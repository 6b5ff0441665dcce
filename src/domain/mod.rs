//! Domain layer - core types and errors.
//!
//! This layer contains pure domain models and error types
//! without any I/O.

pub mod config;
pub mod error;
pub mod models;

pub use config::{AppConfig, CredentialConfig, GitHubConfig};
pub use error::{AppError, Result};
pub use models::{
    MutationKind, MutationOutcome, ReconciliationPlan, RepositoryName, WatchStatus,
};
