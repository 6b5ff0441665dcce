//! Application configuration models.
//!
//! Every field has a default so a missing or partial config file is valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// GitHub API and organization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Organization whose repositories are listed and (un)watched.
    #[serde(default = "default_org")]
    pub org: String,

    /// Base URL of the REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Page size for listing endpoints.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Organization repositories whose name contains this are hidden.
    #[serde(default = "default_exclude_pattern")]
    pub exclude_pattern: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            org: default_org(),
            api_url: default_api_url(),
            per_page: default_per_page(),
            exclude_pattern: default_exclude_pattern(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_org() -> String {
    "exercism".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_per_page() -> u32 {
    100
}

fn default_exclude_pattern() -> String {
    "DEPRECATED".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Secret store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Program and leading arguments used to reach the secret store.
    #[serde(default = "default_command")]
    pub command: Vec<String>,

    /// Service attribute of the stored secret.
    #[serde(default = "default_service")]
    pub service: String,

    /// Account attribute of the stored secret.
    #[serde(default = "default_account")]
    pub account: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            service: default_service(),
            account: default_account(),
        }
    }
}

fn default_command() -> Vec<String> {
    vec!["secret-tool".to_string()]
}

fn default_service() -> String {
    "exercism-watch".to_string()
}

fn default_account() -> String {
    "github-pat".to_string()
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub credentials: CredentialConfig,
}

impl AppConfig {
    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".exercism-watch")
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }
}
