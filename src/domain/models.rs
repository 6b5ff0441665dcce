//! Domain models for repository watch reconciliation.
//!
//! These models represent repositories, their watch status, and the
//! subscribe/unsubscribe plan derived from a user's selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::AppError;

/// Full repository name in canonical `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Parse a full name, requiring exactly one `/` with non-empty segments.
    ///
    /// # Errors
    /// Returns `InvalidData` if the name is not of the form `owner/name`.
    pub fn parse(full_name: impl Into<String>) -> Result<Self, AppError> {
        let full_name = full_name.into();

        let valid = match full_name.split_once('/') {
            Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
            None => false,
        };

        if valid {
            Ok(Self(full_name))
        } else {
            Err(AppError::InvalidData {
                message: format!("Invalid repository name: {full_name:?}"),
            })
        }
    }

    /// The full `owner/name` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The owner segment (before `/`).
    #[must_use]
    pub fn owner(&self) -> &str {
        self.0.split_once('/').map_or("", |(owner, _)| owner)
    }

    /// The repository segment (after `/`).
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl TryFrom<String> for RepositoryName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<RepositoryName> for String {
    fn from(name: RepositoryName) -> Self {
        name.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An organization repository paired with whether the user watches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchStatus {
    pub repo: RepositoryName,
    pub is_watched: bool,
}

/// Subscribe/unsubscribe operations needed to reach the selected state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    /// Selected repositories that are not currently watched, in selection order.
    pub to_add: Vec<RepositoryName>,
    /// Watched repositories that were deselected, in listing order.
    pub to_remove: Vec<RepositoryName>,
}

impl ReconciliationPlan {
    /// Whether no operation is needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Direction of a subscription mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Subscribe,
    Unsubscribe,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscribe => write!(f, "watch"),
            Self::Unsubscribe => write!(f, "unwatch"),
        }
    }
}

/// A mutation that was applied successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub repo: RepositoryName,
    pub kind: MutationKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_name() {
        let name = RepositoryName::parse("exercism/rust").unwrap();
        assert_eq!(name.owner(), "exercism");
        assert_eq!(name.name(), "rust");
        assert_eq!(name.to_string(), "exercism/rust");
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        assert!(RepositoryName::parse("").is_err());
        assert!(RepositoryName::parse("exercism").is_err());
        assert!(RepositoryName::parse("/rust").is_err());
        assert!(RepositoryName::parse("exercism/").is_err());
        assert!(RepositoryName::parse("exercism/rust/extra").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<RepositoryName, _> = serde_json::from_str("\"exercism/website\"");
        assert!(ok.is_ok());

        let bad: Result<RepositoryName, _> = serde_json::from_str("\"website\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_plan_is_empty() {
        assert!(ReconciliationPlan::default().is_empty());

        let plan = ReconciliationPlan {
            to_add: vec![RepositoryName::parse("exercism/c").unwrap()],
            to_remove: Vec::new(),
        };
        assert!(!plan.is_empty());
    }
}
