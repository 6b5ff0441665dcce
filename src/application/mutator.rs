//! Subscription mutation.
//!
//! Applies subscribe/unsubscribe operations one repository at a time. The
//! first failure stops the batch; earlier mutations are left in place.

use crate::domain::{MutationKind, MutationOutcome, RepositoryName, Result};
use crate::infrastructure::GitHubClient;

/// Applies subscription changes for repositories of one organization.
pub struct SubscriptionMutator<'a> {
    client: &'a GitHubClient,
    org: &'a str,
    applied: Vec<MutationOutcome>,
}

impl<'a> SubscriptionMutator<'a> {
    /// Create a mutator that addresses repositories under `org`.
    #[must_use]
    pub const fn new(client: &'a GitHubClient, org: &'a str) -> Self {
        Self {
            client,
            org,
            applied: Vec::new(),
        }
    }

    /// Watch each repository, in order.
    ///
    /// # Errors
    /// Returns the first failure; remaining repositories are not attempted.
    pub async fn apply_adds(&mut self, repos: &[RepositoryName]) -> Result<()> {
        self.apply(MutationKind::Subscribe, repos).await
    }

    /// Unwatch each repository, in order.
    ///
    /// # Errors
    /// Returns the first failure; remaining repositories are not attempted.
    pub async fn apply_removes(&mut self, repos: &[RepositoryName]) -> Result<()> {
        self.apply(MutationKind::Unsubscribe, repos).await
    }

    /// Mutations that succeeded so far, in the order they were applied.
    #[must_use]
    pub fn applied(&self) -> &[MutationOutcome] {
        &self.applied
    }

    async fn apply(&mut self, kind: MutationKind, repos: &[RepositoryName]) -> Result<()> {
        for repo in repos {
            // Owner always comes from the configured organization
            let name = repo.name();
            if repo.owner() != self.org {
                tracing::debug!(%repo, org = self.org, "Addressing repository under configured org");
            }

            let result = match kind {
                MutationKind::Subscribe => self.client.set_subscription(self.org, name).await,
                MutationKind::Unsubscribe => self.client.delete_subscription(self.org, name).await,
            };

            if let Err(e) = result {
                tracing::warn!(%repo, action = %kind, "Subscription change failed");
                return Err(e);
            }

            tracing::info!(%repo, action = %kind, "Subscription changed");
            self.applied.push(MutationOutcome {
                repo: repo.clone(),
                kind,
            });
        }

        Ok(())
    }
}
