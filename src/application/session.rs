//! Interactive watch session.
//!
//! Resolves the current state, asks the user for the target set, plans the
//! difference and applies whatever the user confirms: additions first, then
//! removals.

use colored::Colorize;

use crate::domain::{GitHubConfig, MutationOutcome, ReconciliationPlan, Result};
use crate::infrastructure::{GitHubClient, Prompter};

use super::formatter::{format_confirm_add, format_confirm_remove};
use super::mutator::SubscriptionMutator;
use super::planner::{plan, watch_statuses};
use super::resolver::{resolve_org_repositories, resolve_user_subscriptions};

/// One run of the default command.
pub struct WatchSession<'a, P> {
    client: &'a GitHubClient,
    config: &'a GitHubConfig,
    prompter: P,
    applied: Vec<MutationOutcome>,
}

impl<'a, P: Prompter> WatchSession<'a, P> {
    pub const fn new(client: &'a GitHubClient, config: &'a GitHubConfig, prompter: P) -> Self {
        Self {
            client,
            config,
            prompter,
            applied: Vec::new(),
        }
    }

    /// Mutations applied by [`run`](Self::run), including those that
    /// succeeded before a failure.
    #[must_use]
    pub fn applied(&self) -> &[MutationOutcome] {
        &self.applied
    }

    /// Run the full resolve → select → plan → confirm → apply flow.
    ///
    /// # Errors
    /// Any fetch, prompt or mutation failure ends the session. Mutations
    /// applied before the failure are kept and remain in [`applied`](Self::applied).
    pub async fn run(&mut self) -> Result<()> {
        println!("Finding {} repositories..", self.config.org.cyan());
        let org_repos = resolve_org_repositories(self.client, self.config).await?;
        println!(" {}", "Found!".green());

        println!("Finding your watched repositories..");
        let subscriptions = resolve_user_subscriptions(self.client, self.config).await?;
        println!(" {}", "Found!".green());

        let statuses = watch_statuses(&org_repos, &subscriptions);
        let desired = self.prompter.select_repositories(&statuses)?;
        let plan = plan(&desired, &statuses);

        tracing::info!(
            to_add = plan.to_add.len(),
            to_remove = plan.to_remove.len(),
            "Planned subscription changes"
        );

        if plan.is_empty() {
            return Ok(());
        }

        let confirm_add = !plan.to_add.is_empty()
            && self
                .prompter
                .confirm(&format_confirm_add(&plan.to_add), false)?;
        let confirm_remove = !plan.to_remove.is_empty()
            && self
                .prompter
                .confirm(&format_confirm_remove(&plan.to_remove), false)?;

        let mut mutator = SubscriptionMutator::new(self.client, &self.config.org);
        let result = apply_confirmed(&mut mutator, &plan, confirm_add, confirm_remove).await;
        self.applied = mutator.applied().to_vec();

        result
    }
}

async fn apply_confirmed(
    mutator: &mut SubscriptionMutator<'_>,
    plan: &ReconciliationPlan,
    confirm_add: bool,
    confirm_remove: bool,
) -> Result<()> {
    if confirm_add {
        println!("Adding subscriptions...");
        mutator.apply_adds(&plan.to_add).await?;
        println!(" {}", "Added!".green());
    }

    if confirm_remove {
        println!("Removing subscriptions...");
        mutator.apply_removes(&plan.to_remove).await?;
        println!(" {}", "Removed!".green());
    }

    Ok(())
}
