//! Reconciliation planning.
//!
//! Pure functions: no I/O, no side effects.

use std::collections::HashSet;

use crate::domain::{ReconciliationPlan, RepositoryName, WatchStatus};

/// Pair every organization repository with its current watch flag.
#[must_use]
pub fn watch_statuses(
    org_repos: &[RepositoryName],
    subscriptions: &[RepositoryName],
) -> Vec<WatchStatus> {
    let subscribed: HashSet<&RepositoryName> = subscriptions.iter().collect();

    org_repos
        .iter()
        .map(|repo| WatchStatus {
            repo: repo.clone(),
            is_watched: subscribed.contains(repo),
        })
        .collect()
}

/// Diff the selected repositories against the current watch statuses.
///
/// `to_add` keeps the selection order; `to_remove` follows `current`.
#[must_use]
pub fn plan(desired: &[RepositoryName], current: &[WatchStatus]) -> ReconciliationPlan {
    let watched: HashSet<&RepositoryName> = current
        .iter()
        .filter(|status| status.is_watched)
        .map(|status| &status.repo)
        .collect();
    let wanted: HashSet<&RepositoryName> = desired.iter().collect();

    let mut seen = HashSet::new();
    let to_add = desired
        .iter()
        .filter(|repo| !watched.contains(repo) && seen.insert(*repo))
        .cloned()
        .collect();

    let to_remove = current
        .iter()
        .filter(|status| status.is_watched && !wanted.contains(&status.repo))
        .map(|status| status.repo.clone())
        .collect();

    ReconciliationPlan { to_add, to_remove }
}
