//! Output formatting for confirmations and results.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{MutationKind, MutationOutcome, RepositoryName};

/// Confirmation question listing repositories about to be watched.
pub fn format_confirm_add(repos: &[RepositoryName]) -> String {
    let lines: Vec<String> = repos
        .iter()
        .map(|repo| format!("   + {repo}").green().to_string())
        .collect();

    format!(
        "Confirm that you wish to {} subscriptions to:\n{}",
        "add".green(),
        lines.join("\n")
    )
}

/// Confirmation question listing repositories about to be unwatched.
pub fn format_confirm_remove(repos: &[RepositoryName]) -> String {
    let lines: Vec<String> = repos
        .iter()
        .map(|repo| format!("   - {repo}").red().to_string())
        .collect();

    format!(
        "Confirm that you wish to {} subscriptions to:\n{}",
        "remove".red(),
        lines.join("\n")
    )
}

/// Table of applied subscription changes.
pub fn format_outcomes_table(outcomes: &[MutationOutcome]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Repository", "Change"]);

    for outcome in outcomes {
        let change = match outcome.kind {
            MutationKind::Subscribe => "+ watching",
            MutationKind::Unsubscribe => "- not watching",
        };
        table.add_row(vec![outcome.repo.as_str(), change]);
    }

    table.to_string()
}

/// One-line summary of how many changes were applied.
pub fn format_summary(outcomes: &[MutationOutcome]) -> String {
    let added = outcomes
        .iter()
        .filter(|o| o.kind == MutationKind::Subscribe)
        .count();
    let removed = outcomes.len() - added;

    format!(
        "{} Watching {} more, {} fewer repositories",
        "✓".green().bold(),
        added.to_string().green(),
        removed.to_string().red()
    )
}
