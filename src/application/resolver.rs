//! Repository set resolution.
//!
//! Turns paged listing responses into sorted repository names.

use serde::Deserialize;

use crate::domain::{AppError, GitHubConfig, RepositoryName, Result};
use crate::infrastructure::{GitHubClient, HttpResponse};

/// The one field we need from a repository listing entry.
#[derive(Debug, Deserialize)]
struct RepositoryEntry {
    full_name: RepositoryName,
}

/// List the organization's repositories, minus excluded ones, sorted.
///
/// # Errors
/// Returns error if fetching or parsing any page fails.
pub async fn resolve_org_repositories(
    client: &GitHubClient,
    config: &GitHubConfig,
) -> Result<Vec<RepositoryName>> {
    let pages = client
        .fetch_all_pages(
            &format!("/orgs/{}/repos", config.org),
            &[("per_page", config.per_page.to_string())],
        )
        .await?;

    let mut names = exclude_matching(names_from_pages(&pages)?, &config.exclude_pattern);
    sort_case_insensitive(&mut names);

    tracing::info!(org = %config.org, count = names.len(), "Resolved organization repositories");
    Ok(names)
}

/// List every repository the authenticated user watches, sorted.
///
/// # Errors
/// Returns error if fetching or parsing any page fails.
pub async fn resolve_user_subscriptions(
    client: &GitHubClient,
    config: &GitHubConfig,
) -> Result<Vec<RepositoryName>> {
    let pages = client
        .fetch_all_pages(
            "/user/subscriptions",
            &[("per_page", config.per_page.to_string())],
        )
        .await?;

    let mut names = names_from_pages(&pages)?;
    sort_case_insensitive(&mut names);

    tracing::info!(count = names.len(), "Resolved user subscriptions");
    Ok(names)
}

/// Flatten the `full_name` of every entry across pages, in page order.
///
/// # Errors
/// Returns error if a page body is not a JSON array of repositories.
pub fn names_from_pages(pages: &[HttpResponse]) -> Result<Vec<RepositoryName>> {
    let mut names = Vec::new();

    for page in pages {
        let entries: Vec<RepositoryEntry> =
            serde_json::from_slice(&page.body).map_err(AppError::json_parse)?;
        names.extend(entries.into_iter().map(|entry| entry.full_name));
    }

    Ok(names)
}

/// Drop names containing `pattern`. An empty pattern keeps everything.
#[must_use]
pub fn exclude_matching(names: Vec<RepositoryName>, pattern: &str) -> Vec<RepositoryName> {
    if pattern.is_empty() {
        return names;
    }

    names
        .into_iter()
        .filter(|name| !name.as_str().contains(pattern))
        .collect()
}

/// Stable sort by lowercase full name.
///
/// Lowercased names compare by byte order, not locale collation, so
/// punctuation such as `-`, `.` and `_` orders by its ASCII value.
pub fn sort_case_insensitive(names: &mut [RepositoryName]) {
    names.sort_by_cached_key(|name| name.as_str().to_lowercase());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::{HttpMethod, MockTransport};

    fn page(names: &[&str]) -> HttpResponse {
        let entries: Vec<serde_json::Value> = names
            .iter()
            .map(|n| serde_json::json!({ "id": 1, "full_name": n, "private": false }))
            .collect();

        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: serde_json::to_vec(&entries).unwrap(),
        }
    }

    fn names(raw: &[&str]) -> Vec<RepositoryName> {
        raw.iter().map(|n| RepositoryName::parse(*n).unwrap()).collect()
    }

    fn as_strs(names: &[RepositoryName]) -> Vec<&str> {
        names.iter().map(RepositoryName::as_str).collect()
    }

    #[test]
    fn test_names_flatten_in_page_order() {
        let pages = [page(&["exercism/b", "exercism/a"]), page(&["exercism/c"])];
        let flattened = names_from_pages(&pages).unwrap();
        assert_eq!(
            as_strs(&flattened),
            vec!["exercism/b", "exercism/a", "exercism/c"]
        );
    }

    #[test]
    fn test_invalid_body_is_json_error() {
        let bad = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: b"{\"message\":\"not a list\"}".to_vec(),
        };
        assert!(matches!(
            names_from_pages(&[bad]),
            Err(AppError::JsonParse { .. })
        ));
    }

    #[test]
    fn test_exclude_matching_is_case_sensitive_substring() {
        let kept = exclude_matching(
            names(&[
                "exercism/rust",
                "exercism/DEPRECATED-xapi",
                "exercism/old-DEPRECATED",
                "exercism/deprecated-notes",
            ]),
            "DEPRECATED",
        );
        assert_eq!(
            as_strs(&kept),
            vec!["exercism/rust", "exercism/deprecated-notes"]
        );
    }

    #[test]
    fn test_empty_pattern_keeps_all() {
        let all = names(&["exercism/a", "exercism/b"]);
        assert_eq!(exclude_matching(all.clone(), ""), all);
    }

    #[test]
    fn test_sort_is_case_insensitive_and_stable() {
        let mut list = names(&[
            "exercism/Zig",
            "exercism/alpha",
            "Exercism/Beta",
            "exercism/beta",
            "exercism/BETA",
        ]);
        sort_case_insensitive(&mut list);
        assert_eq!(
            as_strs(&list),
            vec![
                "exercism/alpha",
                "Exercism/Beta",
                "exercism/beta",
                "exercism/BETA",
                "exercism/Zig",
            ]
        );
    }

    #[test]
    fn test_sort_orders_punctuation_by_byte_value() {
        let mut list = names(&[
            "exercism/rust_tools",
            "exercism/rust2",
            "exercism/rust.vim",
            "exercism/rust-analyzer",
        ]);
        sort_case_insensitive(&mut list);
        assert_eq!(
            as_strs(&list),
            vec![
                "exercism/rust-analyzer",
                "exercism/rust.vim",
                "exercism/rust2",
                "exercism/rust_tools",
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_org_repositories_filters_and_sorts() {
        let transport = MockTransport::new();
        let base = "https://api.github.com/orgs/exercism/repos?per_page=100";
        let mut first = page(&["exercism/website", "exercism/DEPRECATED-v2"]);
        first.headers = vec![(
            "Link".into(),
            format!(r#"<{base}&page=2>; rel="next", <{base}&page=2>; rel="last""#),
        )];
        transport.push_response(HttpMethod::Get, base, first);
        transport.push_response(
            HttpMethod::Get,
            format!("{base}&page=2"),
            page(&["exercism/Bash", "exercism/configlet"]),
        );

        let client = GitHubClient::new(Arc::new(transport), "https://api.github.com", "t");
        let repos = resolve_org_repositories(&client, &GitHubConfig::default())
            .await
            .unwrap();

        assert_eq!(
            as_strs(&repos),
            vec!["exercism/Bash", "exercism/configlet", "exercism/website"]
        );
        assert!(repos.iter().all(|r| !r.as_str().contains("DEPRECATED")));
    }

    #[tokio::test]
    async fn test_resolve_user_subscriptions_keeps_everything() {
        let transport = MockTransport::new();
        transport.push_response(
            HttpMethod::Get,
            "https://api.github.com/user/subscriptions?per_page=100",
            page(&["rust-lang/rust", "exercism/DEPRECATED-v2", "exercism/Rust"]),
        );

        let client = GitHubClient::new(Arc::new(transport), "https://api.github.com", "t");
        let subs = resolve_user_subscriptions(&client, &GitHubConfig::default())
            .await
            .unwrap();

        assert_eq!(
            as_strs(&subs),
            vec!["exercism/DEPRECATED-v2", "exercism/Rust", "rust-lang/rust"]
        );
    }
}
