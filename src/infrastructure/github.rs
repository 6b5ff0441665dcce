//! Authenticated GitHub REST client.
//!
//! Covers the four endpoints the tool needs: organization repository
//! listing, subscription listing, and setting/deleting a subscription.
//! Listings are fetched page by page, following the `rel="last"` link.

use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;

use crate::domain::{AppError, Result};

use super::http::{HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpTransport};

const USER_AGENT: &str = concat!("exercism-watch/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Upper bound on the number of pages a listing may claim.
const MAX_PAGES: u32 = 10_000;

/// GitHub REST client holding the session token.
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for `api_url` authenticating with `token`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let mut url = Url::parse(&format!("{}{path}", self.api_url)).map_err(|e| {
            AppError::Config {
                message: format!("Invalid API URL {}{path}: {e}", self.api_url),
            }
        })?;

        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url.into())
    }

    fn headers(&self) -> HttpHeaders {
        vec![
            ("Accept".into(), "application/vnd.github+json".into()),
            ("Authorization".into(), format!("Bearer {}", self.token)),
            ("User-Agent".into(), USER_AGENT.into()),
            ("X-GitHub-Api-Version".into(), API_VERSION.into()),
        ]
    }

    async fn send(&self, method: HttpMethod, url: String, body: Vec<u8>) -> Result<HttpResponse> {
        let mut headers = self.headers();
        if !body.is_empty() {
            headers.push(("Content-Type".into(), "application/json".into()));
        }

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.clone(),
                headers,
                body,
            })
            .await?;

        if response.is_success() {
            Ok(response)
        } else {
            Err(status_error(method, &url, &response))
        }
    }

    /// Fetch every page of a listing endpoint, in page order.
    ///
    /// The first page's `Link` header decides how many pages follow. A
    /// missing header means a single page.
    ///
    /// # Errors
    /// `PaginationParse` for a malformed last-page link; `ApiRequest` for
    /// any failed request.
    pub async fn fetch_all_pages(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<HttpResponse>> {
        let first = self
            .send(HttpMethod::Get, self.url(path, params)?, Vec::new())
            .await?;

        let last_page = match first.header("link") {
            Some(link) => parse_last_page(link)?,
            None => 1,
        };

        tracing::debug!(path, last_page, "Fetched first page");

        let mut pages = vec![first];

        for page in 2..=last_page {
            let mut page_params = params.to_vec();
            page_params.push(("page", page.to_string()));

            let response = self
                .send(HttpMethod::Get, self.url(path, &page_params)?, Vec::new())
                .await?;

            tracing::debug!(path, page, "Fetched page");
            pages.push(response);
        }

        Ok(pages)
    }

    /// Watch `owner/repo`.
    ///
    /// # Errors
    /// `ApiRequest` if the request fails.
    pub async fn set_subscription(&self, owner: &str, repo: &str) -> Result<()> {
        let url = self.url(&format!("/repos/{owner}/{repo}/subscription"), &[])?;
        let body = serde_json::to_vec(&serde_json::json!({ "subscribed": true }))
            .map_err(AppError::json_parse)?;

        self.send(HttpMethod::Put, url, body).await?;
        Ok(())
    }

    /// Stop watching `owner/repo`.
    ///
    /// # Errors
    /// `ApiRequest` if the request fails.
    pub async fn delete_subscription(&self, owner: &str, repo: &str) -> Result<()> {
        let url = self.url(&format!("/repos/{owner}/{repo}/subscription"), &[])?;

        self.send(HttpMethod::Delete, url, Vec::new()).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn status_error(method: HttpMethod, url: &str, response: &HttpResponse) -> AppError {
    let rate_limited = response.header("x-ratelimit-remaining") == Some("0")
        && matches!(response.status, 403 | 429);

    let detail = if rate_limited {
        "rate limit exceeded".to_string()
    } else {
        serde_json::from_slice::<ApiErrorBody>(&response.body)
            .map(|body| body.message)
            .unwrap_or_else(|_| "unexpected response".to_string())
    };

    AppError::api(
        format!(
            "{} {url} returned {}: {detail}",
            method.as_str(),
            response.status
        ),
        Some(response.status),
    )
}

/// Extract the page number of the `rel="last"` entry of a `Link` header.
///
/// GitHub Link headers look like:
/// `<https://api.github.com/organizations/123/repos?per_page=100&page=2>; rel="next", <...&page=4>; rel="last"`
///
/// # Errors
/// `PaginationParse` if there is no `rel="last"` entry or its URL carries no
/// `page` parameter between 1 and [`MAX_PAGES`].
pub fn parse_last_page(link_header: &str) -> Result<u32> {
    let target = link_header
        .split(',')
        .find_map(|part| {
            let mut segments = part.split(';').map(str::trim);
            let target = segments.next()?;
            segments
                .any(|segment| segment == "rel=\"last\"")
                .then_some(target)
        })
        .ok_or_else(|| pagination_error("no rel=\"last\" link", link_header))?;

    let url = target
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .ok_or_else(|| pagination_error("last link is not enclosed in <>", link_header))?;

    let url = Url::parse(url).map_err(|_| pagination_error("last link is not a URL", link_header))?;

    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| pagination_error("last link has no page parameter", link_header))?;

    match page.parse::<u32>() {
        Ok(page) if (1..=MAX_PAGES).contains(&page) => Ok(page),
        Ok(page) => Err(pagination_error(
            &format!("last link claims {page} pages"),
            link_header,
        )),
        Err(_) => Err(pagination_error("last link has an invalid page number", link_header)),
    }
}

fn pagination_error(reason: &str, link_header: &str) -> AppError {
    AppError::PaginationParse {
        message: format!("{reason}: {link_header:?}"),
    }
}
