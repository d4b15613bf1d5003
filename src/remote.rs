//! # Remote Repository Listing
//!
//! Enumerates every public repository of a GitHub account before any clone
//! work begins. Listing walks the paginated REST endpoint with a fixed page
//! size and accumulates the full repository set in receipt order; pagination
//! follows the `Link: <...>; rel="next"` cursor and stops when no cursor is
//! present.
//!
//! Listing is strictly fail-fast: the first failed request, non-success
//! status, or unusable record aborts the whole enumeration with
//! [`Error::Remote`]. There is no retry and no partial result.
//!
//! Accounts may be organizations or users. The organization endpoint is
//! tried first; a 404 on the very first page falls back to the user
//! endpoint once.

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::repository::Repository;

const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// Fixed page size for the listing endpoint.
const PAGE_SIZE: u32 = 10;

/// One repository record as the listing endpoint returns it.
///
/// The API exposes far more fields; only the clone URL matters here.
#[derive(Debug, Deserialize)]
struct RepoRecord {
    clone_url: String,
}

/// Client for the paginated repository listing endpoint.
pub struct RepoLister {
    client: Client,
    api_root: String,
}

impl RepoLister {
    /// Create a lister against the public GitHub API.
    ///
    /// `token` is the opaque bearer credential; when present it is attached
    /// to every request as an `Authorization` header.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_api_root(DEFAULT_API_ROOT, token)
    }

    /// Create a lister against a custom API root. Used by tests to point at
    /// a loopback fixture server.
    pub fn with_api_root(api_root: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                Error::Remote {
                    url: api_root.to_string(),
                    message: "credential contains characters not valid in a header".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Remote {
                url: api_root.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_root: api_root.trim_end_matches('/').to_string(),
        })
    }

    /// List every public repository of `account`, in receipt order.
    pub fn list_public_repos(&self, account: &str) -> Result<Vec<Repository>> {
        let mut page_url = self.listing_url("orgs", account);
        let mut tried_user_endpoint = false;
        let mut repositories = Vec::new();

        loop {
            debug!("requesting {}", page_url);
            let response = self
                .client
                .get(&page_url)
                .send()
                .map_err(|e| Error::Remote {
                    url: page_url.clone(),
                    message: e.to_string(),
                })?;

            // Accounts may be users rather than organizations; retry the
            // first page once against the user endpoint.
            if response.status() == StatusCode::NOT_FOUND
                && !tried_user_endpoint
                && repositories.is_empty()
            {
                tried_user_endpoint = true;
                page_url = self.listing_url("users", account);
                continue;
            }

            if !response.status().is_success() {
                return Err(Error::Remote {
                    url: page_url,
                    message: format!("HTTP {}", response.status()),
                });
            }

            let next = next_page_url(&response);
            let page: Vec<RepoRecord> = response.json().map_err(|e| Error::Remote {
                url: page_url.clone(),
                message: e.to_string(),
            })?;
            debug!("received {} repositories", page.len());
            for record in page {
                repositories.push(Repository::from_clone_url(&record.clone_url)?);
            }

            match next {
                Some(url) => page_url = url,
                None => break,
            }
        }

        Ok(repositories)
    }

    fn listing_url(&self, kind: &str, account: &str) -> String {
        format!(
            "{}/{}/{}/repos?type=public&per_page={}",
            self.api_root, kind, account, PAGE_SIZE
        )
    }
}

/// Extract the `rel="next"` target from a response's Link header, if any.
fn next_page_url(response: &Response) -> Option<String> {
    let link = response.headers().get(LINK)?.to_str().ok()?;
    for part in link.split(',') {
        let mut pieces = part.trim().split(';');
        let Some(target) = pieces.next() else {
            continue;
        };
        if pieces.any(|p| p.trim() == r#"rel="next""#) {
            let target = target.trim().trim_start_matches('<').trim_end_matches('>');
            return Some(target.to_string());
        }
    }
    None
}
