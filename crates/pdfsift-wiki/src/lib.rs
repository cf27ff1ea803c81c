//! Wikipedia-backed [`VerificationOracle`] implementation.
//!
//! One lookup is two MediaWiki action-API calls: a full-text search for
//! the query, then a category fetch on the top hit to decide whether it
//! describes a person. Every transport, HTTP, or decode failure
//! degrades to `None` ("unresolved") with a warning; the oracle never
//! returns an error.

use std::collections::HashMap;
use std::time::Duration;

use pdfsift_core::{Verification, VerificationOracle};
use serde::Deserialize;

const WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Verification client over the MediaWiki action API.
pub struct WikiOracle {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(default)]
    pageid: Option<u64>,
    title: String,
}

#[derive(Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    query: Option<PagesQuery>,
}

#[derive(Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: HashMap<String, PageInfo>,
}

#[derive(Deserialize)]
struct PageInfo {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct Category {
    title: String,
}

impl Default for WikiOracle {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl WikiOracle {
    /// Create an oracle with the given per-request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest` client cannot be constructed
    /// (unreachable in practice).
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pdfsift/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client builder should not fail with timeout and user_agent");
        Self {
            client,
            base_url: WIKIPEDIA_API.to_owned(),
        }
    }

    /// Override the API URL. Intended for tests only.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn top_search_hit(&self, query: &str) -> Option<SearchHit> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
            ])
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(query, "wikipedia search request failed: {e}");
                return None;
            }
        };
        if !resp.status().is_success() {
            tracing::warn!(query, "wikipedia search: HTTP {}", resp.status());
            return None;
        }
        let body: SearchResponse = match resp.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(query, "wikipedia search response parse failed: {e}");
                return None;
            }
        };

        body.query?.search.into_iter().next()
    }

    /// Whether the page's categories carry a person marker.
    ///
    /// Any failure here reads as "not a person"; the caller treats the
    /// whole lookup as unresolved in that case.
    async fn page_is_person(&self, pageid: u64) -> bool {
        let pageids = pageid.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("action", "query"),
                ("prop", "categories"),
                ("pageids", pageids.as_str()),
                ("format", "json"),
            ])
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(pageid, "wikipedia category request failed: {e}");
                return false;
            }
        };
        if !resp.status().is_success() {
            tracing::warn!(pageid, "wikipedia categories: HTTP {}", resp.status());
            return false;
        }
        let body: CategoriesResponse = match resp.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(pageid, "wikipedia category response parse failed: {e}");
                return false;
            }
        };

        body.query
            .map(|q| {
                q.pages.values().any(|page| {
                    page.categories
                        .iter()
                        .any(|c| category_indicates_person(&c.title))
                })
            })
            .unwrap_or(false)
    }
}

/// The person heuristic: category titles like "Living people" or
/// "1964 births". Kept in one place so the policy can change without
/// touching the oracle contract.
fn category_indicates_person(title: &str) -> bool {
    let title = title.to_lowercase();
    title.contains("people") || title.contains("birth")
}

impl VerificationOracle for WikiOracle {
    async fn verify(&self, query: &str, require_person: bool) -> Option<Verification> {
        let hit = self.top_search_hit(query).await?;

        let known_person = if require_person {
            let Some(pageid) = hit.pageid else {
                tracing::warn!(query, title = %hit.title, "search hit carries no pageid");
                return None;
            };
            if !self.page_is_person(pageid).await {
                tracing::debug!(query, title = %hit.title, "top hit is not a known person");
                return None;
            }
            true
        } else {
            // Category check skipped; the flag is only meaningful when
            // the caller asked for it.
            false
        };

        tracing::debug!(query, title = %hit.title, "wikipedia resolved");
        Some(Verification {
            title: hit.title,
            known_person,
        })
    }
}
