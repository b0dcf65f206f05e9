//! Wikimedia Commons image search
//!
//! Uses the MediaWiki `generator=search` API over the File namespace and
//! reads the first `imageinfo` entry of each page.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::ImageSource;
use crate::config::EnrichmentConfig;
use crate::constants::enrichment as enrichment_constants;
use crate::types::{CogniError, ImageResult, Result};

/// Conversational filler that only dilutes a media search
static FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what is|who is|where is|tell me about|explain|best")
        .expect("filler pattern is valid")
});

static FILE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\w+$").expect("extension pattern is valid"));

/// Reduce a research query to a media search term
pub fn search_term(query: &str) -> String {
    FILLER.replace_all(query, "").trim().to_string()
}

/// Human-readable title from a `File:` page title
fn display_title(page_title: &str) -> String {
    let title = page_title.strip_prefix("File:").unwrap_or(page_title);
    FILE_EXTENSION.replace(title, "").into_owned()
}

pub struct WikimediaClient {
    api_url: String,
    limit: u32,
    client: reqwest::Client,
}

impl WikimediaClient {
    pub fn new(client: reqwest::Client, config: &EnrichmentConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            limit: config.limit,
            client,
        }
    }

    async fn search(&self, term: &str) -> Result<Vec<ImageResult>> {
        let mut url = url::Url::parse(&self.api_url)
            .map_err(|e| CogniError::Config(format!("Invalid enrichment URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("generator", "search")
            .append_pair("gsrnamespace", "6")
            .append_pair("gsrsearch", term)
            .append_pair("gsrlimit", &self.limit.to_string())
            .append_pair("prop", "imageinfo")
            .append_pair("iiprop", "url|extmetadata")
            .append_pair("format", "json");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CogniError::Enrichment(format!("Wikimedia request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CogniError::Enrichment(format!(
                "Wikimedia API error ({})",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CogniError::Enrichment(format!("Failed to parse Wikimedia response: {}", e)))?;

        Ok(body.into_images())
    }
}

#[async_trait]
impl ImageSource for WikimediaClient {
    async fn fetch_images(&self, query: &str) -> Vec<ImageResult> {
        let term = search_term(query);
        if term.chars().count() < enrichment_constants::MIN_TERM_CHARS {
            debug!(term = %term, "Search term too short, skipping enrichment");
            return Vec::new();
        }

        match self.search(&term).await {
            Ok(images) => {
                debug!(count = images.len(), "Enrichment images found");
                images
            }
            Err(err) => {
                warn!(error = %err, "Enrichment failed");
                Vec::new()
            }
        }
    }
}

// Response types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<QueryBlock>,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    /// Search rank; absent on some API versions
    index: Option<u32>,
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: Option<String>,
}

/// Numeric page id; non-numeric keys sort last
fn page_id(key: &str) -> u64 {
    key.parse().unwrap_or(u64::MAX)
}

impl SearchResponse {
    fn into_images(self) -> Vec<ImageResult> {
        let Some(query) = self.query else {
            return Vec::new();
        };

        let mut pages: Vec<(String, Page)> = query.pages.into_iter().collect();
        pages.sort_by(|(a_key, a), (b_key, b)| {
            a.index
                .unwrap_or(u32::MAX)
                .cmp(&b.index.unwrap_or(u32::MAX))
                .then_with(|| page_id(a_key).cmp(&page_id(b_key)))
                .then_with(|| a_key.cmp(b_key))
        });

        pages
            .into_iter()
            .filter_map(|(_, page)| {
                let url = page.imageinfo.into_iter().next()?.url?;
                Some(ImageResult {
                    url,
                    title: display_title(&page.title),
                    source: enrichment_constants::WIKIMEDIA_SOURCE.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::test_support::spawn_stub;
    use axum::{Json, Router, extract::Query, routing::get};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client(api_url: String) -> WikimediaClient {
        let config = EnrichmentConfig {
            api_url,
            ..EnrichmentConfig::default()
        };
        WikimediaClient::new(reqwest::Client::new(), &config)
    }

    #[test]
    fn test_search_term_strips_filler() {
        assert_eq!(search_term("What is Quantum Computing"), "Quantum Computing");
        assert_eq!(search_term("tell me about the Eiffel Tower"), "the Eiffel Tower");
        assert_eq!(search_term("explain"), "");
    }

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("File:Blockchain diagram.svg"), "Blockchain diagram");
        assert_eq!(display_title("File:v1.2 chart.png"), "v1.2 chart");
        assert_eq!(display_title("No prefix"), "No prefix");
    }

    #[test]
    fn test_unranked_pages_follow_numeric_page_id() {
        let response: SearchResponse = serde_json::from_value(json!({
            "query": { "pages": {
                "100": { "title": "File:Hundred.png",
                         "imageinfo": [ { "url": "https://upload.example/100.png" } ] },
                "99": { "title": "File:Ninety nine.png",
                        "imageinfo": [ { "url": "https://upload.example/99.png" } ] },
                "7": { "title": "File:Ranked.png", "index": 1,
                       "imageinfo": [ { "url": "https://upload.example/7.png" } ] }
            } }
        }))
        .unwrap();

        let titles: Vec<String> = response.into_images().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["Ranked", "Ninety nine", "Hundred"]);
    }

    #[tokio::test]
    async fn test_fetch_images_parses_pages_in_rank_order() {
        let app = Router::new().route(
            "/w/api.php",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["gsrsearch"], "blockchain");
                assert_eq!(params["gsrnamespace"], "6");
                assert_eq!(params["iiprop"], "url|extmetadata");
                Json(json!({
                    "query": { "pages": {
                        "200": { "title": "File:Second.png", "index": 2,
                                 "imageinfo": [ { "url": "https://upload.example/second.png" } ] },
                        "100": { "title": "File:First.jpg", "index": 1,
                                 "imageinfo": [ { "url": "https://upload.example/first.jpg" } ] },
                        "300": { "title": "File:No info.png", "index": 3 }
                    } }
                }))
            }),
        );
        let base = spawn_stub(app).await;

        let images = client(format!("{base}/w/api.php"))
            .fetch_images("what is blockchain")
            .await;

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].title, "First");
        assert_eq!(images[0].url, "https://upload.example/first.jpg");
        assert_eq!(images[1].title, "Second");
        assert!(images.iter().all(|i| i.source == "Wikimedia Commons"));
    }

    #[tokio::test]
    async fn test_short_term_makes_no_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let app = Router::new().route(
            "/w/api.php",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({}))
                }
            }),
        );
        let base = spawn_stub(app).await;

        let images = client(format!("{base}/w/api.php")).fetch_images("What is AI").await;
        assert!(images.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_query_block_yields_empty() {
        let app = Router::new().route(
            "/w/api.php",
            get(|| async { Json(json!({ "batchcomplete": "" })) }),
        );
        let base = spawn_stub(app).await;

        let images = client(format!("{base}/w/api.php")).fetch_images("gravity").await;
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_yields_empty() {
        let app = Router::new().route("/w/api.php", get(|| async { "<html>oops</html>" }));
        let base = spawn_stub(app).await;

        let images = client(format!("{base}/w/api.php")).fetch_images("gravity").await;
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty() {
        // Port 9 (discard) is not listening on loopback in test environments
        let images = client("http://127.0.0.1:9/w/api.php".to_string())
            .fetch_images("gravity")
            .await;
        assert!(images.is_empty());
    }
}
