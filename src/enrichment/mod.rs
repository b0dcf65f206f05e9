//! Image Enrichment
//!
//! Fetches illustrative images for a query and screens them before they
//! reach a response. Enrichment never fails a request: every error yields
//! an empty list.
//!
//! ## Modules
//!
//! - `wikimedia`: Wikimedia Commons search client
//! - `safety`: Banned-term filter applied to every image list

mod safety;
mod wikimedia;

pub use safety::{BANNED_TERMS, filter_safe, is_safe};
pub use wikimedia::{WikimediaClient, search_term};

use async_trait::async_trait;
use std::sync::Arc;

use crate::ai::provider::build_http_client;
use crate::config::EnrichmentConfig;
use crate::types::{ImageResult, Result};

/// Source of images related to a research query
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Images in source rank order; empty on any failure
    async fn fetch_images(&self, query: &str) -> Vec<ImageResult>;
}

pub type SharedImageSource = Arc<dyn ImageSource>;

/// Image source used when enrichment is turned off
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

#[async_trait]
impl ImageSource for NoImages {
    async fn fetch_images(&self, _query: &str) -> Vec<ImageResult> {
        Vec::new()
    }
}

/// Create the configured image source
pub fn build_image_source(config: &EnrichmentConfig) -> Result<SharedImageSource> {
    if !config.enabled {
        return Ok(Arc::new(NoImages));
    }
    let client = build_http_client(config.timeout())?;
    Ok(Arc::new(WikimediaClient::new(client, config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_enrichment_returns_nothing() {
        let config = EnrichmentConfig {
            enabled: false,
            api_url: "http://127.0.0.1:9/never".to_string(),
            ..EnrichmentConfig::default()
        };
        let source = build_image_source(&config).unwrap();
        assert!(source.fetch_images("photosynthesis").await.is_empty());
    }
}
