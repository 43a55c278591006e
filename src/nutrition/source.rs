use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::cache::SearchCache;
use super::types::{FoodCandidate, SearchResponse};
use crate::config::UsdaConfig;

/// Failure talking to the external nutrition database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("nutrition database rate limit exceeded")]
    RateLimited,
    #[error("nutrition database rejected the API key")]
    Unauthorized,
    #[error("nutrition database request failed: {0}")]
    Transient(String),
}

#[async_trait]
pub trait FoodSource: Send + Sync {
    async fn search(&self, query: &str, page_size: u32) -> Result<Vec<FoodCandidate>, SourceError>;
}

/// FoodData Central search client with a cache in front of it.
pub struct UsdaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    cache: Arc<SearchCache>,
}

impl UsdaClient {
    pub fn new(config: &UsdaConfig, cache: Arc<SearchCache>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build usda http client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            cache,
        })
    }

    async fn fetch(&self, query: &str, page_size: u32) -> Result<Vec<FoodCandidate>, SourceError> {
        let url = format!("{}/foods/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", &page_size.to_string()),
                ("api_key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "usda request failed");
                SourceError::Transient(e.to_string())
            })?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("usda rate limit hit");
                return Err(SourceError::RateLimited);
            }
            StatusCode::FORBIDDEN => {
                warn!("usda rejected api key");
                return Err(SourceError::Unauthorized);
            }
            status if !status.is_success() => {
                warn!(%status, "usda returned error status");
                return Err(SourceError::Transient(format!("HTTP {status}")));
            }
            _ => {}
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Transient(format!("invalid search response: {e}")))?;
        Ok(body.foods)
    }
}

#[async_trait]
impl FoodSource for UsdaClient {
    async fn search(&self, query: &str, page_size: u32) -> Result<Vec<FoodCandidate>, SourceError> {
        let query = query.trim();
        let key = SearchCache::key(query, page_size);

        if let Some(hit) = self.cache.get(&key).await {
            debug!(%key, results = hit.len(), "usda search cache hit");
            return Ok(hit);
        }

        let foods = self.fetch(query, page_size).await?;
        self.cache.set(key.clone(), foods.clone()).await;
        let cached_entries = self.cache.len().await;
        debug!(%key, results = foods.len(), cached_entries, "usda search fetched");
        Ok(foods)
    }
}
