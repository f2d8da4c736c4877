//! REST client for the Woot affiliate API.
//!
//! Fetching is a two-step flow: the feed endpoint lists current offer ids
//! for a category, then the getoffers endpoint returns full offer detail
//! for up to 25 ids per request.

use crate::error::FeedError;
use crate::source::DealSource;
use async_trait::async_trait;
use dealwatch_core::Deal;
use serde::Deserialize;
use tracing::debug;

/// One entry in the category feed listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedItem {
    pub offer_id: String,
}

/// Authenticated client for the Woot affiliate API.
pub struct WootClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    category: String,
}

impl WootClient {
    const DEFAULT_BASE_URL: &'static str = "https://developer.woot.com";
    /// The getoffers endpoint rejects more than 25 ids per request.
    pub const MAX_OFFERS_PER_REQUEST: usize = 25;

    pub fn new(api_key: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            category: category.into(),
        }
    }

    /// Override the API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the feed listing for the configured category.
    pub async fn fetch_feed(&self) -> Result<Vec<FeedItem>, FeedError> {
        let url = format!("{}/Affiliates/feed/{}", self.base_url, self.category);

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::BadStatus(response.status().as_u16()));
        }

        let items: Vec<FeedItem> = response.json().await?;
        debug!(category = %self.category, count = items.len(), "Fetched feed items");
        Ok(items)
    }

    /// Fetch offer detail for the given ids, capped at
    /// [`Self::MAX_OFFERS_PER_REQUEST`].
    pub async fn fetch_offers(&self, offer_ids: &[String]) -> Result<Vec<Deal>, FeedError> {
        if offer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = capped_ids(offer_ids);
        let url = format!("{}/Affiliates/getoffers", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&ids)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::BadStatus(response.status().as_u16()));
        }

        let deals: Vec<Deal> = response.json().await?;
        debug!(requested = ids.len(), count = deals.len(), "Fetched offer details");
        Ok(deals)
    }
}

/// Truncate the id list to the per-request API limit.
fn capped_ids(offer_ids: &[String]) -> &[String] {
    &offer_ids[..offer_ids.len().min(WootClient::MAX_OFFERS_PER_REQUEST)]
}

#[async_trait]
impl DealSource for WootClient {
    async fn fetch_deals(&self) -> Result<Vec<Deal>, FeedError> {
        let feed = self.fetch_feed().await?;

        let ids: Vec<String> = feed
            .into_iter()
            .map(|item| item.offer_id)
            .filter(|id| !id.is_empty())
            .collect();

        self.fetch_offers(&ids).await
    }
}
