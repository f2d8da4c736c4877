//! The seam between the orchestrator and the remote deals API.

use crate::error::FeedError;
use async_trait::async_trait;
use dealwatch_core::Deal;

/// Anything that can produce the current list of deals.
///
/// `WootClient` is the production implementation; tests substitute a stub.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetch the current deals, in the order the remote API returns them.
    async fn fetch_deals(&self) -> Result<Vec<Deal>, FeedError>;
}
