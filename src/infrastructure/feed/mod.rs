pub mod icon_client;
pub mod price_feed_client;

use async_trait::async_trait;

use crate::shared::errors::FeedError;
use crate::shared::types::PriceObservation;

pub use icon_client::{fallback_icon_symbol, resolve_icon, HttpIconSource, ResolvedIcon};
pub use price_feed_client::HttpPriceFeed;

/// Source of timestamped price observations
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the whole feed in one read
    async fn fetch_observations(&self) -> Result<Vec<PriceObservation>, FeedError>;
}

/// Per-symbol icon content provider
#[async_trait]
pub trait IconSource: Send + Sync {
    /// SVG markup for an exact symbol
    async fn fetch_icon(&self, symbol: &str) -> Result<String, FeedError>;
}
