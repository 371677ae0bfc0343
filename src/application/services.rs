//! Application services and use cases

use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::price::PriceCatalog;
use crate::domain::token::{tokens_from_catalog, PopularityIndex};
use crate::infrastructure::feed::{resolve_icon, IconSource, PriceFeed};
use crate::shared::errors::FeedError;
use crate::shared::types::Token;

/// Everything the form needs from the outside world
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    pub catalog: PriceCatalog,
    /// Sorted for display, one per catalog symbol
    pub tokens: Vec<Token>,
}

/// Loads prices once and turns them into a token list
pub struct MarketDataService {
    feed: Arc<dyn PriceFeed>,
    icons: Option<Arc<dyn IconSource>>,
    popularity: PopularityIndex,
}

impl MarketDataService {
    pub fn new(feed: Arc<dyn PriceFeed>, popularity: PopularityIndex) -> Self {
        Self {
            feed,
            icons: None,
            popularity,
        }
    }

    pub fn with_icons(mut self, icons: Arc<dyn IconSource>) -> Self {
        self.icons = Some(icons);
        self
    }

    /// Fetch the feed and keep the latest price per symbol
    pub async fn load_catalog(&self) -> Result<PriceCatalog, FeedError> {
        let observations = self.feed.fetch_observations().await?;
        let catalog = PriceCatalog::from_observations(observations);
        if catalog.is_empty() {
            warn!("Price feed returned no usable prices");
        }
        Ok(catalog)
    }

    /// Catalog plus token list, with icons when an icon source is configured
    pub async fn load(&self) -> Result<MarketData, FeedError> {
        let catalog = self.load_catalog().await?;
        let mut tokens = tokens_from_catalog(&catalog, &self.popularity);

        if let Some(icons) = &self.icons {
            let lookups = tokens.iter().map(|t| resolve_icon(icons.as_ref(), &t.symbol));
            let resolved = join_all(lookups).await;
            let found = resolved.iter().filter(|icon| icon.svg.is_some()).count();
            for (token, icon) in tokens.iter_mut().zip(resolved) {
                token.icon = icon.svg;
            }
            info!("Resolved icons for {}/{} tokens", found, tokens.len());
        }

        info!("Loaded {} tokens", tokens.len());
        Ok(MarketData { catalog, tokens })
    }
}
