use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::IconSource;
use crate::shared::errors::FeedError;

/// Token icon repository client, one SVG file per symbol
pub struct HttpIconSource {
    http_client: Client,
    base_url: String,
}

impl HttpIconSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn icon_url(&self, symbol: &str) -> String {
        format!("{}/{}.svg", self.base_url, symbol)
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    async fn fetch_icon(&self, symbol: &str) -> Result<String, FeedError> {
        let response = self.http_client.get(self.icon_url(symbol)).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Icon lookup outcome for one token
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIcon {
    /// Symbol the icon file was looked up under
    pub icon_symbol: String,
    pub svg: Option<String>,
}

/// Lowercase the staking/receipt prefixes used by the icon repository:
/// a leading `ST` becomes `st`, then a leading `R` becomes `r`.
pub fn fallback_icon_symbol(symbol: &str) -> String {
    let symbol = match symbol.strip_prefix("ST") {
        Some(rest) => format!("st{}", rest),
        None => symbol.to_string(),
    };
    match symbol.strip_prefix('R') {
        Some(rest) => format!("r{}", rest),
        None => symbol,
    }
}

/// Try the exact symbol, then the fallback symbol. Never fails: a token
/// without any icon gets `svg: None`.
pub async fn resolve_icon(source: &dyn IconSource, symbol: &str) -> ResolvedIcon {
    match source.fetch_icon(symbol).await {
        Ok(svg) => {
            return ResolvedIcon {
                icon_symbol: symbol.to_string(),
                svg: Some(svg),
            }
        }
        Err(e) => debug!("Icon for {} not found: {}", symbol, e),
    }

    let fallback = fallback_icon_symbol(symbol);
    if fallback != symbol {
        match source.fetch_icon(&fallback).await {
            Ok(svg) => {
                return ResolvedIcon {
                    icon_symbol: fallback,
                    svg: Some(svg),
                }
            }
            Err(e) => debug!("Fallback icon {} not found: {}", fallback, e),
        }
    }

    ResolvedIcon {
        icon_symbol: fallback,
        svg: None,
    }
}
