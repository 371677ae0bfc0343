use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::PriceFeed;
use crate::shared::errors::FeedError;
use crate::shared::types::PriceObservation;

/// Raw entry of the prices endpoint
#[derive(Debug, Deserialize)]
struct WirePrice {
    currency: String,
    date: DateTime<Utc>,
    price: f64,
}

/// Prices endpoint client
pub struct HttpPriceFeed {
    http_client: Client,
    url: String,
}

impl HttpPriceFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    async fn fetch_observations(&self) -> Result<Vec<PriceObservation>, FeedError> {
        info!("Fetching prices from {}", self.url);

        let response = self.http_client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let observations = parse_prices(&body)?;
        info!("Received {} price observations", observations.len());
        Ok(observations)
    }
}

/// Decode the prices payload: a JSON array of `{currency, date, price}`.
/// Entries with a negative or non-finite price are dropped.
pub fn parse_prices(body: &str) -> Result<Vec<PriceObservation>, FeedError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FeedError::InvalidFormat(e.to_string()))?;
    if !value.is_array() {
        return Err(FeedError::InvalidFormat("expected array".to_string()));
    }

    let wire: Vec<WirePrice> =
        serde_json::from_value(value).map_err(|e| FeedError::InvalidFormat(e.to_string()))?;

    Ok(wire
        .into_iter()
        .filter_map(|entry| {
            if entry.price.is_finite() && entry.price >= 0.0 {
                Some(PriceObservation::new(entry.currency, entry.price, entry.date))
            } else {
                warn!("Skipping {} with invalid price {}", entry.currency, entry.price);
                None
            }
        })
        .collect())
}
