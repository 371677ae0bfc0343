//! Latest known price per currency symbol

use std::collections::HashMap;
use tracing::debug;

use crate::shared::types::PriceObservation;

/// Holds the most recent observation for each symbol seen in the feed
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    latest: HashMap<String, PriceObservation>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a raw feed in one step
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = PriceObservation>,
    {
        let mut catalog = Self::new();
        catalog.ingest(observations);
        catalog
    }

    /// Keep the observation with the latest `observed_at` per symbol.
    /// On equal timestamps the observation seen first is kept.
    pub fn ingest<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = PriceObservation>,
    {
        let mut seen = 0usize;
        for obs in observations {
            seen += 1;
            match self.latest.get(&obs.currency) {
                Some(existing) if existing.observed_at >= obs.observed_at => {}
                _ => {
                    self.latest.insert(obs.currency.clone(), obs);
                }
            }
        }
        debug!("Ingested {} observations, {} symbols known", seen, self.latest.len());
    }

    pub fn lookup(&self, symbol: &str) -> Option<f64> {
        self.latest.get(symbol).map(|obs| obs.price)
    }

    pub fn observation(&self, symbol: &str) -> Option<&PriceObservation> {
        self.latest.get(symbol)
    }

    /// Known symbols in ascending order
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.latest.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceObservation)> {
        self.latest.iter().map(|(symbol, obs)| (symbol.as_str(), obs))
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
