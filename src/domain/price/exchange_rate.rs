//! Unit conversion rates derived from the price catalog

use super::PriceCatalog;

/// Rate value meaning "no usable rate"
pub const NO_RATE: f64 = 0.0;

/// Derives conversion rates between two symbols
pub struct ExchangeRateCalculator<'a> {
    catalog: &'a PriceCatalog,
}

impl<'a> ExchangeRateCalculator<'a> {
    pub fn new(catalog: &'a PriceCatalog) -> Self {
        Self { catalog }
    }

    /// Units of `to_symbol` per one unit of `from_symbol`.
    ///
    /// Returns [`NO_RATE`] when either price is unknown, the destination
    /// price is zero, or the division is not finite. Callers must never treat
    /// the sentinel as a 1:0 conversion.
    pub fn rate(&self, from_symbol: &str, to_symbol: &str) -> f64 {
        let (from_price, to_price) = match (
            self.catalog.lookup(from_symbol),
            self.catalog.lookup(to_symbol),
        ) {
            (Some(from_price), Some(to_price)) => (from_price, to_price),
            _ => return NO_RATE,
        };

        if to_price == 0.0 {
            return NO_RATE;
        }

        let rate = from_price / to_price;
        if rate.is_finite() {
            rate
        } else {
            NO_RATE
        }
    }
}
