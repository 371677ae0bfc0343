//! Price domain - latest prices and exchange rates

mod exchange_rate;
mod price_catalog;

pub use exchange_rate::{ExchangeRateCalculator, NO_RATE};
pub use price_catalog::PriceCatalog;
