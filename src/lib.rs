//! Token swap form - price catalog, two-sided amount conversion and validation
//! Built with Domain-Driven Design principles

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::{MarketDataService, SwapForm};
pub use domain::price::{ExchangeRateCalculator, PriceCatalog};
pub use domain::swap::{FormValidator, SwapFormState};
pub use shared::errors::{AppError, FeedError, ValidationError};
pub use shared::types::{PriceObservation, Side, Token};
