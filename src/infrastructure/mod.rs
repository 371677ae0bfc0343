//! Infrastructure layer - external price and icon providers

pub mod feed;

pub use feed::{HttpIconSource, HttpPriceFeed, IconSource, PriceFeed};
