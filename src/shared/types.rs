//! Common types used across the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A single timestamped price point from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub currency: String,
    pub price: f64,
    #[serde(rename = "date")]
    pub observed_at: DateTime<Utc>,
}

impl PriceObservation {
    pub fn new(currency: impl Into<String>, price: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            currency: currency.into(),
            price,
            observed_at,
        }
    }
}

/// Token representation.
///
/// Tokens are value objects identified by their symbol: two tokens with the
/// same symbol compare equal regardless of price or icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub price: Option<f64>,
    /// Raw SVG markup, `None` when no icon could be fetched.
    pub icon: Option<String>,
}

impl Token {
    pub fn new(symbol: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            icon: None,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

/// One half of the two-sided form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    From,
    To,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::From => "from",
            Side::To => "to",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "from" | "send" | "pay" => Ok(Side::From),
            "to" | "receive" | "get" => Ok(Side::To),
            _ => Err(anyhow::anyhow!("Unknown side: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_equality_by_symbol() {
        let a = Token::new("ETH", Some(2000.0));
        let mut b = Token::new("ETH", None);
        b.icon = Some("<svg/>".to_string());
        assert_eq!(a, b);
        assert_ne!(a, Token::new("USDC", Some(1.0)));

        let set: HashSet<Token> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_side_parse_and_flip() {
        assert_eq!("send".parse::<Side>().unwrap(), Side::From);
        assert_eq!("TO".parse::<Side>().unwrap(), Side::To);
        assert!("sideways".parse::<Side>().is_err());
        assert_eq!(Side::From.opposite(), Side::To);
    }

    #[test]
    fn test_observation_wire_date() {
        let json = r#"{"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.93}"#;
        let obs: PriceObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.currency, "ETH");
        assert_eq!(obs.price, 1645.93);
        assert_eq!(obs.observed_at.to_rfc3339(), "2023-08-29T07:10:52+00:00");
    }
}
