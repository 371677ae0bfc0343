//! Token list construction, ordering and picker filtering

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::price::PriceCatalog;
use crate::shared::types::Token;

/// Orders tokens by a fixed popularity list, then alphabetically
#[derive(Debug, Clone, Default)]
pub struct PopularityIndex {
    ranks: HashMap<String, usize>,
}

impl PopularityIndex {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        for (rank, symbol) in symbols.into_iter().enumerate() {
            ranks.entry(symbol.into()).or_insert(rank);
        }
        Self { ranks }
    }

    /// Rank of a symbol; unlisted symbols share the lowest rank
    pub fn rank(&self, symbol: &str) -> usize {
        self.ranks.get(symbol).copied().unwrap_or(usize::MAX)
    }

    pub fn compare(&self, a: &Token, b: &Token) -> Ordering {
        self.rank(&a.symbol)
            .cmp(&self.rank(&b.symbol))
            .then_with(|| a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase()))
            .then_with(|| a.symbol.cmp(&b.symbol))
    }

    pub fn sort(&self, tokens: &mut [Token]) {
        tokens.sort_by(|a, b| self.compare(a, b));
    }
}

/// One token per catalog symbol, priced from its latest observation
pub fn tokens_from_catalog(catalog: &PriceCatalog, popularity: &PopularityIndex) -> Vec<Token> {
    let mut tokens: Vec<Token> = catalog
        .iter()
        .map(|(symbol, obs)| Token::new(symbol, Some(obs.price)))
        .collect();
    popularity.sort(&mut tokens);
    tokens
}

/// Tokens offered by one side's picker: the token already on this side and
/// the token on the other side are left out, then the search term filters
/// symbols case-insensitively.
pub fn available_tokens<'a>(
    tokens: &'a [Token],
    current: Option<&Token>,
    exclude: Option<&Token>,
    search: &str,
) -> Vec<&'a Token> {
    let needle = search.trim().to_lowercase();
    tokens
        .iter()
        .filter(|t| Some(*t) != current && Some(*t) != exclude)
        .filter(|t| needle.is_empty() || t.symbol.to_lowercase().contains(&needle))
        .collect()
}

pub fn find_token<'a>(tokens: &'a [Token], symbol: &str) -> Option<&'a Token> {
    tokens
        .iter()
        .find(|t| t.symbol == symbol)
        .or_else(|| tokens.iter().find(|t| t.symbol.eq_ignore_ascii_case(symbol)))
}
