//! Token domain - token list and picker

mod token_list;

pub use token_list::{available_tokens, find_token, tokens_from_catalog, PopularityIndex};
