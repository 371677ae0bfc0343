//! Two-sided amount state machine.
//!
//! The host owns a [`SwapFormState`] and drives it through the edit, select
//! and swap transitions, calling [`SwapFormState::recompute`] with the current
//! rate after every change. The side the user edited last is authoritative;
//! the other amount is derived from it.

use serde::Serialize;

use super::input_sanitizer::{parse_positive_amount, sanitize};
use crate::shared::types::{Side, Token};
use crate::shared::utils::round_amount;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwapFormState {
    pub from_token: Option<Token>,
    pub to_token: Option<Token>,
    pub from_amount: String,
    pub to_amount: String,
    pub last_edited: Option<Side>,
}

impl SwapFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit_from(&mut self, raw: &str) {
        self.from_amount = sanitize(raw);
        self.last_edited = Some(Side::From);
    }

    pub fn edit_to(&mut self, raw: &str) {
        self.to_amount = sanitize(raw);
        self.last_edited = Some(Side::To);
    }

    pub fn edit(&mut self, side: Side, raw: &str) {
        match side {
            Side::From => self.edit_from(raw),
            Side::To => self.edit_to(raw),
        }
    }

    /// Select the token to send. An amount typed before any token was chosen
    /// becomes authoritative once its token is known.
    pub fn select_from(&mut self, token: Token) {
        self.from_token = Some(token);
        if self.last_edited.is_none() && !self.from_amount.is_empty() {
            self.last_edited = Some(Side::From);
        }
    }

    pub fn select_to(&mut self, token: Token) {
        self.to_token = Some(token);
        if self.last_edited.is_none() && !self.to_amount.is_empty() {
            self.last_edited = Some(Side::To);
        }
    }

    pub fn select(&mut self, side: Side, token: Token) {
        match side {
            Side::From => self.select_from(token),
            Side::To => self.select_to(token),
        }
    }

    /// Bring the derived amount in line with the authoritative one.
    ///
    /// `rate` is units of the to-token per from-token; anything `<= 0` means
    /// no usable rate and leaves the derived amount untouched, as does a
    /// conversion that overflows.
    pub fn recompute(&mut self, rate: f64) {
        if self.has_both_tokens() {
            if rate > 0.0 && rate.is_finite() {
                match self.last_edited {
                    Some(Side::From) => {
                        if let Some(derived) = derive(&self.from_amount, |a| a * rate) {
                            self.to_amount = derived;
                        }
                    }
                    Some(Side::To) => {
                        if let Some(derived) = derive(&self.to_amount, |a| a / rate) {
                            self.from_amount = derived;
                        }
                    }
                    None => {}
                }
            }
            return;
        }

        // Incomplete pair: never show a derived value for an emptied input.
        match self.last_edited {
            Some(Side::From) if self.from_amount.is_empty() => self.to_amount.clear(),
            Some(Side::To) if self.to_amount.is_empty() => self.from_amount.clear(),
            _ => {}
        }
    }

    /// Exchange tokens and amounts in one step and flip the authoritative side
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from_token, &mut self.to_token);
        std::mem::swap(&mut self.from_amount, &mut self.to_amount);
        self.last_edited = self.last_edited.map(Side::opposite);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_both_tokens(&self) -> bool {
        self.from_token.is_some() && self.to_token.is_some()
    }

    pub fn token(&self, side: Side) -> Option<&Token> {
        match side {
            Side::From => self.from_token.as_ref(),
            Side::To => self.to_token.as_ref(),
        }
    }

    pub fn amount(&self, side: Side) -> &str {
        match side {
            Side::From => &self.from_amount,
            Side::To => &self.to_amount,
        }
    }
}

/// Converted amount as a field literal; `None` when the source is not a
/// positive amount or the result overflows.
fn derive(source: &str, convert: impl Fn(f64) -> f64) -> Option<String> {
    let value = convert(parse_positive_amount(source)?);
    value.is_finite().then(|| round_amount(value))
}
