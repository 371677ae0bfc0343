//! Per-field validation of a swap form before submission

use std::collections::BTreeMap;
use std::fmt;

use super::amount_synchronizer::SwapFormState;
use super::input_sanitizer::parse_positive_amount;
use crate::shared::errors::ValidationError;
use crate::shared::utils::{format_token_amount, group_thousands, round_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FromToken,
    ToToken,
    FromAmount,
    ToAmount,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::FromToken => "from token",
            FormField::ToToken => "to token",
            FormField::FromAmount => "from amount",
            FormField::ToAmount => "to amount",
        };
        f.write_str(name)
    }
}

pub type ValidationErrors = BTreeMap<FormField, ValidationError>;

#[derive(Debug, Clone)]
pub struct FormValidator {
    max_amount_usd: f64,
}

impl FormValidator {
    pub fn new(max_amount_usd: f64) -> Self {
        Self { max_amount_usd }
    }

    /// Collect every field error; an empty map means the form can be submitted
    pub fn validate(&self, state: &SwapFormState) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        match (&state.from_token, &state.to_token) {
            (None, None) => {
                errors.insert(FormField::FromToken, ValidationError::MissingFromToken);
                errors.insert(FormField::ToToken, ValidationError::MissingToToken);
            }
            (None, Some(_)) => {
                errors.insert(FormField::FromToken, ValidationError::MissingFromToken);
            }
            (Some(_), None) => {
                errors.insert(FormField::ToToken, ValidationError::MissingToToken);
            }
            (Some(from), Some(to)) if from == to => {
                errors.insert(FormField::ToToken, ValidationError::SameToken(to.symbol.clone()));
            }
            _ => {}
        }

        if parse_positive_amount(&state.from_amount).is_none() {
            errors.insert(FormField::FromAmount, ValidationError::InvalidAmount);
        } else if self.is_amount_over_limit(state) {
            errors.insert(FormField::FromAmount, self.over_limit_error());
        } else if state.has_both_tokens() && parse_positive_amount(&state.to_amount).is_none() {
            errors.insert(FormField::ToAmount, ValidationError::NoConversion);
        }

        errors
    }

    /// Whether the send amount is worth more than the configured USD limit
    pub fn is_amount_over_limit(&self, state: &SwapFormState) -> bool {
        let price = match state.from_token.as_ref().and_then(|t| t.price) {
            Some(price) => price,
            None => return false,
        };
        match parse_positive_amount(&state.from_amount) {
            Some(amount) => amount * price > self.max_amount_usd,
            None => false,
        }
    }

    pub fn is_form_valid(&self, state: &SwapFormState) -> bool {
        self.validate(state).is_empty()
    }

    /// Largest token amount within the USD limit, as an amount-field literal
    pub fn max_amount(&self, price: f64) -> Option<String> {
        if price <= 0.0 || !price.is_finite() {
            return None;
        }
        Some(round_amount(self.max_amount_usd / price))
    }

    /// Same value as [`Self::max_amount`], grouped for display
    pub fn max_amount_display(&self, price: f64) -> Option<String> {
        if price <= 0.0 || !price.is_finite() {
            return None;
        }
        Some(format_token_amount(self.max_amount_usd / price))
    }

    fn over_limit_error(&self) -> ValidationError {
        ValidationError::AmountOverLimit(group_thousands(&round_amount(self.max_amount_usd)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::Token;

    fn state(from: Option<(&str, f64)>, to: Option<(&str, f64)>, from_amount: &str, to_amount: &str) -> SwapFormState {
        SwapFormState {
            from_token: from.map(|(s, p)| Token::new(s, Some(p))),
            to_token: to.map(|(s, p)| Token::new(s, Some(p))),
            from_amount: from_amount.to_string(),
            to_amount: to_amount.to_string(),
            last_edited: None,
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        let validator = FormValidator::new(1_000_000.0);
        let s = state(Some(("ETH", 2000.0)), Some(("USDC", 1.0)), "1", "2000");
        assert!(validator.validate(&s).is_empty());
        assert!(validator.is_form_valid(&s));
    }

    #[test]
    fn test_missing_tokens_reported_per_field() {
        let validator = FormValidator::new(1_000_000.0);
        let errors = validator.validate(&state(None, None, "", ""));
        assert_eq!(errors.get(&FormField::FromToken), Some(&ValidationError::MissingFromToken));
        assert_eq!(errors.get(&FormField::ToToken), Some(&ValidationError::MissingToToken));
        assert_eq!(errors.get(&FormField::FromAmount), Some(&ValidationError::InvalidAmount));
    }

    #[test]
    fn test_same_token_rejected() {
        let validator = FormValidator::new(1_000_000.0);
        let s = state(Some(("ETH", 2000.0)), Some(("ETH", 2000.0)), "1", "1");
        let errors = validator.validate(&s);
        assert_eq!(errors.get(&FormField::ToToken), Some(&ValidationError::SameToken("ETH".to_string())));
        assert!(!validator.is_form_valid(&s));
    }

    #[test]
    fn test_amount_over_limit() {
        let validator = FormValidator::new(1_000_000.0);
        let s = state(Some(("ETH", 2000.0)), Some(("USDC", 1.0)), "501", "1002000");
        assert!(validator.is_amount_over_limit(&s));
        assert!(!validator.is_form_valid(&s));
        assert_eq!(
            validator.validate(&s).get(&FormField::FromAmount).map(|e| e.to_string()),
            Some("Amount exceeds the maximum of $1 000 000".to_string())
        );

        let at_limit = state(Some(("ETH", 2000.0)), Some(("USDC", 1.0)), "500", "1000000");
        assert!(!validator.is_amount_over_limit(&at_limit));
    }

    #[test]
    fn test_unpriced_token_never_over_limit() {
        let validator = FormValidator::new(10.0);
        let mut s = state(None, Some(("USDC", 1.0)), "1000", "");
        s.from_token = Some(Token::new("NEW", None));
        assert!(!validator.is_amount_over_limit(&s));
    }

    #[test]
    fn test_missing_receive_amount_blocks_submit() {
        let validator = FormValidator::new(1_000_000.0);
        let s = state(Some(("ETH", 2000.0)), Some(("USDC", 1.0)), "1", "");
        assert!(!validator.is_form_valid(&s));
        assert_eq!(validator.validate(&s).get(&FormField::ToAmount), Some(&ValidationError::NoConversion));
    }

    #[test]
    fn test_max_amount() {
        let validator = FormValidator::new(1_000_000.0);
        assert_eq!(validator.max_amount(2000.0), Some("500".to_string()));
        assert_eq!(validator.max_amount(3.0), Some("333333.33333333".to_string()));
        assert_eq!(validator.max_amount_display(3.0), Some("333 333.33333333".to_string()));
        assert_eq!(validator.max_amount(0.0), None);
    }
}
