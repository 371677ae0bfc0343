//! Form host: owns one swap form and keeps it consistent with the market

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::application::services::{MarketData, MarketDataService};
use crate::application::submission::{SubmitResult, SwapSubmitter};
use crate::config::FormCfg;
use crate::domain::price::{ExchangeRateCalculator, NO_RATE};
use crate::domain::swap::{FormField, FormValidator, SwapFormState, ValidationErrors};
use crate::domain::token::{available_tokens, find_token};
use crate::shared::errors::{FeedError, ValidationError};
use crate::shared::types::{Side, Token};
use crate::shared::utils::{format_price, format_rate, format_usd_value};

/// Loading state of the price feed
#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    Loading,
    Ready,
    Failed(String),
}

pub struct SwapForm {
    state: SwapFormState,
    market: MarketData,
    status: FeedStatus,
    validator: FormValidator,
    errors: ValidationErrors,
    submit_result: Option<SubmitResult>,
    swap_delay: Duration,
    default_pair: (String, String),
}

impl SwapForm {
    pub fn new(cfg: &FormCfg) -> Self {
        Self {
            state: SwapFormState::new(),
            market: MarketData::default(),
            status: FeedStatus::Loading,
            validator: FormValidator::new(cfg.max_amount_usd),
            errors: ValidationErrors::new(),
            submit_result: None,
            swap_delay: Duration::from_millis(cfg.swap_delay_ms),
            default_pair: (cfg.default_from.clone(), cfg.default_to.clone()),
        }
    }

    pub fn state(&self) -> &SwapFormState {
        &self.state
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn tokens(&self) -> &[Token] {
        &self.market.tokens
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submit_result(&self) -> Option<&SubmitResult> {
        self.submit_result.as_ref()
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    /// Fetch market data and apply it; a failure leaves the form in the
    /// failed state until the next explicit call.
    pub async fn load(&mut self, service: &MarketDataService) -> bool {
        self.status = FeedStatus::Loading;
        match service.load().await {
            Ok(market) => {
                self.apply_market(market);
                true
            }
            Err(e) => {
                self.fail_market(&e);
                false
            }
        }
    }

    pub fn apply_market(&mut self, market: MarketData) {
        self.market = market;
        self.status = FeedStatus::Ready;
        self.reprice_selection();
        self.select_default_pair();
        self.refresh();
    }

    pub fn fail_market(&mut self, err: &FeedError) {
        warn!("Failed to fetch token prices: {}", err);
        self.status = FeedStatus::Failed(err.to_string());
    }

    pub fn edit(&mut self, side: Side, raw: &str) {
        self.state.edit(side, raw);
        if side == Side::From {
            self.errors.remove(&FormField::FromAmount);
        }
        self.errors.remove(&FormField::ToAmount);
        self.refresh();
    }

    /// Pick a token by symbol for one side
    pub fn select(&mut self, side: Side, symbol: &str) -> Result<(), ValidationError> {
        let token = find_token(&self.market.tokens, symbol)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownToken(symbol.to_string()))?;

        if self.state.token(side.opposite()) == Some(&token) {
            return Err(ValidationError::SameToken(token.symbol));
        }

        debug!("Selected {} token {}", side, token.symbol);
        self.state.select(side, token);
        self.errors.remove(&Self::token_field(side));
        self.refresh();
        Ok(())
    }

    /// Tokens the picker for `side` offers
    pub fn picker(&self, side: Side, search: &str) -> Vec<&Token> {
        available_tokens(
            &self.market.tokens,
            self.state.token(side),
            self.state.token(side.opposite()),
            search,
        )
    }

    /// Units of the receive token per send token, [`NO_RATE`] when unknown
    pub fn exchange_rate(&self) -> f64 {
        match (&self.state.from_token, &self.state.to_token) {
            (Some(from), Some(to)) => {
                ExchangeRateCalculator::new(&self.market.catalog).rate(&from.symbol, &to.symbol)
            }
            _ => NO_RATE,
        }
    }

    /// Exchange both sides after the visual delay. Disabled until both
    /// tokens are chosen.
    pub async fn flip(&mut self) -> bool {
        if !self.state.has_both_tokens() {
            return false;
        }
        if !self.swap_delay.is_zero() {
            tokio::time::sleep(self.swap_delay).await;
        }
        self.state.swap();
        self.refresh();
        true
    }

    /// Fill the send amount with the largest value inside the USD limit
    pub fn apply_max(&mut self) -> bool {
        let max = self
            .state
            .from_token
            .as_ref()
            .and_then(|t| t.price)
            .and_then(|price| self.validator.max_amount(price));
        match max {
            Some(max) => {
                self.edit(Side::From, &max);
                true
            }
            None => false,
        }
    }

    pub fn is_amount_over_limit(&self) -> bool {
        self.validator.is_amount_over_limit(&self.state)
    }

    pub fn is_form_valid(&self) -> bool {
        self.status == FeedStatus::Ready && self.validator.is_form_valid(&self.state)
    }

    /// Validate and hand the form to the submitter. Returns `None` when
    /// validation blocked the submission; field errors are then available
    /// through [`Self::errors`].
    pub async fn submit(&mut self, submitter: &dyn SwapSubmitter) -> Option<&SubmitResult> {
        self.errors = self.validator.validate(&self.state);
        if !self.errors.is_empty() {
            info!("Submission blocked by {} validation error(s)", self.errors.len());
            return None;
        }

        let result = submitter.submit(&self.state).await;
        info!(success = result.success, "{}", result.message);
        self.submit_result = Some(result);
        self.submit_result.as_ref()
    }

    /// Start over with empty amounts and the default pair
    pub fn reset(&mut self) {
        self.state.reset();
        self.errors.clear();
        self.submit_result = None;
        self.select_default_pair();
    }

    pub fn rate_line(&self) -> Option<String> {
        let from = self.state.from_token.as_ref()?;
        let to = self.state.to_token.as_ref()?;
        format_rate(&from.symbol, &to.symbol, self.exchange_rate())
    }

    pub fn usd_value(&self, side: Side) -> Option<String> {
        let token = self.state.token(side)?;
        format_usd_value(self.state.amount(side), token.price)
    }

    pub fn price_line(&self, side: Side) -> Option<String> {
        self.state.token(side)?.price.map(format_price)
    }

    fn select_default_pair(&mut self) {
        if self.state.from_token.is_some() || self.state.to_token.is_some() {
            return;
        }
        let (from, to) = &self.default_pair;
        let from = self.market.tokens.iter().find(|t| &t.symbol == from).cloned();
        let to = self.market.tokens.iter().find(|t| &t.symbol == to).cloned();
        if let (Some(from), Some(to)) = (from, to) {
            info!("Default pair {} -> {}", from.symbol, to.symbol);
            self.state.select_from(from);
            self.state.select_to(to);
        }
    }

    /// Swap selected tokens for their counterparts in the current market so
    /// prices and icons come from the same load as the rates. A side whose
    /// symbol is no longer listed is cleared.
    fn reprice_selection(&mut self) {
        for side in [Side::From, Side::To] {
            let Some(selected) = self.state.token(side) else {
                continue;
            };
            let current = self.market.tokens.iter().find(|t| t.symbol == selected.symbol).cloned();
            if current.is_none() {
                warn!("{} token {} is no longer listed", side, selected.symbol);
            }
            match side {
                Side::From => self.state.from_token = current,
                Side::To => self.state.to_token = current,
            }
        }
    }

    fn refresh(&mut self) {
        let rate = self.exchange_rate();
        self.state.recompute(rate);
    }

    fn token_field(side: Side) -> FormField {
        match side {
            Side::From => FormField::FromToken,
            Side::To => FormField::ToToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::tests::{market_service, StaticFeed};
    use crate::application::submission::SimulatedSubmitter;
    use crate::domain::token::PopularityIndex;
    use std::sync::Arc;

    fn cfg() -> FormCfg {
        FormCfg {
            swap_delay_ms: 0,
            ..FormCfg::default()
        }
    }

    async fn ready_form(prices: Vec<(&'static str, f64, i64)>) -> SwapForm {
        let mut form = SwapForm::new(&cfg());
        assert!(form.load(&market_service(prices)).await);
        form
    }

    fn standard_prices() -> Vec<(&'static str, f64, i64)> {
        vec![("ETH", 2000.0, 1), ("USD", 1.0, 1), ("USDC", 1.0, 1), ("ATOM", 8.0, 1)]
    }

    #[tokio::test]
    async fn test_default_pair_selected_on_load() {
        let form = ready_form(standard_prices()).await;
        assert_eq!(form.status(), &FeedStatus::Ready);
        assert_eq!(form.state().from_token.as_ref().map(|t| t.symbol.as_str()), Some("ETH"));
        assert_eq!(form.state().to_token.as_ref().map(|t| t.symbol.as_str()), Some("USD"));
        assert_eq!(form.rate_line().as_deref(), Some("1 ETH = 2000.00000000 USD"));
    }

    #[tokio::test]
    async fn test_no_default_pair_without_both_tokens() {
        let form = ready_form(vec![("ETH", 2000.0, 1), ("USDC", 1.0, 1)]).await;
        assert!(form.state().from_token.is_none());
        assert!(form.state().to_token.is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_conversion() {
        let mut form = ready_form(standard_prices()).await;
        form.select(Side::To, "USDC").unwrap();

        form.edit(Side::From, "1");
        assert_eq!(form.state().to_amount, "2000");

        form.edit(Side::To, "500");
        assert_eq!(form.state().from_amount, "0.25");
        assert_eq!(form.usd_value(Side::From).as_deref(), Some("≈ $500.00"));
    }

    #[tokio::test]
    async fn test_clearing_without_receive_token() {
        let mut form = ready_form(vec![("ETH", 2000.0, 1), ("USDC", 1.0, 1)]).await;
        form.select(Side::From, "ETH").unwrap();
        form.edit(Side::From, "5");
        assert_eq!(form.state().to_amount, "");
        form.edit(Side::From, "");
        assert_eq!(form.state().to_amount, "");
        assert_eq!(form.exchange_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_token_change_recomputes() {
        let mut form = ready_form(standard_prices()).await;
        form.edit(Side::From, "2");
        assert_eq!(form.state().to_amount, "4000");
        form.select(Side::From, "ATOM").unwrap();
        assert_eq!(form.state().to_amount, "16");
    }

    #[tokio::test]
    async fn test_select_rejects_unknown_and_duplicate() {
        let mut form = ready_form(standard_prices()).await;
        assert_eq!(
            form.select(Side::From, "DOGE"),
            Err(ValidationError::UnknownToken("DOGE".to_string()))
        );
        assert_eq!(
            form.select(Side::To, "ETH"),
            Err(ValidationError::SameToken("ETH".to_string()))
        );
        assert_eq!(form.state().to_token.as_ref().map(|t| t.symbol.as_str()), Some("USD"));
    }

    #[tokio::test]
    async fn test_picker_excludes_selected() {
        let form = ready_form(standard_prices()).await;
        let offered: Vec<&str> = form.picker(Side::From, "").iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(offered, vec!["ATOM", "USDC"]);
    }

    #[tokio::test]
    async fn test_flip() {
        let mut form = ready_form(standard_prices()).await;
        form.edit(Side::From, "1");
        assert!(form.flip().await);
        let state = form.state();
        assert_eq!(state.from_token.as_ref().map(|t| t.symbol.as_str()), Some("USD"));
        assert_eq!(state.from_amount, "2000");
        assert_eq!(state.to_amount, "1");
        assert_eq!(state.last_edited, Some(Side::To));

        assert!(form.flip().await);
        assert_eq!(form.state().from_amount, "1");
        assert_eq!(form.state().to_amount, "2000");
        assert_eq!(form.state().last_edited, Some(Side::From));
    }

    #[tokio::test]
    async fn test_flip_disabled_without_tokens() {
        let mut form = SwapForm::new(&cfg());
        form.edit(Side::From, "1");
        assert!(!form.flip().await);
        assert_eq!(form.state().from_amount, "1");
    }

    #[tokio::test]
    async fn test_apply_max() {
        let mut form = ready_form(standard_prices()).await;
        assert!(form.apply_max());
        assert_eq!(form.state().from_amount, "500");
        assert_eq!(form.state().to_amount, "1000000");
        assert!(!form.is_amount_over_limit());
        form.edit(Side::From, "500.1");
        assert!(form.is_amount_over_limit());
    }

    #[tokio::test]
    async fn test_submit_blocked_by_validation() {
        let mut form = ready_form(standard_prices()).await;
        let submitter = SimulatedSubmitter::succeeding();
        assert!(form.submit(&submitter).await.is_none());
        assert_eq!(form.errors().get(&FormField::FromAmount), Some(&ValidationError::InvalidAmount));

        form.edit(Side::From, "1");
        assert!(form.errors().get(&FormField::FromAmount).is_none());
        let result = form.submit(&submitter).await.cloned().unwrap();
        assert!(result.success);
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_is_reported() {
        let mut form = ready_form(standard_prices()).await;
        form.edit(Side::From, "1");
        let result = form.submit(&SimulatedSubmitter::failing()).await.cloned().unwrap();
        assert!(!result.success);
        assert_eq!(form.submit_result(), Some(&result));
    }

    #[tokio::test]
    async fn test_feed_failure_then_retry() {
        let mut form = SwapForm::new(&cfg());
        let failing = MarketDataService::new(
            Arc::new(StaticFeed { result: Err(503) }),
            PopularityIndex::default(),
        );
        assert!(!form.load(&failing).await);
        assert_eq!(form.status(), &FeedStatus::Failed("HTTP error! status: 503".to_string()));
        assert!(!form.is_form_valid());

        assert!(form.load(&market_service(standard_prices())).await);
        assert_eq!(form.status(), &FeedStatus::Ready);
    }

    #[tokio::test]
    async fn test_reset_restores_default_pair() {
        let mut form = ready_form(standard_prices()).await;
        form.select(Side::From, "ATOM").unwrap();
        form.edit(Side::From, "3");
        form.reset();
        assert_eq!(form.state().from_amount, "");
        assert_eq!(form.state().last_edited, None);
        assert_eq!(form.state().from_token.as_ref().map(|t| t.symbol.as_str()), Some("ETH"));
    }

    #[tokio::test]
    async fn test_reload_reprices_selected_tokens() {
        let mut form = ready_form(vec![("ETH", 2000.0, 1), ("USD", 1.0, 1)]).await;
        form.edit(Side::From, "600");
        assert_eq!(form.state().to_amount, "1200000");
        assert!(form.is_amount_over_limit());

        assert!(form.load(&market_service(vec![("ETH", 1000.0, 2), ("USD", 1.0, 2)])).await);
        let from = form.state().from_token.clone().unwrap();
        assert_eq!(from.price, Some(1000.0));
        assert_eq!(form.state().to_amount, "600000");
        assert_eq!(form.usd_value(Side::From).as_deref(), Some("≈ $600 000.00"));
        assert!(!form.is_amount_over_limit());
        assert!(form.is_form_valid());
    }

    #[tokio::test]
    async fn test_reload_clears_delisted_token() {
        let mut form = ready_form(standard_prices()).await;
        form.select(Side::To, "ATOM").unwrap();
        form.edit(Side::From, "1");

        assert!(form.load(&market_service(vec![("ETH", 2000.0, 2), ("USD", 1.0, 2)])).await);
        assert_eq!(form.state().from_token.as_ref().map(|t| t.symbol.as_str()), Some("ETH"));
        assert!(form.state().to_token.is_none());
        assert_eq!(form.exchange_rate(), 0.0);
    }
}
