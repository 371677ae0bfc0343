//! CLI commands and handlers
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::app::AppCfg;
use crate::application::session::Session;
use crate::application::swap_form::SwapForm;
use crate::domain::price::ExchangeRateCalculator;
use crate::domain::swap::{parse_positive_amount, SwapFormState};
use crate::domain::token::find_token;
use crate::shared::errors::{AppError, ValidationError};
use crate::shared::types::Side;
use crate::shared::utils::{format_price, format_rate, format_usd_value};

#[derive(Parser, Debug)]
#[command(name = "token-swap")]
#[command(version, about = "Token swap form with live prices and two-sided amount conversion")]
pub struct Cli {
    /// Path to config file (defaults to ./Config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Prices endpoint (overrides config)
    #[arg(long, global = true)]
    pub prices_url: Option<String>,

    /// Maximum USD value of a single swap (overrides config)
    #[arg(long, global = true)]
    pub max_amount_usd: Option<f64>,

    /// Log level when RUST_LOG is not set (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List tokens with their latest prices
    Prices {
        /// Limit number of tokens to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Also resolve token icons
        #[arg(long)]
        icons: bool,
    },

    /// Show the exchange rate between two tokens
    Rate {
        /// Token to send
        #[arg(long)]
        from: String,

        /// Token to receive
        #[arg(long)]
        to: String,
    },

    /// Convert an amount between two tokens
    Quote {
        /// Token to send
        #[arg(long)]
        from: String,

        /// Token to receive
        #[arg(long)]
        to: String,

        /// Amount as typed into the form
        #[arg(long)]
        amount: String,

        /// Treat the amount as the amount to receive
        #[arg(long)]
        receive: bool,
    },

    /// Interactive swap form on stdin
    Session {
        /// Skip icon lookups
        #[arg(long)]
        no_icons: bool,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub async fn execute(command: Commands, app_cfg: &AppCfg) -> Result<(), AppError> {
        match command {
            Commands::Prices { limit, icons } => Self::execute_prices_command(limit, icons, app_cfg).await,
            Commands::Rate { from, to } => Self::execute_rate_command(&from, &to, app_cfg).await,
            Commands::Quote {
                from,
                to,
                amount,
                receive,
            } => {
                let side = if receive { Side::To } else { Side::From };
                let line = Self::quote(&from, &to, &amount, side, app_cfg).await?;
                println!("{}", line);
                Ok(())
            }
            Commands::Session { no_icons } => Self::execute_session_command(!no_icons, app_cfg).await,
        }
    }

    async fn execute_prices_command(
        limit: Option<usize>,
        icons: bool,
        app_cfg: &AppCfg,
    ) -> Result<(), AppError> {
        let service = app_cfg.market_service(icons)?;
        let market = service.load().await?;

        let shown = limit.unwrap_or(market.tokens.len());
        for token in market.tokens.iter().take(shown) {
            let observed = market
                .catalog
                .observation(&token.symbol)
                .map(|obs| obs.observed_at.to_rfc3339())
                .unwrap_or_default();
            let price = token.price.map(format_price).unwrap_or_default();
            let icon = if !icons {
                ""
            } else if token.icon.is_some() {
                "icon"
            } else {
                "no icon"
            };
            println!("{:<12} {:>22}  {}  {}", token.symbol, price, observed, icon);
        }
        info!("Shown {} of {} tokens", shown.min(market.tokens.len()), market.tokens.len());
        Ok(())
    }

    async fn execute_rate_command(from: &str, to: &str, app_cfg: &AppCfg) -> Result<(), AppError> {
        let catalog = app_cfg.market_service(false)?.load_catalog().await?;
        let rate = ExchangeRateCalculator::new(&catalog).rate(from, to);
        match format_rate(from, to, rate) {
            Some(line) => println!("{}", line),
            None => println!("No rate available for {} -> {}", from, to),
        }
        Ok(())
    }

    /// One-shot conversion through the same state machine the form uses
    pub async fn quote(
        from: &str,
        to: &str,
        amount: &str,
        side: Side,
        app_cfg: &AppCfg,
    ) -> Result<String, AppError> {
        let market = app_cfg.market_service(false)?.load().await?;

        let from_token = find_token(&market.tokens, from)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownToken(from.to_string()))?;
        let to_token = find_token(&market.tokens, to)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownToken(to.to_string()))?;
        if from_token == to_token {
            return Err(ValidationError::SameToken(to_token.symbol).into());
        }

        let rate = ExchangeRateCalculator::new(&market.catalog).rate(&from_token.symbol, &to_token.symbol);
        let mut state = SwapFormState::new();
        state.select_from(from_token);
        state.select_to(to_token);
        state.edit(side, amount);
        if parse_positive_amount(state.amount(side)).is_none() {
            return Err(ValidationError::InvalidAmount.into());
        }
        state.recompute(rate);

        let (Some(from_token), Some(to_token)) = (&state.from_token, &state.to_token) else {
            return Err(AppError::Unknown("token selection lost".to_string()));
        };
        if rate <= 0.0 {
            return Err(ValidationError::NoConversion.into());
        }

        let usd = format_usd_value(&state.from_amount, from_token.price).unwrap_or_default();
        Ok(format!(
            "{} {} = {} {}  {}",
            state.from_amount, from_token.symbol, state.to_amount, to_token.symbol, usd
        )
        .trim_end()
        .to_string())
    }

    async fn execute_session_command(icons: bool, app_cfg: &AppCfg) -> Result<(), AppError> {
        let form = SwapForm::new(&app_cfg.config.form);
        let session = Session::new(form, app_cfg.market_service(icons)?, app_cfg.submitter());
        session
            .run()
            .await
            .map_err(|e| AppError::Unknown(format!("session ended: {:#}", e)))
    }
}
