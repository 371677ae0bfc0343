// src/app.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::application::commands::{CommandExecutor, Commands};
use crate::application::services::MarketDataService;
use crate::application::submission::{SimulatedSubmitter, SwapSubmitter};
use crate::config::Config;
use crate::domain::token::PopularityIndex;
use crate::infrastructure::{HttpIconSource, HttpPriceFeed};
use crate::shared::errors::AppError;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config: Config,
}

impl AppCfg {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// CLI values win over whatever the config file said
    pub fn with_overrides(
        mut self,
        prices_url: Option<String>,
        max_amount_usd: Option<f64>,
        log_level: Option<String>,
    ) -> Result<Self, AppError> {
        if let Some(url) = prices_url {
            self.config.feed.prices_url = url;
        }
        if let Some(max) = max_amount_usd {
            if !max.is_finite() || max <= 0.0 {
                return Err(AppError::ConfigError(format!(
                    "max amount must be a positive number, got {}",
                    max
                )));
            }
            self.config.form.max_amount_usd = max;
        }
        if let Some(level) = log_level {
            self.config.log_level = level;
        }
        Ok(self)
    }

    /// Price feed wired to the configured endpoint, with icons on request
    pub fn market_service(&self, with_icons: bool) -> Result<MarketDataService, AppError> {
        let feed_cfg = &self.config.feed;
        let timeout = self.config.feed_timeout();
        let feed = HttpPriceFeed::new(feed_cfg.prices_url.clone(), timeout)?;
        let popularity = PopularityIndex::new(self.config.form.popular_symbols.iter());

        let service = MarketDataService::new(Arc::new(feed), popularity);
        if !with_icons {
            return Ok(service);
        }
        let icons = HttpIconSource::new(feed_cfg.icons_base_url.clone(), timeout)?;
        Ok(service.with_icons(Arc::new(icons)))
    }

    pub fn submitter(&self) -> Arc<dyn SwapSubmitter> {
        Arc::new(SimulatedSubmitter::from_config(&self.config.submission))
    }
}

pub async fn run(app_cfg: AppCfg, command: Commands) -> Result<()> {
    info!("Prices feed: {}", app_cfg.config.feed.prices_url);
    info!(
        "Max swap value: ${}, flip delay: {}ms",
        app_cfg.config.form.max_amount_usd, app_cfg.config.form.swap_delay_ms
    );

    CommandExecutor::execute(command, &app_cfg).await?;
    Ok(())
}
