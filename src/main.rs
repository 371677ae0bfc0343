use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use token_swap::app::{self, AppCfg};
use token_swap::application::Cli;
use token_swap::shared::config::{ConfigLoader, DEFAULT_CONFIG_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Priority: CLI args > Config file > Defaults
    let config_path = ConfigLoader::locate(args.config.as_deref());
    let base_config = ConfigLoader::load(config_path.as_deref())?;
    let app_cfg = AppCfg::from_config(base_config).with_overrides(
        args.prices_url,
        args.max_amount_usd,
        args.log_level,
    )?;

    // RUST_LOG wins when set; logs go to stderr so the form stays readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_cfg.config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No {} found, using defaults", DEFAULT_CONFIG_FILE),
    }

    app::run(app_cfg, args.command).await
}
