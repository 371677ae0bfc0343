use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

pub const DEFAULT_PRICES_URL: &str = "https://interview.switcheo.com/prices.json";
pub const DEFAULT_ICONS_BASE_URL: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedCfg {
    pub prices_url: String,
    pub icons_base_url: String,
    pub timeout_ms: u64,
}

impl Default for FeedCfg {
    fn default() -> Self {
        Self {
            prices_url: DEFAULT_PRICES_URL.to_string(),
            icons_base_url: DEFAULT_ICONS_BASE_URL.to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormCfg {
    pub max_amount_usd: f64,
    pub swap_delay_ms: u64,
    pub default_from: String,
    pub default_to: String,
    /// Symbols listed first in token pickers, most popular first
    pub popular_symbols: Vec<String>,
}

impl Default for FormCfg {
    fn default() -> Self {
        Self {
            max_amount_usd: 1_000_000.0,
            swap_delay_ms: 500,
            default_from: "ETH".to_string(),
            default_to: "USD".to_string(),
            popular_symbols: [
                "ETH", "USD", "USDC", "WBTC", "ATOM", "OSMO", "BUSD", "LUNA", "EVMOS", "SWTH",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    Simulate,
    Fail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubmissionCfg {
    pub mode: SubmissionMode,
    pub delay_ms: u64,
}

impl Default for SubmissionCfg {
    fn default() -> Self {
        Self {
            mode: SubmissionMode::Simulate,
            delay_ms: 1_500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub feed: FeedCfg,
    pub form: FormCfg,
    pub submission: SubmissionCfg,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            feed: FeedCfg::default(),
            form: FormCfg::default(),
            submission: SubmissionCfg::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::parse(&s)
    }

    pub fn parse(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse Config.toml")?;
        Ok(cfg)
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_millis(self.feed.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.feed.prices_url, DEFAULT_PRICES_URL);
        assert_eq!(cfg.form.max_amount_usd, 1_000_000.0);
        assert_eq!(cfg.form.swap_delay_ms, 500);
        assert_eq!(cfg.feed_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.submission.mode, SubmissionMode::Simulate);
    }

    #[test]
    fn test_partial_sections() {
        let cfg = Config::parse(
            r#"
            log_level = "debug"

            [form]
            max_amount_usd = 5000.0
            default_to = "USDC"

            [submission]
            mode = "fail"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.form.max_amount_usd, 5000.0);
        assert_eq!(cfg.form.default_from, "ETH");
        assert_eq!(cfg.form.default_to, "USDC");
        assert_eq!(cfg.submission.mode, SubmissionMode::Fail);
        assert_eq!(cfg.submission.delay_ms, 1_500);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\nprices_url = \"http://localhost:8080/prices.json\"").unwrap();
        let cfg = Config::from_file(file.path()).unwrap();
        assert_eq!(cfg.feed.prices_url, "http://localhost:8080/prices.json");
        assert_eq!(cfg.feed.icons_base_url, DEFAULT_ICONS_BASE_URL);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Config::parse("[submission]\nmode = \"maybe\"").is_err());
    }
}
