//! Bot configuration loading and validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::application::strategies::ladder_mm::LadderMMConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub feed: FeedConfig,
    pub ladder: LadderMMConfig,
    pub paper: PaperConfig,
}

/// Where the center price comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedConfig {
    /// Constant price, useful for paper trading.
    Fixed { price: f64 },
    /// JSON REST endpoint; `pointer` is a JSON pointer to the price field.
    Rest { url: String, pointer: String },
}

/// Starting balances for the paper exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperConfig {
    pub base_balance: f64,
    pub quote_balance: f64,
}

impl BotConfig {
    /// Load configuration from a YAML file, applying environment overrides.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config: BotConfig = serde_yaml::from_str(&yaml_content)?;

        // A REST feed URL can be swapped without editing the file.
        if let FeedConfig::Rest { url, .. } = &mut config.feed {
            if let Ok(override_url) = std::env::var("LADDERBOT_FEED_URL") {
                info!("Feed URL overridden from LADDERBOT_FEED_URL");
                *url = override_url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ladder = &self.ladder;

        for (name, tolerance) in [
            ("price_tolerance", ladder.price_tolerance),
            ("amount_tolerance", ladder.amount_tolerance),
        ] {
            if !(0.0..1.0).contains(&tolerance) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be in [0, 1), got {}",
                    name, tolerance
                )));
            }
        }

        if ladder.tick_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "tick_interval_secs must be positive".to_string(),
            ));
        }

        if ladder.sell_rungs.is_empty() && ladder.buy_rungs.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one side needs ladder rungs".to_string(),
            ));
        }

        for (side, rungs) in [("sell", &ladder.sell_rungs), ("buy", &ladder.buy_rungs)] {
            for (i, rung) in rungs.iter().enumerate() {
                if !rung.spread.is_finite() || rung.spread < 0.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "{}_rungs[{}].spread must be a non-negative fraction, got {}",
                        side, i, rung.spread
                    )));
                }
                if side == "buy" && rung.spread >= 1.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "buy_rungs[{}].spread {} would push the price at or below zero",
                        i, rung.spread
                    )));
                }
                if !(rung.amount > 0.0) {
                    return Err(ConfigError::ValidationError(format!(
                        "{}_rungs[{}].amount must be positive, got {}",
                        side, i, rung.amount
                    )));
                }
            }
        }

        if let FeedConfig::Fixed { price } = &self.feed {
            if !(*price > 0.0) || !price.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "fixed feed price must be positive, got {}",
                    price
                )));
            }
        }

        if self.paper.base_balance < 0.0 || self.paper.quote_balance < 0.0 {
            return Err(ConfigError::ValidationError(
                "paper balances must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
