//! Ladder shape computation.
//!
//! The level provider turns a center price into the desired ladder for one
//! side. It is injected into the reconciler at construction so tests can
//! substitute fakes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::strategies::ladder_mm::types::{Level, Side};

#[derive(Debug, Error)]
pub enum LevelsError {
    #[error("center price {0} is not usable for ladder computation")]
    BadCenterPrice(f64),

    #[error("no ladder rungs configured")]
    EmptyLadder,
}

/// Computes the desired ladder from the center price.
pub trait LevelProvider: Send + Sync {
    fn get_levels(&self, center_price: f64) -> Result<Vec<Level>, LevelsError>;
}

/// One configured rung: fractional distance from center plus quoted amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RungSpec {
    /// Fractional distance from the center price (0.005 = 50 bps).
    pub spread: f64,
    /// Amount quoted at this rung. Base units, or quote units when the
    /// strategy runs in divide-amount-by-price mode.
    pub amount: f64,
}

/// Fixed fractional spreads and amounts taken from configuration.
///
/// Sell rungs sit above the center price, buy rungs below; rung order in the
/// config is depth order (index 0 nearest the center).
#[derive(Debug, Clone)]
pub struct StaticSpreadLevels {
    side: Side,
    rungs: Vec<RungSpec>,
}

impl StaticSpreadLevels {
    pub fn new(side: Side, rungs: Vec<RungSpec>) -> Self {
        Self { side, rungs }
    }
}

impl LevelProvider for StaticSpreadLevels {
    fn get_levels(&self, center_price: f64) -> Result<Vec<Level>, LevelsError> {
        if !center_price.is_finite() || center_price <= 0.0 {
            return Err(LevelsError::BadCenterPrice(center_price));
        }
        if self.rungs.is_empty() {
            return Err(LevelsError::EmptyLadder);
        }
        Ok(self
            .rungs
            .iter()
            .map(|rung| {
                let price = match self.side {
                    Side::Sell => center_price * (1.0 + rung.spread),
                    Side::Buy => center_price * (1.0 - rung.spread),
                };
                Level::new(price, rung.amount)
            })
            .collect())
    }
}
