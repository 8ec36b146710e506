//! Configuration for the ladder MM strategy.

use serde::{Deserialize, Serialize};

use super::components::levels::RungSpec;
use super::types::Side;

/// Ladder shape and reconciliation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadderMMConfig {
    /// Fractional price band within which a live offer is left alone.
    pub price_tolerance: f64,

    /// Fractional amount band within which a live offer is left alone.
    pub amount_tolerance: f64,

    /// Treat rung amounts as quote-currency amounts and convert to base
    /// units at the rung price.
    #[serde(default)]
    pub divide_amount_by_price: bool,

    /// Seconds between reconciliation cycles.
    pub tick_interval_secs: u64,

    /// Sell-side rungs, nearest the center first. Empty disables the side.
    #[serde(default)]
    pub sell_rungs: Vec<RungSpec>,

    /// Buy-side rungs, nearest the center first. Empty disables the side.
    #[serde(default)]
    pub buy_rungs: Vec<RungSpec>,
}

impl LadderMMConfig {
    pub fn rungs_for(&self, side: Side) -> &[RungSpec] {
        match side {
            Side::Sell => &self.sell_rungs,
            Side::Buy => &self.buy_rungs,
        }
    }

    /// Sides that have at least one configured rung.
    pub fn enabled_sides(&self) -> Vec<Side> {
        [Side::Sell, Side::Buy]
            .into_iter()
            .filter(|side| !self.rungs_for(*side).is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(sell: usize, buy: usize) -> LadderMMConfig {
        let rung = RungSpec {
            spread: 0.002,
            amount: 100.0,
        };
        LadderMMConfig {
            price_tolerance: 0.01,
            amount_tolerance: 0.01,
            divide_amount_by_price: false,
            tick_interval_secs: 5,
            sell_rungs: vec![rung; sell],
            buy_rungs: vec![rung; buy],
        }
    }

    #[test]
    fn test_enabled_sides() {
        assert_eq!(config(2, 1).enabled_sides(), vec![Side::Sell, Side::Buy]);
        assert_eq!(config(2, 0).enabled_sides(), vec![Side::Sell]);
        assert_eq!(config(0, 3).enabled_sides(), vec![Side::Buy]);
        assert!(config(0, 0).enabled_sides().is_empty());
    }

    #[test]
    fn test_rungs_for_side() {
        let config = config(2, 1);
        assert_eq!(config.rungs_for(Side::Sell).len(), 2);
        assert_eq!(config.rungs_for(Side::Buy).len(), 1);
    }
}
