//! Side of the book a ladder quotes.

use super::level::CapacityCaps;
use super::price::Price;

/// Which side of the book a ladder instance works.
///
/// The reconciliation algorithm is identical for both sides; the side only
/// supplies the favorability comparator and the capacity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Sell,
    Buy,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Sell => Side::Buy,
            Side::Buy => Side::Sell,
        }
    }

    /// True when `candidate` is a more favorable top-of-book price than
    /// `incumbent`: the lowest ask wins a sell ladder, the highest bid wins
    /// a buy ladder.
    pub fn favors(&self, candidate: Price, incumbent: Price) -> bool {
        match self {
            Side::Sell => candidate < incumbent,
            Side::Buy => candidate > incumbent,
        }
    }

    /// Base-denominated amount cap for one level.
    ///
    /// A sell ladder commits base inventory directly; a buy ladder commits
    /// quote inventory, so the cap is price-weighted.
    pub fn capacity(&self, caps: CapacityCaps, target_price: f64) -> f64 {
        match self {
            Side::Sell => caps.max_base,
            Side::Buy => caps.max_quote / target_price,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Sell => write!(f, "SELL"),
            Side::Buy => write!(f, "BUY"),
        }
    }
}
