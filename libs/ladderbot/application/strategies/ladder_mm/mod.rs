//! Ladder MM Strategy
//!
//! One-sided ladder market making: each cycle rebuilds the desired
//! price/amount ladder from a center price and reconciles the live book
//! toward it with the minimal set of mutations.

mod config;
mod strategy;
pub mod components;
pub mod types;

// Re-exports for convenience
pub use config::LadderMMConfig;
pub use strategy::{CycleError, CycleSummary, LadderStrategy};
pub use components::{
    LevelProvider, LevelsError, OfferReconciler, ReconcileError, RungSpec, StaticSpreadLevels,
};
pub use types::{CapacityCaps, Level, LiveOffer, MutationIntent, Price, PriceError, Side};
