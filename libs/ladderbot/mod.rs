//! Ladder Market-Making Bot
//!
//! Reconciles a desired ladder of offers against the live book of an
//! exchange, one side at a time, with tolerance bands to suppress churn.

pub mod application;
pub mod infrastructure;

// Re-export commonly used items
pub use application::strategies::ladder_mm::{
    CapacityCaps, CycleError, CycleSummary, LadderMMConfig, LadderStrategy, Level, LevelProvider,
    LevelsError, LiveOffer, MutationIntent, OfferReconciler, Price, PriceError, ReconcileError,
    RungSpec, Side, StaticSpreadLevels,
};
pub use application::strategies::SideStrategy;
pub use infrastructure::{
    init_tracing, Balances, BotConfig, ConfigError, ExchangeClient, ExchangeError, FeedConfig,
    FeedError, FixedPriceFeed, Heartbeat, PaperConfig, PaperExchange, PriceFeed, RestPriceFeed,
    ShutdownManager, SubmitReceipt,
};
