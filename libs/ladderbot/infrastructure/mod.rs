//! Infrastructure: exchange clients, price feeds, config, process plumbing.

pub mod client;
pub mod config;
pub mod feed;
pub mod heartbeat;
pub mod logging;
pub mod shutdown;

pub use client::{Balances, ExchangeClient, ExchangeError, PaperExchange, SubmitReceipt};
pub use config::{BotConfig, ConfigError, FeedConfig, PaperConfig};
pub use feed::{FeedError, FixedPriceFeed, PriceFeed, RestPriceFeed};
pub use heartbeat::Heartbeat;
pub use logging::init_tracing;
pub use shutdown::ShutdownManager;
