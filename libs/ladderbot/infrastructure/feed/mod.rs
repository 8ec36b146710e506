//! Center price feeds.

use async_trait::async_trait;
use thiserror::Error;

mod fixed;
mod rest;

pub use fixed::FixedPriceFeed;
pub use rest::RestPriceFeed;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("price request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("price response has no field at {0:?}")]
    MissingField(String),

    #[error("price response field {0:?} is not a number")]
    NotANumber(String),

    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

/// Source of the center price the ladder is built around.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn get_center_price(&self) -> Result<f64, FeedError>;
}
