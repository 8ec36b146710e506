//! Constant price feed for tests and paper trading.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{FeedError, PriceFeed};

/// Serves a fixed center price. The price can be moved at runtime, which is
/// how paper-trading sessions and tests simulate market drift.
pub struct FixedPriceFeed {
    price: RwLock<f64>,
}

impl FixedPriceFeed {
    pub fn new(price: f64) -> Self {
        Self {
            price: RwLock::new(price),
        }
    }

    pub fn set_price(&self, price: f64) {
        *self.price.write() = price;
    }
}

#[async_trait]
impl PriceFeed for FixedPriceFeed {
    async fn get_center_price(&self) -> Result<f64, FeedError> {
        Ok(*self.price.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_price() {
        let feed = FixedPriceFeed::new(1.05);
        assert_eq!(feed.get_center_price().await.unwrap(), 1.05);

        feed.set_price(1.10);
        assert_eq!(feed.get_center_price().await.unwrap(), 1.10);
    }
}
