//! HTTP JSON price feed.

use async_trait::async_trait;
use serde_json::Value;

use super::{FeedError, PriceFeed};

/// Reads the center price from a JSON REST endpoint.
///
/// The response is navigated with a JSON pointer, so any endpoint that
/// exposes a numeric (or numeric-string) field works, e.g.
/// `https://api.exchange.test/ticker` with pointer `/data/last_price`.
pub struct RestPriceFeed {
    client: reqwest::Client,
    url: String,
    pointer: String,
}

impl RestPriceFeed {
    pub fn new(url: impl Into<String>, pointer: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            pointer: pointer.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceFeed for RestPriceFeed {
    async fn get_center_price(&self) -> Result<f64, FeedError> {
        let body: Value = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let field = body
            .pointer(&self.pointer)
            .ok_or_else(|| FeedError::MissingField(self.pointer.clone()))?;

        // Some venues serialize prices as strings.
        field
            .as_f64()
            .or_else(|| field.as_str().and_then(|s| s.parse().ok()))
            .ok_or_else(|| FeedError::NotANumber(self.pointer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_extraction() {
        let body: Value =
            serde_json::from_str(r#"{"data": {"last_price": "101.25", "volume": 3}}"#).unwrap();

        let field = body.pointer("/data/last_price").unwrap();
        let price = field
            .as_f64()
            .or_else(|| field.as_str().and_then(|s| s.parse().ok()))
            .unwrap();
        assert_eq!(price, 101.25);

        assert!(body.pointer("/data/missing").is_none());
    }
}
