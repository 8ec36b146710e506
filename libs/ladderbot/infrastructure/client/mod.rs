//! Exchange client contract.
//!
//! The reconciler never talks to the exchange; it returns intents to the
//! cycle runner, which submits them here as one batch per side per cycle.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::strategies::ladder_mm::types::{LiveOffer, MutationIntent, Side};

pub mod paper;

pub use paper::PaperExchange;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("unknown offer id: {0}")]
    UnknownOffer(String),

    #[error("exchange rejected batch: {0}")]
    Rejected(String),

    #[error("exchange unavailable: {0}")]
    Unavailable(String),
}

/// Account balances available to the strategy this cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balances {
    pub base: f64,
    pub quote: f64,
}

/// Counts for one accepted batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubmitReceipt {
    pub created: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl SubmitReceipt {
    pub fn total(&self) -> usize {
        self.created + self.modified + self.deleted
    }
}

/// Venue executing mutation intents.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Live offers for one side, in ladder depth order (position 0 nearest
    /// the center price).
    async fn open_offers(&self, side: Side) -> Result<Vec<LiveOffer>, ExchangeError>;

    async fn balances(&self) -> Result<Balances, ExchangeError>;

    /// Apply a batch atomically: either every intent lands or none do.
    async fn submit(
        &self,
        side: Side,
        intents: Vec<MutationIntent>,
    ) -> Result<SubmitReceipt, ExchangeError>;
}
