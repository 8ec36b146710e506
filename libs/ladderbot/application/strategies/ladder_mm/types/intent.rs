//! Mutation intents produced by the reconciler.
//!
//! Intents are pure data. Nothing happens until the caller hands them to an
//! exchange client, which keeps decision-making separate from execution and
//! lets a whole cycle's intents go out as one batch.

use super::offer::LiveOffer;

/// A single requested change to the live book.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationIntent {
    /// Place a new resting offer.
    Create { price: f64, amount: f64 },

    /// Re-price / re-size an existing offer.
    Modify {
        offer: LiveOffer,
        price: f64,
        amount: f64,
    },

    /// Cancel an existing offer.
    Delete { offer: LiveOffer },
}

impl MutationIntent {
    /// The outgoing price this intent would put on the book, if any.
    /// `Delete` removes liquidity and has no outgoing price.
    pub fn price(&self) -> Option<f64> {
        match self {
            MutationIntent::Create { price, .. } => Some(*price),
            MutationIntent::Modify { price, .. } => Some(*price),
            MutationIntent::Delete { .. } => None,
        }
    }

    /// Short tag for logging.
    pub fn description(&self) -> &'static str {
        match self {
            MutationIntent::Create { .. } => "create",
            MutationIntent::Modify { .. } => "modify",
            MutationIntent::Delete { .. } => "delete",
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, MutationIntent::Delete { .. })
    }
}
