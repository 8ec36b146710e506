//! Live offers observed on the exchange.

/// A currently resting order on the exchange's book.
///
/// The exchange returns offers in the same depth ordering as the ladder, so
/// position `i` in the live list corresponds to ladder rung `i`. The
/// reconciler only reads these; all mutation happens through intents.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOffer {
    /// Opaque exchange-assigned identifier.
    pub offer_id: String,
    pub price: f64,
    pub amount: f64,
}

impl LiveOffer {
    pub fn new(offer_id: impl Into<String>, price: f64, amount: f64) -> Self {
        Self {
            offer_id: offer_id.into(),
            price,
            amount,
        }
    }
}
