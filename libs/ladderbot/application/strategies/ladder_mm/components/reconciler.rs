//! Offer reconciliation.
//!
//! Diffs the live book against the desired ladder and emits the minimal set
//! of create/modify/delete intents that converges them. Tolerance bands keep
//! offers that are close enough untouched so the book does not churn on every
//! small move of the center price.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::levels::{LevelProvider, LevelsError};
use crate::application::strategies::ladder_mm::types::{
    CapacityCaps, Level, LiveOffer, MutationIntent, Price, PriceError, Side,
};
use crate::application::strategies::traits::SideStrategy;
use crate::infrastructure::feed::{FeedError, PriceFeed};

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The center price could not be obtained; the cycle aborts before any
    /// ladder or intents are computed.
    #[error("center price unavailable: {0}")]
    FeedUnavailable(#[source] FeedError),

    /// The ladder could not be computed from the center price.
    #[error("ladder levels unavailable: {0}")]
    LevelsUnavailable(#[source] LevelsError),

    /// An intent price cannot be represented at the exchange's precision;
    /// the whole `update_with_ops` batch is discarded.
    #[error(transparent)]
    PriceRepresentation(#[from] PriceError),
}

/// Reconciles one side of the book against its desired ladder.
///
/// Collaborators are injected at construction; the per-cycle state
/// (`center_price`, `current_levels`, `caps`) is owned exclusively by this
/// instance and rebuilt on every `pre_update`.
pub struct OfferReconciler<F: PriceFeed, L: LevelProvider> {
    side: Side,
    feed: Arc<F>,
    levels: L,
    price_tolerance: f64,
    amount_tolerance: f64,
    divide_amount_by_price: bool,

    // Cycle-scoped state, valid only between pre_update and post_update.
    center_price: f64,
    current_levels: Vec<Level>,
    caps: CapacityCaps,
    cycles_completed: u64,
}

impl<F: PriceFeed, L: LevelProvider> OfferReconciler<F, L> {
    pub fn new(
        side: Side,
        feed: Arc<F>,
        levels: L,
        price_tolerance: f64,
        amount_tolerance: f64,
        divide_amount_by_price: bool,
    ) -> Self {
        Self {
            side,
            feed,
            levels,
            price_tolerance,
            amount_tolerance,
            divide_amount_by_price,
            center_price: 0.0,
            current_levels: Vec::new(),
            caps: CapacityCaps::default(),
            cycles_completed: 0,
        }
    }

    /// Ladder depth for the current cycle.
    pub fn ladder_depth(&self) -> usize {
        self.current_levels.len()
    }

    pub fn center_price(&self) -> f64 {
        self.center_price
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// Per-level decision: create when no live offer exists at this depth,
    /// modify when the live offer fell out of its tolerance bands, otherwise
    /// leave the book alone.
    fn update_level(&self, offers: &[LiveOffer], index: usize) -> Option<MutationIntent> {
        let level = &self.current_levels[index];
        let target_price = level.target_price;
        let mut target_amount = level.target_amount;
        if self.divide_amount_by_price {
            // Ladder amounts are quoted in the quote currency; convert to
            // base units before capping and comparing.
            target_amount /= target_price;
        }
        target_amount = target_amount.min(self.side.capacity(self.caps, target_price));

        let Some(offer) = offers.get(index) else {
            debug!(
                "[{}] create level {}: price={} amount={}",
                self.side, index, target_price, target_amount
            );
            return Some(MutationIntent::Create {
                price: target_price,
                amount: target_amount,
            });
        };

        let highest_price = target_price + target_price * self.price_tolerance;
        let lowest_price = target_price - target_price * self.price_tolerance;
        let max_amount = target_amount + target_amount * self.amount_tolerance;
        let min_amount = target_amount - target_amount * self.amount_tolerance;

        // Band boundaries count as in tolerance; only a value strictly
        // outside triggers a change.
        let price_outside = offer.price > highest_price || offer.price < lowest_price;
        let amount_outside = offer.amount > max_amount || offer.amount < min_amount;
        if price_outside || amount_outside {
            debug!(
                "[{}] modify level {}: live=({}, {}) bands=[{}, {}]x[{}, {}]",
                self.side,
                index,
                offer.price,
                offer.amount,
                lowest_price,
                highest_price,
                min_amount,
                max_amount
            );
            return Some(MutationIntent::Modify {
                offer: offer.clone(),
                price: target_price,
                amount: target_amount,
            });
        }
        None
    }
}

#[async_trait]
impl<F: PriceFeed, L: LevelProvider> SideStrategy for OfferReconciler<F, L> {
    fn side(&self) -> Side {
        self.side
    }

    async fn pre_update(&mut self, max_base: f64, max_quote: f64) -> Result<(), ReconcileError> {
        let center = self
            .feed
            .get_center_price()
            .await
            .map_err(ReconcileError::FeedUnavailable)?;

        let levels = self
            .levels
            .get_levels(center)
            .map_err(ReconcileError::LevelsUnavailable)?;

        // Cycle state only sticks once both collaborators have answered.
        self.center_price = center;
        self.current_levels = levels;
        self.caps = CapacityCaps::new(max_base, max_quote);

        debug!(
            "[{}] cycle start: center={} depth={} caps=({}, {})",
            self.side,
            self.center_price,
            self.current_levels.len(),
            max_base,
            max_quote
        );
        Ok(())
    }

    fn prune_existing_offers(
        &self,
        offers: &[LiveOffer],
    ) -> (Vec<MutationIntent>, Vec<LiveOffer>) {
        let depth = self.current_levels.len().min(offers.len());
        let prune_ops: Vec<MutationIntent> = offers[depth..]
            .iter()
            .map(|offer| MutationIntent::Delete {
                offer: offer.clone(),
            })
            .collect();
        if !prune_ops.is_empty() {
            debug!(
                "[{}] pruning {} offers beyond ladder depth {}",
                self.side,
                prune_ops.len(),
                self.current_levels.len()
            );
        }
        (prune_ops, offers[..depth].to_vec())
    }

    fn update_with_ops(
        &self,
        offers: &[LiveOffer],
    ) -> Result<(Vec<MutationIntent>, Option<Price>), ReconcileError> {
        let mut ops = Vec::new();
        let mut top_price: Option<Price> = None;

        for index in (0..self.current_levels.len()).rev() {
            let Some(intent) = self.update_level(offers, index) else {
                continue;
            };
            if let Some(raw) = intent.price() {
                // A price the exchange cannot represent poisons the whole
                // batch: the error discards every intent collected so far.
                let price = Price::try_from_f64(raw)?;
                let better = top_price.map_or(true, |best| self.side.favors(price, best));
                if better {
                    top_price = Some(price);
                }
            }
            ops.push(intent);
        }
        Ok((ops, top_price))
    }

    fn post_update(&mut self) -> Result<(), ReconcileError> {
        self.cycles_completed += 1;
        Ok(())
    }
}
