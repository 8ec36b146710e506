//! Side strategy contract.
//!
//! One instance reconciles one side of the book. A cycle calls the four
//! methods strictly in order: `pre_update`, `prune_existing_offers`,
//! `update_with_ops`, `post_update`. One caller, once per cycle,
//! synchronously; nothing here is reentrant.

use async_trait::async_trait;

use crate::application::strategies::ladder_mm::components::reconciler::ReconcileError;
use crate::application::strategies::ladder_mm::types::{LiveOffer, MutationIntent, Price, Side};

/// Capability interface for one reconciled book side.
#[async_trait]
pub trait SideStrategy: Send + Sync {
    /// The side this instance quotes.
    fn side(&self) -> Side;

    /// Start a cycle: fetch the center price, recompute the ladder and store
    /// the capacity caps. Must succeed before any other method is called in
    /// the same cycle; on failure the cycle produces no intents.
    async fn pre_update(&mut self, max_base: f64, max_quote: f64) -> Result<(), ReconcileError>;

    /// Cancel live offers deeper than the current ladder and return the
    /// trimmed list to diff against. Runs after `pre_update`.
    fn prune_existing_offers(
        &self,
        offers: &[LiveOffer],
    ) -> (Vec<MutationIntent>, Vec<LiveOffer>);

    /// Diff the (pruned) live offers against the ladder. Returns the mutation
    /// intents in deepest-first order plus the most favorable price among
    /// them, or an error that discards the whole batch.
    fn update_with_ops(
        &self,
        offers: &[LiveOffer],
    ) -> Result<(Vec<MutationIntent>, Option<Price>), ReconcileError>;

    /// Cycle-end hook; must be called every cycle.
    fn post_update(&mut self) -> Result<(), ReconcileError>;
}
