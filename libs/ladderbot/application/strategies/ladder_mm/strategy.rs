//! Ladder MM strategy - per-cycle orchestration and run loop.
//!
//! Drives each configured side through one reconciliation cycle per tick:
//! `pre_update` → prune → diff → submit → `post_update`. A failure anywhere
//! in a cycle means nothing is submitted for that cycle; the run loop logs it
//! and waits for the next tick. Retry and backoff policy belongs to whoever
//! schedules the bot, not here.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::components::levels::StaticSpreadLevels;
use super::components::reconciler::{OfferReconciler, ReconcileError};
use super::config::LadderMMConfig;
use super::types::{Price, Side};
use crate::application::strategies::traits::SideStrategy;
use crate::infrastructure::client::{ExchangeClient, ExchangeError, SubmitReceipt};
use crate::infrastructure::feed::PriceFeed;
use crate::infrastructure::heartbeat::Heartbeat;
use crate::infrastructure::shutdown::ShutdownManager;

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// What one cycle did, for logging and tests.
#[derive(Debug, Clone, Default)]
pub struct CycleSummary {
    pub receipt: SubmitReceipt,
    /// Most favorable intent price per side, where intents were issued.
    pub top_prices: Vec<(Side, Price)>,
}

/// Owns one reconciler per enabled side and runs the cycle loop.
pub struct LadderStrategy<X: ExchangeClient> {
    client: Arc<X>,
    sides: Vec<Box<dyn SideStrategy>>,
    tick_interval: Duration,
    cycles_run: u64,
}

impl<X: ExchangeClient> LadderStrategy<X> {
    pub fn new(
        client: Arc<X>,
        sides: Vec<Box<dyn SideStrategy>>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            client,
            sides,
            tick_interval,
            cycles_run: 0,
        }
    }

    /// Build a strategy from configuration, one reconciler per side that has
    /// rungs, all sharing the same price feed.
    pub fn from_config<F: PriceFeed + 'static>(
        config: &LadderMMConfig,
        client: Arc<X>,
        feed: Arc<F>,
    ) -> Self {
        let sides: Vec<Box<dyn SideStrategy>> = config
            .enabled_sides()
            .into_iter()
            .map(|side| {
                Box::new(OfferReconciler::new(
                    side,
                    Arc::clone(&feed),
                    StaticSpreadLevels::new(side, config.rungs_for(side).to_vec()),
                    config.price_tolerance,
                    config.amount_tolerance,
                    config.divide_amount_by_price,
                )) as Box<dyn SideStrategy>
            })
            .collect();

        Self::new(
            client,
            sides,
            Duration::from_secs(config.tick_interval_secs),
        )
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles_run
    }

    /// Run one full reconciliation cycle across all configured sides.
    pub async fn run_cycle(&mut self) -> Result<CycleSummary, CycleError> {
        let balances = self.client.balances().await?;
        let mut summary = CycleSummary::default();

        for strategy in &mut self.sides {
            let side = strategy.side();

            strategy.pre_update(balances.base, balances.quote).await?;

            let offers = self.client.open_offers(side).await?;
            let (mut intents, trimmed) = strategy.prune_existing_offers(&offers);
            let (ops, top_price) = strategy.update_with_ops(&trimmed)?;
            intents.extend(ops);

            if !intents.is_empty() {
                let receipt = self.client.submit(side, intents).await?;
                debug!(
                    "[{}] submitted batch: {} created, {} modified, {} deleted",
                    side, receipt.created, receipt.modified, receipt.deleted
                );
                summary.receipt.created += receipt.created;
                summary.receipt.modified += receipt.modified;
                summary.receipt.deleted += receipt.deleted;
            }

            strategy.post_update()?;

            if let Some(top) = top_price {
                info!("[{}] top price this cycle: {}", side, top);
                summary.top_prices.push((side, top));
            }
        }

        self.cycles_run += 1;
        Ok(summary)
    }

    /// Main tick loop. Runs until shutdown is requested.
    pub async fn run(&mut self, shutdown: &ShutdownManager) {
        let mut heartbeat = Heartbeat::new(60);
        info!(
            "[LadderMM] starting tick loop, {} side(s), interval {:?}",
            self.sides.len(),
            self.tick_interval
        );

        while shutdown.is_running() {
            let tick_start = Instant::now();

            match self.run_cycle().await {
                Ok(summary) => {
                    if summary.receipt.total() > 0 {
                        debug!(
                            "[LadderMM] cycle {}: {} mutations",
                            self.cycles_run,
                            summary.receipt.total()
                        );
                    }
                }
                Err(e) => warn!("[LadderMM] cycle aborted: {}", e),
            }

            if heartbeat.should_beat() {
                info!("[LadderMM] alive, {} cycles completed", self.cycles_run);
                heartbeat.beat();
            }

            let elapsed = tick_start.elapsed();
            if elapsed < self.tick_interval {
                shutdown.interruptible_sleep(self.tick_interval - elapsed).await;
            }
        }

        info!("[LadderMM] stopped after {} cycles", self.cycles_run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::strategies::ladder_mm::components::levels::RungSpec;
    use crate::infrastructure::client::PaperExchange;
    use crate::infrastructure::feed::FixedPriceFeed;

    fn config() -> LadderMMConfig {
        LadderMMConfig {
            price_tolerance: 0.001,
            amount_tolerance: 0.01,
            divide_amount_by_price: false,
            tick_interval_secs: 1,
            sell_rungs: vec![
                RungSpec {
                    spread: 0.002,
                    amount: 100.0,
                },
                RungSpec {
                    spread: 0.005,
                    amount: 150.0,
                },
            ],
            buy_rungs: vec![RungSpec {
                spread: 0.002,
                amount: 100.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_first_cycle_places_full_ladder() {
        let client = Arc::new(PaperExchange::new(10_000.0, 10_000.0));
        let feed = Arc::new(FixedPriceFeed::new(100.0));
        let mut strategy = LadderStrategy::from_config(&config(), Arc::clone(&client), feed);

        let summary = strategy.run_cycle().await.unwrap();

        // Two sell rungs plus one buy rung.
        assert_eq!(summary.receipt.created, 3);
        assert_eq!(summary.receipt.modified, 0);
        assert_eq!(client.open_offer_count(Side::Sell), 2);
        assert_eq!(client.open_offer_count(Side::Buy), 1);
        assert_eq!(summary.top_prices.len(), 2);
    }

    #[tokio::test]
    async fn test_second_cycle_is_quiet() {
        let client = Arc::new(PaperExchange::new(10_000.0, 10_000.0));
        let feed = Arc::new(FixedPriceFeed::new(100.0));
        let mut strategy = LadderStrategy::from_config(&config(), Arc::clone(&client), feed);

        strategy.run_cycle().await.unwrap();
        let summary = strategy.run_cycle().await.unwrap();

        // Book already matches the ladder; nothing to do.
        assert_eq!(summary.receipt.total(), 0);
        assert!(summary.top_prices.is_empty());
        assert_eq!(strategy.cycles_run(), 2);
    }

    #[tokio::test]
    async fn test_price_move_beyond_tolerance_modifies() {
        let client = Arc::new(PaperExchange::new(10_000.0, 10_000.0));
        let feed = Arc::new(FixedPriceFeed::new(100.0));
        let mut strategy =
            LadderStrategy::from_config(&config(), Arc::clone(&client), Arc::clone(&feed));

        strategy.run_cycle().await.unwrap();

        // 1% move with a 0.1% tolerance band re-prices every offer.
        feed.set_price(101.0);
        let summary = strategy.run_cycle().await.unwrap();

        assert_eq!(summary.receipt.modified, 3);
        assert_eq!(summary.receipt.created, 0);
    }

    #[tokio::test]
    async fn test_small_price_move_within_tolerance_is_quiet() {
        let mut cfg = config();
        cfg.price_tolerance = 0.01;
        let client = Arc::new(PaperExchange::new(10_000.0, 10_000.0));
        let feed = Arc::new(FixedPriceFeed::new(100.0));
        let mut strategy =
            LadderStrategy::from_config(&cfg, Arc::clone(&client), Arc::clone(&feed));

        strategy.run_cycle().await.unwrap();

        feed.set_price(100.05);
        let summary = strategy.run_cycle().await.unwrap();

        assert_eq!(summary.receipt.total(), 0);
    }
}
