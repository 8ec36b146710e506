use std::sync::Arc;

use anyhow::Result;
use ladderbot::{
    init_tracing, BotConfig, FeedConfig, FixedPriceFeed, LadderStrategy, PaperExchange, PriceFeed,
    RestPriceFeed, ShutdownManager,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    info!("Starting Ladder MM paper bot");

    let config_path =
        std::env::var("LADDERBOT_CONFIG").unwrap_or_else(|_| "config/ladder_bot.yaml".to_string());
    let config = BotConfig::load(&config_path)?;

    info!("Configuration loaded from {}:", config_path);
    info!("  Price tolerance: {}", config.ladder.price_tolerance);
    info!("  Amount tolerance: {}", config.ladder.amount_tolerance);
    info!("  Tick interval: {}s", config.ladder.tick_interval_secs);
    info!("  Sell rungs: {}", config.ladder.sell_rungs.len());
    info!("  Buy rungs: {}", config.ladder.buy_rungs.len());

    let client = Arc::new(PaperExchange::new(
        config.paper.base_balance,
        config.paper.quote_balance,
    ));

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();

    info!("Press Ctrl+C to stop");

    match &config.feed {
        FeedConfig::Fixed { price } => {
            info!("  Feed: fixed @ {}", price);
            let feed = Arc::new(FixedPriceFeed::new(*price));
            run(&config, client, feed, &shutdown).await;
        }
        FeedConfig::Rest { url, pointer } => {
            info!("  Feed: REST {} ({})", url, pointer);
            let feed = Arc::new(RestPriceFeed::new(url.clone(), pointer.clone()));
            run(&config, client, feed, &shutdown).await;
        }
    }

    Ok(())
}

async fn run<F: PriceFeed + 'static>(
    config: &BotConfig,
    client: Arc<PaperExchange>,
    feed: Arc<F>,
    shutdown: &ShutdownManager,
) {
    let mut strategy = LadderStrategy::from_config(&config.ladder, client, feed);
    strategy.run(shutdown).await;
}
