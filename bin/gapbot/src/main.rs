use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use common::Config;
use market::BinanceClient;
use strategy::StrategySettings;
use telegram_ctrl::{start_bot, BotDeps};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let settings = StrategySettings::load(&cfg.strategy_config_path);
    info!(
        symbol = %settings.symbol,
        interval = %settings.interval,
        threshold = settings.threshold,
        risk_reward = settings.risk_reward,
        "GapBot starting"
    );

    // ── Market data client ────────────────────────────────────────────────────
    let market: Arc<dyn common::MarketData> = Arc::new(BinanceClient::new());

    // ── Telegram bot ──────────────────────────────────────────────────────────
    let deps = BotDeps {
        market,
        settings: Arc::new(settings),
        allowed_user_ids: Arc::new(cfg.telegram_allowed_user_ids.clone()),
        equity_curve_path: PathBuf::from(&cfg.equity_curve_path),
    };

    info!("Bot core up. Listening for Telegram commands.");
    start_bot(cfg.telegram_token, deps).await;
}
