use std::path::PathBuf;
use std::sync::Arc;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::InputFile,
    utils::command::BotCommands,
};
use tracing::{error, info, warn};

use common::MarketData;
use strategy::StrategySettings;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Dependencies injected into every handler via `dptree`.
#[derive(Clone)]
pub struct BotDeps {
    pub market: Arc<dyn MarketData>,
    pub settings: Arc<StrategySettings>,
    pub allowed_user_ids: Arc<Vec<i64>>,
    /// Where the backtest equity curve PNG is written before being sent.
    pub equity_curve_path: PathBuf,
}

/// Telegram bot commands exposed to the operator.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "GapBot commands:")]
pub enum Command {
    #[command(description = "Show what this bot does")]
    Start,
    #[command(description = "Scan the latest candles for an FVG setup")]
    Check,
    #[command(description = "Run the historical FVG backtest and plot the equity curve")]
    Backtest,
}

/// Start the Telegram bot in long-polling mode.
pub async fn start_bot(token: String, deps: BotDeps) {
    let bot = Bot::new(token);
    let deps = Arc::new(deps);

    info!("Telegram bot starting (long-polling)");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handle_start))
        .branch(case![Command::Check].endpoint(handle_check))
        .branch(case![Command::Backtest].endpoint(handle_backtest));

    Update::filter_message()
        .filter_map(|msg: Message| msg.from().map(|u| u.id))
        .filter_async(auth_filter)
        .branch(command_handler)
}

/// Silently drop messages from users not in the allowed list.
async fn auth_filter(user_id: UserId, deps: Arc<BotDeps>) -> bool {
    let uid = user_id.0 as i64;
    let allowed = deps.allowed_user_ids.contains(&uid);
    if !allowed {
        warn!(user_id = uid, "Unauthorized Telegram access attempt");
    }
    allowed
}

async fn handle_start(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    let text = format!(
        "GapBot ready.\n\
         Watching {} ({}).\n\n\
         /check — scan the latest candles for a fair value gap\n\
         /backtest — replay {} candles and report the strategy's record",
        deps.settings.symbol, deps.settings.interval, deps.settings.candle_limit
    );
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn handle_check(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    bot.send_message(msg.chat.id, "Scanning the market…").await?;

    let settings = &deps.settings;
    let series = match deps
        .market
        .klines(&settings.symbol, &settings.interval, settings.advisory_limit)
        .await
    {
        Ok(series) => series,
        Err(e) => {
            error!(error = %e, "Advisory market data fetch failed");
            bot.send_message(msg.chat.id, "Could not reach the exchange. Try again later.")
                .await?;
            return Ok(());
        }
    };

    match strategy::build_advisory(&series, settings) {
        Ok(advisory) => {
            bot.send_message(msg.chat.id, advisory).await?;
        }
        Err(e) => {
            error!(error = %e, "Advisory computation failed");
            bot.send_message(msg.chat.id, format!("Advisory failed: {e}"))
                .await?;
        }
    }
    Ok(())
}

async fn handle_backtest(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    let settings = &deps.settings;
    bot.send_message(
        msg.chat.id,
        format!(
            "Downloading {} {} candles and replaying the strategy…",
            settings.candle_limit, settings.interval
        ),
    )
    .await?;

    let series = match deps
        .market
        .klines(&settings.symbol, &settings.interval, settings.candle_limit)
        .await
    {
        Ok(series) => series,
        Err(e) => {
            error!(error = %e, "Backtest market data fetch failed");
            bot.send_message(msg.chat.id, "Could not reach the exchange. Try again later.")
                .await?;
            return Ok(());
        }
    };

    let run = match backtest::run(&series, settings) {
        Ok(run) => run,
        Err(e) => {
            error!(error = %e, "Backtest failed");
            bot.send_message(msg.chat.id, format!("Backtest failed: {e}"))
                .await?;
            return Ok(());
        }
    };

    // Statistics go out first; a chart failure must not take them down.
    let report_text = backtest::format_report(&run.report, &settings.symbol, &settings.interval);
    bot.send_message(msg.chat.id, report_text).await?;

    match chart::render_equity_curve(&run.equity_curve, run.report.win_rate, &deps.equity_curve_path)
    {
        Ok(()) => {
            bot.send_photo(msg.chat.id, InputFile::file(deps.equity_curve_path.clone()))
                .await?;
        }
        Err(e) => {
            warn!(error = %e, "Equity curve rendering failed");
            bot.send_message(
                msg.chat.id,
                "Equity curve chart unavailable (rendering failed); statistics above are unaffected.",
            )
            .await?;
        }
    }
    Ok(())
}
