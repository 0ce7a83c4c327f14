/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_token: String,
    pub telegram_allowed_user_ids: Vec<i64>,

    // Strategy config file path
    pub strategy_config_path: String,

    // Where the backtest equity curve PNG is written
    pub equity_curve_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let telegram_allowed_user_ids = required_env("TELEGRAM_ALLOWED_USER_IDS")
            .split(',')
            .map(|s| {
                s.trim().parse::<i64>().unwrap_or_else(|_| {
                    panic!(
                        "TELEGRAM_ALLOWED_USER_IDS contains non-numeric ID: '{}'",
                        s.trim()
                    )
                })
            })
            .collect();

        Config {
            telegram_token: required_env("TELEGRAM_TOKEN"),
            telegram_allowed_user_ids,
            strategy_config_path: optional_env("STRATEGY_CONFIG_PATH")
                .unwrap_or_else(|| "config/strategy.toml".to_string()),
            equity_curve_path: optional_env("EQUITY_CURVE_PATH")
                .unwrap_or_else(|| "equity_curve.png".to_string()),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
