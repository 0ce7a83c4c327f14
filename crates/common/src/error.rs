use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Exchange API error: {0}")]
    Exchange(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid candle data: {0}")]
    InvalidData(String),

    #[error("Insufficient candles: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Chart rendering error: {0}")]
    Render(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
