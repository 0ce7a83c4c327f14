pub mod advisory;
pub mod detector;
pub mod indicators;
pub mod settings;

pub use advisory::build_advisory;
pub use detector::detect;
pub use settings::StrategySettings;
