// Technical indicator calculations
pub mod atr;
pub mod bollinger;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod snapshot;
pub mod trend;

pub use atr::calculate_atr;
pub use bollinger::calculate_bollinger;
pub use macd::calculate_macd_cross;
pub use moving_average::{calculate_ema, calculate_sma};
pub use rsi::calculate_rsi;
pub use snapshot::compute_snapshot;
pub use trend::htf_trend;
