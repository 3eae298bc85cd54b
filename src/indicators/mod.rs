//! Indicator library: pure functions over ordered numeric series.

pub mod math;

pub mod momentum;
pub mod trend;

pub use momentum::{calculate_macd, calculate_rsi, MacdSeries, RsiSmoothing};
pub use trend::{calculate_ema, calculate_sma};
