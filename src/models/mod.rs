//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod report;
pub mod signal;

pub use bar::Bar;
pub use indicators::{IndicatorSeries, Snapshot};
pub use report::{InstrumentOutcome, InstrumentReport, ScanReport};
pub use signal::SignalTier;
