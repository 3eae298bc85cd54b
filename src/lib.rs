//! Market-signal scanner: computes SMA, RSI and MACD over price/volume bars,
//! classifies the latest bar into an alert tier and delivers the alert.

pub mod alerts;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
