//! Run a single scan and print the report as JSON.

use dotenvy::dotenv;
use sentinel::config::Settings;
use sentinel::core::scanner::Scanner;
use sentinel::logging::{self, LogTarget};
use sentinel::services::{AlertSink, LogSink, MarketDataProvider, TelegramNotifier, YahooChartProvider};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let settings = Settings::from_env()?;
    logging::init_logging(&settings.environment, LogTarget::Stderr);

    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(YahooChartProvider::with_base_url(settings.yahoo_base_url.clone())?);
    let sink: Arc<dyn AlertSink> = match settings.telegram {
        Some(ref telegram) => Arc::new(TelegramNotifier::new(telegram)?),
        None => Arc::new(LogSink),
    };

    let scanner = Scanner::from_settings(&settings, provider, sink);
    let report = scanner.run_scan().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
