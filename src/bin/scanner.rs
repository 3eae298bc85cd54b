//! Sentinel Scanner
//!
//! Runs the periodic market scan and serves the keep-alive/status endpoints.

use dotenvy::dotenv;
use sentinel::config::Settings;
use sentinel::core::http::{self, AppState, HealthStatus};
use sentinel::core::scanner::Scanner;
use sentinel::core::scheduler::ScanScheduler;
use sentinel::logging::{self, LogTarget};
use sentinel::metrics::Metrics;
use sentinel::services::{AlertSink, LogSink, MarketDataProvider, TelegramNotifier, YahooChartProvider};
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Invalid configuration stops the process before any scan runs
    let settings = Settings::from_env()?;
    logging::init_logging(&settings.environment, LogTarget::Stdout);

    info!("Starting Sentinel Scanner");
    info!(environment = %settings.environment, "Environment");
    info!(
        symbols = ?settings.symbols,
        interval = settings.scan_interval.as_secs(),
        lookback = %settings.lookback,
        bar_interval = %settings.bar_interval,
        "Scanning {} every {}s",
        settings.symbols.join(", "),
        settings.scan_interval.as_secs()
    );

    let metrics = Arc::new(Metrics::new()?);

    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(YahooChartProvider::with_base_url(settings.yahoo_base_url.clone())?);

    let sink: Arc<dyn AlertSink> = match settings.telegram {
        Some(ref telegram) => {
            info!("Telegram delivery enabled");
            Arc::new(TelegramNotifier::new(telegram)?)
        }
        None => {
            warn!("BOT_TOKEN/CHAT_ID not set - alerts will only be logged");
            Arc::new(LogSink)
        }
    };

    let scanner = Arc::new(Scanner::from_settings(&settings, provider, sink));
    let scheduler =
        ScanScheduler::new(scanner, settings.scan_interval)?.with_metrics(metrics.clone());

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        history: scheduler.history(),
    };
    let port = settings.http_port;
    let server = tokio::spawn(async move {
        if let Err(e) = http::start_server(port, state).await {
            error!(error = %e, "HTTP server stopped");
        }
    });

    scheduler.start().await;

    info!("Scanner started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down scanner...");
    scheduler.stop().await;
    server.abort();
    info!("Scanner stopped");

    Ok(())
}
