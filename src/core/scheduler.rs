//! Periodic scan driver. Owns the scan history the engine itself never keeps.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::ConfigError;
use crate::core::scanner::Scanner;
use crate::metrics::Metrics;
use crate::models::report::{InstrumentOutcome, ScanReport};

/// Accumulated view of past scans, exposed read-only to observability.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanHistory {
    pub scan_in_progress: bool,
    pub scans_completed: u64,
    pub alerts_total: u64,
    pub last_started_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub last_report: Option<ScanReport>,
}

impl ScanHistory {
    pub fn begin(&mut self, at: DateTime<Utc>) {
        self.scan_in_progress = true;
        self.last_started_at = Some(at);
    }

    /// Fold a finished scan in. `last_error` keeps the most recent failure seen.
    pub fn record(&mut self, report: ScanReport) {
        self.scan_in_progress = false;
        self.scans_completed += 1;
        self.alerts_total += report.alert_count() as u64;

        let latest_failure = report.instruments.iter().rev().find_map(|r| match &r.outcome {
            InstrumentOutcome::NoResult { reason, detail } => {
                Some(format!("{}: {}: {}", r.instrument, reason, detail))
            }
            InstrumentOutcome::Alert {
                delivery_error: Some(e),
                ..
            } => Some(format!("{}: delivery_failure: {}", r.instrument, e)),
            _ => None,
        });
        if latest_failure.is_some() {
            self.last_error = latest_failure;
        }
        self.last_report = Some(report);
    }
}

/// One scan plus its bookkeeping. Cloned into the driver task.
#[derive(Clone)]
struct ScanCycle {
    scanner: Arc<Scanner>,
    history: Arc<RwLock<ScanHistory>>,
    metrics: Option<Arc<Metrics>>,
    guard: Arc<Mutex<()>>,
}

impl ScanCycle {
    async fn run(&self) -> ScanReport {
        // A scan never starts while another is still running.
        let _running = self.guard.lock().await;
        let start = Instant::now();
        self.history.write().await.begin(Utc::now());

        let report = self.scanner.run_scan().await;

        if let Some(ref metrics) = self.metrics {
            metrics.record_scan(&report, start.elapsed());
        }
        self.history.write().await.record(report.clone());
        report
    }
}

/// Runs a scan immediately on start and then once per interval. A scan that
/// overruns the interval delays the next one instead of overlapping it.
pub struct ScanScheduler {
    cycle: ScanCycle,
    interval: Duration,
    handle: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl ScanScheduler {
    pub fn new(scanner: Arc<Scanner>, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::NonPositive {
                key: "SCAN_INTERVAL_SECONDS",
                value: "0".to_string(),
            });
        }

        info!(
            interval_seconds = interval.as_secs(),
            instruments = ?scanner.instruments(),
            "ScanScheduler: created with interval {}s",
            interval.as_secs()
        );

        Ok(Self {
            cycle: ScanCycle {
                scanner,
                history: Arc::new(RwLock::new(ScanHistory::default())),
                metrics: None,
                guard: Arc::new(Mutex::new(())),
            },
            interval,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.cycle.metrics = Some(metrics);
        self
    }

    /// Shared handle to the scan history for read-only consumers.
    pub fn history(&self) -> Arc<RwLock<ScanHistory>> {
        self.cycle.history.clone()
    }

    /// Run one scan now, waiting for any scan already in progress.
    pub async fn run_once(&self) -> ScanReport {
        self.cycle.run().await
    }

    /// Start the driver loop in the background.
    pub async fn start(&self) {
        let mut handle = self.handle.write().await;
        if handle.is_some() {
            warn!("ScanScheduler: already running");
            return;
        }

        let cycle = self.cycle.clone();
        let period = self.interval;
        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!("ScanScheduler: started");

            loop {
                ticker.tick().await;
                cycle.run().await;
            }
        }));
    }

    /// Stop the driver loop. A scan in flight is abandoned.
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            self.cycle.history.write().await.scan_in_progress = false;
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the driver loop is running
    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
