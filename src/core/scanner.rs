//! Scan orchestration: one isolated pipeline per instrument.

use chrono::Utc;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::alerts::format_alert;
use crate::config::{ScanConfig, Settings};
use crate::models::bar;
use crate::models::report::{InstrumentOutcome, InstrumentReport, ScanReport};
use crate::models::signal::SignalTier;
use crate::services::delivery::AlertSink;
use crate::services::market_data::{BarQuery, MarketDataProvider, ProviderError};
use crate::signals::engine::{Evaluation, SignalEngine};
use crate::signals::error::EvaluationError;

/// Runs fetch → preprocess → classify → format → deliver for each instrument.
///
/// Holds no state between scans: every scan starts again from raw bars, so a
/// sustained condition alerts on every scan.
pub struct Scanner {
    instruments: Vec<String>,
    query: BarQuery,
    engine: SignalEngine,
    provider: Arc<dyn MarketDataProvider>,
    sink: Arc<dyn AlertSink>,
}

impl Scanner {
    pub fn new(
        instruments: Vec<String>,
        query: BarQuery,
        config: ScanConfig,
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            instruments,
            query,
            engine: SignalEngine::new(config),
            provider,
            sink,
        }
    }

    pub fn from_settings(
        settings: &Settings,
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        Self::new(
            settings.symbols.clone(),
            BarQuery::new(settings.lookback.clone(), settings.bar_interval.clone()),
            settings.scan,
            provider,
            sink,
        )
    }

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// Attempt every instrument once, in order. Never fails as a whole.
    pub async fn run_scan(&self) -> ScanReport {
        let started_at = Utc::now();
        info!(
            instrument_count = self.instruments.len(),
            "Scanner: starting scan of {} instruments",
            self.instruments.len()
        );

        let mut instruments = Vec::with_capacity(self.instruments.len());
        for symbol in &self.instruments {
            let report = AssertUnwindSafe(self.scan_instrument(symbol))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    let detail = panic_message(panic.as_ref());
                    error!(symbol = %symbol, error = %detail, "Scanner: pipeline panicked for {}", symbol);
                    InstrumentReport {
                        instrument: symbol.clone(),
                        snapshot: None,
                        outcome: InstrumentOutcome::NoResult {
                            reason: "panic",
                            detail,
                        },
                    }
                });
            instruments.push(report);
        }

        let report = ScanReport {
            started_at,
            finished_at: Utc::now(),
            instruments,
        };
        info!(
            alerts = report.alert_count(),
            no_result = report.no_result_count(),
            "Scanner: scan complete, {} alerts, {} instruments without result",
            report.alert_count(),
            report.no_result_count()
        );
        report
    }

    /// Evaluate one instrument and deliver its alert, if any.
    pub async fn scan_instrument(&self, symbol: &str) -> InstrumentReport {
        debug!(symbol = %symbol, "Scanner: checking {}", symbol);

        let evaluation = match self.evaluate_instrument(symbol).await {
            Ok(evaluation) => evaluation,
            Err(e) => {
                match e {
                    EvaluationError::Retrieval(_) => {
                        warn!(symbol = %symbol, reason = e.kind(), error = %e, "Scanner: no result for {}", symbol)
                    }
                    _ => {
                        info!(symbol = %symbol, reason = e.kind(), error = %e, "Scanner: no result for {}", symbol)
                    }
                }
                return InstrumentReport {
                    instrument: symbol.to_string(),
                    snapshot: None,
                    outcome: InstrumentOutcome::NoResult {
                        reason: e.kind(),
                        detail: e.to_string(),
                    },
                };
            }
        };

        let Evaluation { snapshot, tier } = evaluation;
        let outcome = match format_alert(tier, &snapshot, symbol) {
            Some(text) => self.deliver(symbol, tier, &text).await,
            None => {
                if tier != SignalTier::None {
                    warn!(symbol = %symbol, tier = %tier, "Scanner: tier matched but alert could not be rendered");
                }
                debug!(
                    symbol = %symbol,
                    price = snapshot.price,
                    rsi = snapshot.rsi,
                    "Scanner: no signal for {}",
                    symbol
                );
                InstrumentOutcome::NoSignal
            }
        };

        InstrumentReport {
            instrument: symbol.to_string(),
            snapshot: Some(snapshot),
            outcome,
        }
    }

    async fn evaluate_instrument(&self, symbol: &str) -> Result<Evaluation, EvaluationError> {
        let bars = self.provider.get_bars(symbol, &self.query).await?;
        debug!(symbol = %symbol, count = bars.len(), "Scanner: fetched {} bars for {}", bars.len(), symbol);

        if !bar::is_strictly_ordered(&bars) {
            return Err(ProviderError::Malformed(
                "bar timestamps are not strictly increasing".to_string(),
            )
            .into());
        }
        self.engine.evaluate(&bars)
    }

    async fn deliver(&self, symbol: &str, tier: SignalTier, text: &str) -> InstrumentOutcome {
        match self.sink.deliver(text).await {
            Ok(()) => {
                info!(symbol = %symbol, tier = %tier, "Scanner: {} alert sent for {}", tier, symbol);
                InstrumentOutcome::Alert {
                    tier,
                    delivered: true,
                    delivery_error: None,
                }
            }
            Err(e) => {
                error!(symbol = %symbol, tier = %tier, error = %e, "Scanner: failed to deliver {} alert for {}", tier, symbol);
                InstrumentOutcome::Alert {
                    tier,
                    delivered: false,
                    delivery_error: Some(e.to_string()),
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
