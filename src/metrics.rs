//! Prometheus metrics for scans, deliveries and the HTTP surface.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

use crate::models::report::{InstrumentOutcome, ScanReport};

pub struct Metrics {
    registry: Registry,
    pub scans_total: IntCounter,
    pub instrument_outcomes_total: IntCounterVec,
    pub alerts_delivered_total: IntCounter,
    pub delivery_failures_total: IntCounter,
    pub scan_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scans_total = IntCounter::new("scans_total", "Completed scans")?;
        let instrument_outcomes_total = IntCounterVec::new(
            Opts::new(
                "instrument_outcomes_total",
                "Per-instrument scan outcomes by kind",
            ),
            &["outcome"],
        )?;
        let alerts_delivered_total =
            IntCounter::new("alerts_delivered_total", "Alerts accepted by the delivery channel")?;
        let delivery_failures_total =
            IntCounter::new("delivery_failures_total", "Alerts the delivery channel rejected")?;
        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scan_duration_seconds", "Wall time of one full scan")
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        )?;
        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;

        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(instrument_outcomes_total.clone()))?;
        registry.register(Box::new(alerts_delivered_total.clone()))?;
        registry.register(Box::new(delivery_failures_total.clone()))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;

        Ok(Self {
            registry,
            scans_total,
            instrument_outcomes_total,
            alerts_delivered_total,
            delivery_failures_total,
            scan_duration_seconds,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
        })
    }

    /// Fold one finished scan into the counters.
    pub fn record_scan(&self, report: &ScanReport, elapsed: Duration) {
        self.scans_total.inc();
        self.scan_duration_seconds.observe(elapsed.as_secs_f64());

        for instrument in &report.instruments {
            self.instrument_outcomes_total
                .with_label_values(&[instrument.outcome.label()])
                .inc();
            if let InstrumentOutcome::Alert { delivered, .. } = instrument.outcome {
                if delivered {
                    self.alerts_delivered_total.inc();
                } else {
                    self.delivery_failures_total.inc();
                }
            }
        }
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
