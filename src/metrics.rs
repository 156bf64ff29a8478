//! Scrape run metrics
//!
//! Counters are recorded through the `metrics` facade and are no-ops until a
//! recorder is installed. [`init_metrics`] installs a Prometheus exporter when
//! `REVIEW_SCRAPER_METRICS_ADDR` is set.

use crate::constants::METRICS_ADDR_ENV;
use crate::types::{Platform, ScrapeOutcome};
use std::net::SocketAddr;
use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

pub const PAGES_FETCHED: &str = "review_scraper_pages_fetched_total";
pub const FETCH_FAILURES: &str = "review_scraper_fetch_failures_total";
pub const RECORDS_COLLECTED: &str = "review_scraper_records_collected_total";
pub const RUNS_COMPLETED: &str = "review_scraper_runs_total";

/// Initialize the global metrics exporter. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| {
        let Ok(addr_str) = std::env::var(METRICS_ADDR_ENV) else {
            return;
        };
        let addr = match addr_str.parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Invalid metrics addr '{}': {}", addr_str, e);
                return;
            }
        };
        match metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
        {
            Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
            Err(e) => warn!("Failed to install Prometheus exporter: {}", e),
        }
    });
}

pub struct ScrapeMetrics;

impl ScrapeMetrics {
    pub fn record_page_fetched(platform: Platform, status: u16) {
        ::metrics::counter!(
            PAGES_FETCHED,
            "platform" => platform.as_str(),
            "status" => status.to_string()
        )
        .increment(1);
    }

    pub fn record_fetch_failure(platform: Platform) {
        ::metrics::counter!(FETCH_FAILURES, "platform" => platform.as_str()).increment(1);
    }

    pub fn record_records(platform: Platform, count: usize) {
        ::metrics::counter!(RECORDS_COLLECTED, "platform" => platform.as_str())
            .increment(count as u64);
    }

    pub fn record_run(platform: Platform, outcome: ScrapeOutcome) {
        ::metrics::counter!(
            RUNS_COMPLETED,
            "platform" => platform.as_str(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
    }
}
