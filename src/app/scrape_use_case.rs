use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::ScrapeSettings;
use crate::constants::{DEFAULT_PAGE_DELAY_MS, MAX_PAGES};
use crate::metrics::ScrapeMetrics;
use crate::types::{ReviewRecord, ReviewSource, RunConfig, ScrapeOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const ACCESS_DENIED: u16 = 403;

/// Loop controls for a scrape run
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Pause before each follow-up page fetch
    pub page_delay: Duration,
    /// Guard-rail on pages requested per run
    pub max_pages: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            max_pages: MAX_PAGES,
        }
    }
}

impl From<&ScrapeSettings> for EngineSettings {
    fn from(settings: &ScrapeSettings) -> Self {
        Self {
            page_delay: settings.page_delay(),
            ..Self::default()
        }
    }
}

/// What a run collected and why it stopped
#[derive(Debug, Clone)]
pub struct ScrapeRun {
    pub records: Vec<ReviewRecord>,
    pub outcome: ScrapeOutcome,
    pub pages_fetched: u32,
}

/// How a single fetch ended, before any parsing
#[derive(Debug, PartialEq)]
pub(crate) enum FetchClass<'a> {
    Page(&'a str),
    Restricted,
    Failed,
}

pub(crate) fn classify_fetch(result: &Result<HttpGetResult, String>) -> FetchClass<'_> {
    match result {
        Ok(resp) if resp.status == ACCESS_DENIED => FetchClass::Restricted,
        Ok(resp) if resp.is_success() => FetchClass::Page(&resp.body),
        Ok(_) | Err(_) => FetchClass::Failed,
    }
}

#[derive(Debug, PartialEq)]
enum Step {
    Continue,
    Stop,
}

/// Drives the page-by-page retrieval loop for one platform adapter.
///
/// Pages are requested strictly in order, one at a time, starting at 1. The
/// loop stops on access denial (`RESTRICTED`), on a failed fetch or an empty
/// page (`EMPTY`), when the adapter reports the date boundary, after the first
/// page in dry-run mode, or at the page guard-rail. Records gathered before
/// the stop are always returned. Dated records outside the window are dropped
/// whatever the adapter returns.
pub struct ScrapeUseCase {
    http: Arc<dyn HttpClientPort>,
    settings: EngineSettings,
}

impl ScrapeUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, settings: EngineSettings) -> Self {
        Self { http, settings }
    }

    /// Platform and company always come from `source`; `config` only supplies
    /// the window and the dry-run flag.
    #[instrument(skip(self, config, source), fields(company = %source.company(), platform = %source.platform()))]
    pub async fn run(&self, config: &RunConfig, source: &dyn ReviewSource) -> ScrapeRun {
        let platform = source.platform();
        let mut records: Vec<ReviewRecord> = Vec::new();
        let mut outcome = ScrapeOutcome::Empty;
        let mut pages_fetched = 0;

        for page in 1..=self.settings.max_pages {
            let url = source.page_url(page);
            info!(page, "Fetching URL: {}", url);

            let result = self.http.get(&url).await;
            pages_fetched += 1;
            match &result {
                Ok(resp) => ScrapeMetrics::record_page_fetched(platform, resp.status),
                Err(_) => ScrapeMetrics::record_fetch_failure(platform),
            }

            let step = match classify_fetch(&result) {
                FetchClass::Restricted => {
                    warn!(page, "Access restricted by platform (403).");
                    outcome = ScrapeOutcome::Restricted;
                    Step::Stop
                }
                FetchClass::Failed => {
                    match &result {
                        Ok(resp) => error!(page, status = resp.status, "Request failed with HTTP status"),
                        Err(e) => error!(page, "Request failed: {}", e),
                    }
                    outcome = ScrapeOutcome::Empty;
                    Step::Stop
                }
                FetchClass::Page(html) => {
                    let mut parsed = source.parse_page(html, &config.window);
                    let parsed_count = parsed.records.len();
                    parsed
                        .records
                        .retain(|r| r.review_date.map_or(true, |at| config.window.contains(at)));
                    if parsed.records.len() < parsed_count {
                        warn!(
                            page,
                            dropped = parsed_count - parsed.records.len(),
                            "Adapter returned reviews outside the window"
                        );
                    }
                    ScrapeMetrics::record_records(platform, parsed.records.len());

                    if parsed.records.is_empty() {
                        // A boundary on the very first card still counts as success
                        // when earlier pages produced records.
                        outcome = if parsed.boundary_reached && !records.is_empty() {
                            ScrapeOutcome::Success
                        } else {
                            ScrapeOutcome::Empty
                        };
                        info!(page, cards = parsed.cards_seen, "No usable reviews on page");
                        Step::Stop
                    } else {
                        info!(page, count = parsed.records.len(), "Collected reviews");
                        records.extend(parsed.records);
                        outcome = ScrapeOutcome::Success;
                        if parsed.boundary_reached {
                            Step::Stop
                        } else {
                            Step::Continue
                        }
                    }
                }
            };

            if step == Step::Stop {
                break;
            }
            if config.dry_run {
                info!("Dry-run enabled. Stopping after first page.");
                break;
            }
            if page < self.settings.max_pages && !self.settings.page_delay.is_zero() {
                debug!(delay_ms = self.settings.page_delay.as_millis() as u64, "Waiting before next page");
                tokio::time::sleep(self.settings.page_delay).await;
            }
        }

        ScrapeMetrics::record_run(platform, outcome);
        info!(
            "Scrape completed | Outcome: {} | Reviews: {} | Pages: {}",
            outcome,
            records.len(),
            pages_fetched
        );

        ScrapeRun {
            records,
            outcome,
            pages_fetched,
        }
    }
}
