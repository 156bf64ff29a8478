use crate::app::scrape_use_case::ScrapeRun;
use crate::error::Result;
use crate::types::{ReviewRecord, RunConfig};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// Fetch-side port
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// Single GET. `Err` covers connect failures, timeouts and unreadable
    /// bodies; any HTTP status, including errors, comes back as `Ok`.
    async fn get(&self, url: &str) -> std::result::Result<HttpGetResult, String>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Output-side port
#[async_trait]
pub trait ResultOutputPort: Send + Sync {
    /// Persist one run's payload, returning where it went
    async fn write(&self, payload: &ResultPayload) -> Result<PathBuf>;
}

/// Document written for every run, keyed by company and platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPayload {
    pub metadata: RunMetadata,
    pub reviews: Vec<ReviewRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub company: String,
    pub source: String,
    pub start_date: String,
    pub end_date: String,
    pub total_reviews: usize,
    pub scrape_status: String,
    pub execution_time_sec: f64,
    pub scraped_at: String,
}

impl ResultPayload {
    pub fn new(config: &RunConfig, run: ScrapeRun, elapsed: Duration, scraped_at: DateTime<Utc>) -> Self {
        let metadata = RunMetadata {
            company: config.company.clone(),
            source: config.platform.to_string(),
            start_date: config.window.start().format("%Y-%m-%d").to_string(),
            end_date: config.window.end().format("%Y-%m-%d").to_string(),
            total_reviews: run.records.len(),
            scrape_status: run.outcome.to_string(),
            execution_time_sec: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
            scraped_at: scraped_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        };
        Self {
            metadata,
            reviews: run.records,
        }
    }
}
