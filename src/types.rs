use crate::constants::{CAPTERRA_PLATFORM, G2_PLATFORM};
use crate::error::{Result, ScraperError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported review platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    G2,
    Capterra,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::G2 => G2_PLATFORM,
            Platform::Capterra => CAPTERRA_PLATFORM,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            G2_PLATFORM => Ok(Platform::G2),
            CAPTERRA_PLATFORM => Ok(Platform::Capterra),
            other => Err(ScraperError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// One user-authored review, normalized across platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub source: Platform,
    pub company: String,
    pub title: Option<String>,
    #[serde(rename = "review_text")]
    pub body: Option<String>,
    /// Platform-defined scale, not normalized across platforms
    pub rating: Option<f64>,
    pub review_date: Option<NaiveDateTime>,
}

/// Why a scrape run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScrapeOutcome {
    Success,
    Empty,
    Restricted,
}

impl ScrapeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeOutcome::Success => "SUCCESS",
            ScrapeOutcome::Empty => "EMPTY",
            ScrapeOutcome::Restricted => "RESTRICTED",
        }
    }
}

impl fmt::Display for ScrapeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a review date falls relative to a [`PageWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePosition {
    /// Older than the window start; with newest-first listings nothing after
    /// this point can qualify.
    BeforeStart,
    Within,
    /// Newer than the window end; skipped but scanning continues.
    AfterEnd,
}

/// Inclusive `[start, end]` calendar-day window for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl PageWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ScraperError::DateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a window from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_day(start)?, parse_day(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn position(&self, at: NaiveDateTime) -> DatePosition {
        let day = at.date();
        if day < self.start {
            DatePosition::BeforeStart
        } else if day > self.end {
            DatePosition::AfterEnd
        } else {
            DatePosition::Within
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.position(at) == DatePosition::Within
    }
}

fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        ScraperError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

/// Everything a run needs that is fixed before the first fetch
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub company: String,
    pub platform: Platform,
    pub window: PageWindow,
    /// Limits the run to a single page fetch
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(company: impl Into<String>, platform: Platform, window: PageWindow) -> Result<Self> {
        let company = company.into();
        if company.trim().is_empty() {
            return Err(ScraperError::Config("company name must not be empty".into()));
        }
        Ok(Self {
            company,
            platform,
            window,
            dry_run: false,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Records extracted from one listing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    /// In-window records in page order
    pub records: Vec<ReviewRecord>,
    /// Review cards found in the markup, including skipped ones
    pub cards_seen: usize,
    /// A card older than the window start was reached; request no more pages
    pub boundary_reached: bool,
}

/// Capability shared by every platform adapter
pub trait ReviewSource: Send + Sync {
    fn platform(&self) -> Platform;

    fn company(&self) -> &str;

    /// URL of the 1-based listing page
    fn page_url(&self, page: u32) -> String;

    /// Extract records from one page of markup, newest first
    fn parse_page(&self, html: &str, window: &PageWindow) -> ParsedPage;
}
