pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod types;

// Layered boundaries: use cases depend on ports, infra implements them
pub mod app;
pub mod infra;

pub use app::{EngineSettings, ScrapeRun, ScrapeUseCase};
pub use error::{Result, ScraperError};
pub use types::{PageWindow, ParsedPage, Platform, ReviewRecord, ReviewSource, RunConfig, ScrapeOutcome};
