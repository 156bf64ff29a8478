use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dates must be in YYYY-MM-DD format (got '{value}'): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Start date {start} cannot be after end date {end}")]
    DateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Unsupported platform '{0}' (expected one of: g2, capterra)")]
    UnsupportedPlatform(String),

    #[error("Malformed review element: {0}")]
    MalformedElement(String),
}

impl ScraperError {
    /// True for errors raised while validating a run before any fetch.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScraperError::Config(_)
                | ScraperError::InvalidDate { .. }
                | ScraperError::DateRange { .. }
                | ScraperError::UnsupportedPlatform(_)
                | ScraperError::Toml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
