use crate::constants::{
    CAPTERRA_BASE_URL, CONFIG_PATH_ENV, DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_DELAY_MS, DEFAULT_REFERER, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, G2_BASE_URL, OUTPUT_DIR_ENV,
};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "scraper.toml";

/// Settings shared by every run, loaded from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub scrape: ScrapeSettings,
    pub output: OutputSettings,
    pub platforms: PlatformSettings,
}

/// Transport settings; the header values are sent on every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            referer: DEFAULT_REFERER.to_string(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeSettings {
    /// Pause between consecutive page fetches
    pub page_delay_ms: u64,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
        }
    }
}

impl ScrapeSettings {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    pub g2_base_url: String,
    pub capterra_base_url: String,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            g2_base_url: G2_BASE_URL.to_string(),
            capterra_base_url: CAPTERRA_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings for a run.
    ///
    /// An explicit `path` (or `REVIEW_SCRAPER_CONFIG`) must exist and parse.
    /// Without one, `scraper.toml` in the working directory is used when present
    /// and built-in defaults otherwise. `REVIEW_SCRAPER_OUTPUT_DIR` overrides the
    /// output directory in every case.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut settings = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                settings.output.dir = PathBuf::from(dir);
            }
        }

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(ScraperError::Config("http.timeout_secs must be positive".into()));
        }
        for (key, url) in [
            ("platforms.g2_base_url", &self.platforms.g2_base_url),
            ("platforms.capterra_base_url", &self.platforms.capterra_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ScraperError::Config(format!(
                    "{key} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }
}
