/// Platform name constants to ensure consistency across the codebase.
/// These are the user-facing selectors accepted on the command line and the
/// `source` value written into every review record.

pub const G2_PLATFORM: &str = "g2";
pub const CAPTERRA_PLATFORM: &str = "capterra";

// Listing page hosts
pub const G2_BASE_URL: &str = "https://www.g2.com";
pub const CAPTERRA_BASE_URL: &str = "https://www.capterra.com";

/// Guard-rail on the number of listing pages requested in one run.
pub const MAX_PAGES: u32 = 10;

pub const DEFAULT_PAGE_DELAY_MS: u64 = 1500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OUTPUT_DIR: &str = "output";

// Static request headers sent with every page fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const DEFAULT_REFERER: &str = "https://www.google.com/";

// Environment variables
pub const CONFIG_PATH_ENV: &str = "REVIEW_SCRAPER_CONFIG";
pub const OUTPUT_DIR_ENV: &str = "REVIEW_SCRAPER_OUTPUT_DIR";
pub const METRICS_ADDR_ENV: &str = "REVIEW_SCRAPER_METRICS_ADDR";

