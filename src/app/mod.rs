pub mod ports;
pub mod scrape_use_case;

pub use scrape_use_case::{EngineSettings, ScrapeRun, ScrapeUseCase};
