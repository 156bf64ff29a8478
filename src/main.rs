use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use review_scraper::apis::create_source;
use review_scraper::app::ports::{ResultOutputPort, ResultPayload};
use review_scraper::config::Settings;
use review_scraper::infra::{JsonFileOutputAdapter, ReqwestHttp};
use review_scraper::{logging, metrics};
use review_scraper::{EngineSettings, PageWindow, Platform, RunConfig, ScrapeUseCase};

#[derive(Parser)]
#[command(name = "review_scraper")]
#[command(about = "Review scraper for G2 and Capterra")]
#[command(version = "0.1.0")]
struct Cli {
    /// Company name (e.g., Chargebee)
    #[arg(long)]
    company: String,

    /// Review source: g2 or capterra
    #[arg(long)]
    source: Platform,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long = "start-date", alias = "start_date")]
    start_date: String,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long = "end-date", alias = "end_date")]
    end_date: String,

    /// Run scraper for a single page without pagination
    #[arg(long)]
    dry_run: bool,

    /// Path to a TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the JSON result file (overrides settings)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// Builds the run from arguments and settings; every error here is raised
/// before the first fetch.
fn prepare(cli: &Cli) -> review_scraper::Result<(RunConfig, Settings)> {
    let window = PageWindow::parse(&cli.start_date, &cli.end_date)?;
    let run_config = RunConfig::new(cli.company.clone(), cli.source, window)?.with_dry_run(cli.dry_run);

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.output_dir {
        settings.output.dir = dir.clone();
    }
    Ok((run_config, settings))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let log_guard = logging::init_logging();

    let (run_config, settings) = match prepare(&cli) {
        Ok(prepared) => prepared,
        Err(e) if e.is_configuration() => {
            error!("Invalid configuration: {}", e);
            eprintln!("❌ Invalid configuration: {e}");
            drop(log_guard);
            std::process::exit(2);
        }
        Err(e) => return Err(e).context("Failed to prepare scrape run"),
    };
    let window = run_config.window;

    metrics::init_metrics();

    let http = Arc::new(ReqwestHttp::new(&settings.http).context("Failed to build HTTP client")?);
    let source = create_source(run_config.platform, &run_config.company, &settings.platforms);
    let use_case = ScrapeUseCase::new(http, EngineSettings::from(&settings.scrape));

    info!(
        company = %run_config.company,
        platform = %run_config.platform,
        start = %window.start(),
        end = %window.end(),
        dry_run = run_config.dry_run,
        "Starting scrape"
    );

    let started = Instant::now();
    let run = use_case.run(&run_config, source.as_ref()).await;
    let payload = ResultPayload::new(&run_config, run, started.elapsed(), Utc::now());

    let output = JsonFileOutputAdapter::new(&settings.output.dir);
    let path = match output.write(&payload).await {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to write results: {}", e);
            return Err(e).context("Failed to write result payload");
        }
    };

    println!("\n✅ Scraping completed!");
    println!("   Reviews saved to: {}", path.display());
    println!("   Total reviews collected: {}", payload.metadata.total_reviews);
    println!("   Scrape status: {}", payload.metadata.scrape_status);
    println!("   Execution time: {:.2}s", payload.metadata.execution_time_sec);

    Ok(())
}
