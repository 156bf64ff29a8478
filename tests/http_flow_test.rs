mod common;

use common::{full_january_page, january};
use review_scraper::apis::create_source;
use review_scraper::app::ports::{HttpClientPort, ResultOutputPort, ResultPayload};
use review_scraper::config::{HttpSettings, PlatformSettings, Settings};
use review_scraper::infra::{JsonFileOutputAdapter, ReqwestHttp};
use review_scraper::{EngineSettings, Platform, RunConfig, ScrapeOutcome, ScrapeUseCase};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(http: ReqwestHttp) -> ScrapeUseCase {
    ScrapeUseCase::new(
        Arc::new(http),
        EngineSettings {
            page_delay: Duration::ZERO,
            ..EngineSettings::default()
        },
    )
}

fn platforms_at(uri: &str) -> PlatformSettings {
    PlatformSettings {
        g2_base_url: uri.to_string(),
        capterra_base_url: uri.to_string(),
    }
}

#[tokio::test]
async fn test_static_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/acme/reviews"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .and(header("referer", "https://www.google.com/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = ReqwestHttp::new(&HttpSettings::default()).unwrap();
    let resp = http
        .get(&format!("{}/products/acme/reviews?page=1", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "<html></html>");
}

#[tokio::test]
async fn test_error_statuses_are_returned_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let http = ReqwestHttp::new(&HttpSettings::default()).unwrap();
    let resp = http.get(&format!("{}/forbidden", mock_server.uri())).await.unwrap();

    assert_eq!(resp.status, 403);
    assert!(!resp.is_success());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let settings = HttpSettings {
        timeout_secs: 1,
        ..HttpSettings::default()
    };
    let http = ReqwestHttp::new(&settings).unwrap();

    assert!(http.get(&format!("{}/slow", mock_server.uri())).await.is_err());
}

#[tokio::test]
async fn test_denial_on_second_page_keeps_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/acme/reviews"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(full_january_page(1)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/acme/reviews"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let config = RunConfig::new("Acme", Platform::G2, january()).unwrap();
    let source = create_source(Platform::G2, "Acme", &platforms_at(&mock_server.uri()));
    let http = ReqwestHttp::new(&HttpSettings::default()).unwrap();

    let run = engine(http).run(&config, source.as_ref()).await;

    assert_eq!(run.outcome, ScrapeOutcome::Restricted);
    assert_eq!(run.records.len(), 3);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_capterra_boundary_stops_pagination() {
    let mock_server = MockServer::start().await;

    let listing = r#"<html><body>
        <div data-test-id="review-card">
          <h3>Fast support</h3>
          <span class="star-rating" aria-label="4.0 out of 5"></span>
          <time datetime="2024-01-22T00:00:00Z"></time>
          <p>Tickets answered same day.</p>
        </div>
        <div data-test-id="review-card">
          <h3>Old one</h3>
          <time datetime="2023-10-01T00:00:00Z"></time>
        </div>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/p/acme-cloud/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&mock_server)
        .await;

    let config = RunConfig::new("Acme Cloud", Platform::Capterra, january()).unwrap();
    let source = create_source(Platform::Capterra, "Acme Cloud", &platforms_at(&mock_server.uri()));
    let http = ReqwestHttp::new(&HttpSettings::default()).unwrap();

    let run = engine(http).run(&config, source.as_ref()).await;

    assert_eq!(run.outcome, ScrapeOutcome::Success);
    assert_eq!(run.records.len(), 1);
    assert_eq!(run.records[0].rating, Some(4.0));
    assert_eq!(run.records[0].company, "Acme Cloud");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_host_is_empty() {
    let config = RunConfig::new("Acme", Platform::G2, january()).unwrap();
    // Port 9 (discard) is not served locally
    let source = create_source(Platform::G2, "Acme", &platforms_at("http://127.0.0.1:9"));
    let http = ReqwestHttp::new(&HttpSettings::default()).unwrap();

    let run = engine(http).run(&config, source.as_ref()).await;

    assert_eq!(run.outcome, ScrapeOutcome::Empty);
    assert!(run.records.is_empty());
    assert_eq!(run.pages_fetched, 1);
}

#[tokio::test]
async fn test_payload_written_to_deterministic_file() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(full_january_page(1)))
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.output.dir = temp_dir.path().join("out");
    settings.platforms = platforms_at(&mock_server.uri());

    let config = RunConfig::new("Acme Corp", Platform::G2, january())
        .unwrap()
        .with_dry_run(true);
    let source = create_source(config.platform, &config.company, &settings.platforms);
    let http = ReqwestHttp::new(&settings.http).unwrap();
    let run = engine(http).run(&config, source.as_ref()).await;

    let payload = ResultPayload::new(&config, run, Duration::from_millis(420), chrono::Utc::now());
    let written = JsonFileOutputAdapter::new(&settings.output.dir)
        .write(&payload)
        .await
        .unwrap();

    assert_eq!(written, temp_dir.path().join("out").join("acme_corp_g2_reviews.json"));

    let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(doc["metadata"]["company"], "Acme Corp");
    assert_eq!(doc["metadata"]["source"], "g2");
    assert_eq!(doc["metadata"]["total_reviews"], 3);
    assert_eq!(doc["metadata"]["scrape_status"], "SUCCESS");
    assert_eq!(doc["metadata"]["execution_time_sec"], 0.42);
    assert_eq!(doc["reviews"][0]["source"], "g2");
    assert_eq!(doc["reviews"][0]["title"], "p1-a");
    assert_eq!(doc["reviews"][0]["review_text"], "p1-a review body");
    assert_eq!(doc["reviews"][0]["rating"], 4.5);
    assert_eq!(doc["reviews"][0]["review_date"], "2024-01-25T09:00:00");
}
