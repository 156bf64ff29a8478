use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::HttpSettings;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};

/// reqwest-backed fetcher. One instance, and so one connection pool, per run.
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (USER_AGENT, &settings.user_agent),
            (ACCEPT, &settings.accept),
            (ACCEPT_LANGUAGE, &settings.accept_language),
            (REFERER, &settings.referer),
        ] {
            let value = HeaderValue::from_str(value).map_err(|e| {
                ScraperError::Config(format!("invalid {} header value: {}", name.as_str(), e))
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout())
            .gzip(true)
            .deflate(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> std::result::Result<HttpGetResult, String> {
        let resp = self.client.get(url).send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        Ok(HttpGetResult { status, body })
    }
}
