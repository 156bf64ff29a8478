use crate::app::ports::{ResultOutputPort, ResultPayload};
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Writes each run's payload as pretty-printed JSON under one directory
pub struct JsonFileOutputAdapter {
    dir: PathBuf,
}

impl JsonFileOutputAdapter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<company lower-cased, spaces as underscores>_<platform>_reviews.json`
    pub fn file_name(company: &str, platform: &str) -> String {
        format!(
            "{}_{}_reviews.json",
            company.to_lowercase().replace(' ', "_"),
            platform
        )
    }

    pub fn path_for(&self, company: &str, platform: &str) -> PathBuf {
        self.dir.join(Self::file_name(company, platform))
    }
}

#[async_trait]
impl ResultOutputPort for JsonFileOutputAdapter {
    async fn write(&self, payload: &ResultPayload) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(&payload.metadata.company, &payload.metadata.source);
        let json = serde_json::to_string_pretty(payload)?;
        tokio::fs::write(&path, json).await?;
        info!("Reviews saved to: {}", path.display());
        Ok(path)
    }
}
