use crate::core::rate::parse_rate_payload;
use crate::core::{RateError, RateSnapshot, RateSource};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Reads the rate document from a local JSON file, as written by a scraper job.
pub struct FileRateSource {
    path: PathBuf,
    name: String,
}

impl FileRateSource {
    pub fn new(path: &Path) -> Self {
        FileRateSource {
            path: path.to_path_buf(),
            name: path.display().to_string(),
        }
    }
}

#[async_trait]
impl RateSource for FileRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "FileRateFetch", skip(self), fields(path = %self.name))]
    async fn fetch_rate(&self) -> Result<RateSnapshot, RateError> {
        debug!("Reading rate from {}", self.name);
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RateError::fetch(&self.name, e))?;
        parse_rate_payload(&self.name, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_history_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exchange_rate.json");
        std::fs::write(
            &path,
            r#"[{"rate": 87120.0, "timestamp": "2025-03-02T09:00:00+01:00 CET"}]"#,
        )
        .unwrap();

        let snapshot = FileRateSource::new(&path).fetch_rate().await.unwrap();
        assert_eq!(snapshot.rate.value(), 87120.0);
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_failure() {
        let dir = TempDir::new().unwrap();
        let source = FileRateSource::new(&dir.path().join("missing.json"));

        let err = source.fetch_rate().await.unwrap_err();
        assert!(matches!(err, RateError::Fetch { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("price.json");
        std::fs::write(&path, r#"{"price": "ninety"}"#).unwrap();

        let err = FileRateSource::new(&path).fetch_rate().await.unwrap_err();
        assert!(matches!(err, RateError::MalformedPayload { .. }));
    }
}
