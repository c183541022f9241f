use super::http_client;
use crate::core::rate::parse_rate_payload;
use crate::core::{RateError, RateSnapshot, RateSource};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Reads the rate document from an HTTP endpoint or a statically hosted JSON file.
pub struct HttpRateSource {
    url: String,
    client: reqwest::Client,
}

impl HttpRateSource {
    pub fn new(url: &str) -> Result<Self> {
        Ok(HttpRateSource {
            url: url.to_string(),
            client: http_client()?,
        })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    fn name(&self) -> &str {
        &self.url
    }

    #[instrument(name = "HttpRateFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rate(&self) -> Result<RateSnapshot, RateError> {
        debug!("Requesting rate from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RateError::fetch(&self.url, format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(RateError::fetch(
                &self.url,
                format!("HTTP error: {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateError::fetch(&self.url, format!("Failed to read body: {e}")))?;
        debug!(body = %text, "Received rate response");

        parse_rate_payload(&self.url, &text)
    }
}
