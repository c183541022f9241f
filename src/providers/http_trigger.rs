use super::http_client;
use crate::core::{RemoteTrigger, TriggerError};
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct TriggerResponse {
    message: String,
}

/// Asks a remote service to recompute the rate with a one-shot GET.
pub struct HttpTrigger {
    url: String,
    client: reqwest::Client,
}

impl HttpTrigger {
    pub fn new(url: &str) -> Result<Self> {
        Ok(HttpTrigger {
            url: url.to_string(),
            client: http_client()?,
        })
    }
}

#[async_trait]
impl RemoteTrigger for HttpTrigger {
    #[instrument(name = "RemoteTrigger", skip(self), fields(url = %self.url))]
    async fn trigger(&self) -> Result<String, TriggerError> {
        let response =
            self.client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| TriggerError::Request {
                    url: self.url.clone(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        debug!(%status, "Received trigger response");
        if !status.is_success() {
            return Err(TriggerError::Rejected {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| TriggerError::Request {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str::<TriggerResponse>(&text)
            .map(|r| r.message)
            .map_err(|e| TriggerError::UnexpectedResponse {
                url: self.url.clone(),
                message: e.to_string(),
            })
    }
}
