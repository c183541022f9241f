//! Remote "trigger update" abstraction

use super::error::TriggerError;
use async_trait::async_trait;
use std::fmt::Display;
use tracing::{info, warn};

#[async_trait]
pub trait RemoteTrigger: Send + Sync {
    /// Asks the remote service to recompute the rate. Returns the service's message.
    async fn trigger(&self) -> Result<String, TriggerError>;
}

/// What the user is told after a trigger attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAck {
    Accepted(String),
    Failed(String),
}

impl TriggerAck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, TriggerAck::Accepted(_))
    }
}

impl Display for TriggerAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerAck::Accepted(message) => write!(f, "{message}"),
            TriggerAck::Failed(reason) => write!(f, "Failed to trigger update: {reason}"),
        }
    }
}

/// Fires the trigger once and folds the outcome into an acknowledgment.
/// The current exchange rate is never touched; the new rate shows up on the
/// next refresh.
pub async fn trigger_remote_update(trigger: &dyn RemoteTrigger) -> TriggerAck {
    match trigger.trigger().await {
        Ok(message) => {
            info!(%message, "Remote update triggered");
            TriggerAck::Accepted(message)
        }
        Err(e) => {
            warn!(error = %e, "Remote update trigger failed");
            TriggerAck::Failed(e.to_string())
        }
    }
}
