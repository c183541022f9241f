//! Error types for rate fetching and remote triggers.

use thiserror::Error;

/// Errors that can occur while obtaining an exchange rate.
///
/// Both kinds are non-fatal: the converter catches them and keeps the
/// previous rate.
#[derive(Error, Debug)]
pub enum RateError {
    /// The source could not be reached, read, or answered with a non-2xx status.
    #[error("Failed to fetch rate from {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    /// The source answered but the body was not a usable rate document.
    #[error("Malformed rate payload from {source_name}: {message}")]
    MalformedPayload {
        source_name: String,
        message: String,
    },
}

impl RateError {
    pub fn fetch(source_name: impl Into<String>, message: impl ToString) -> Self {
        RateError::Fetch {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(source_name: impl Into<String>, message: impl ToString) -> Self {
        RateError::MalformedPayload {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

/// Errors from the remote "trigger update" call.
#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("Trigger request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Trigger rejected by {url}: HTTP {status}")]
    Rejected { url: String, status: u16 },

    #[error("Unexpected trigger response from {url}: {message}")]
    UnexpectedResponse { url: String, message: String },
}
