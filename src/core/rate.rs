//! Exchange rate types and the rate source abstraction

use super::error::RateError;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Display;

/// Toman per 1 Euro. Zero means no rate is known yet.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub const UNSET: ExchangeRate = ExchangeRate(0.0);

    /// Returns `None` for negative or non-finite values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(ExchangeRate(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 > 0.0
    }
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A successfully parsed rate together with the timestamp the source reported, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub rate: ExchangeRate,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RatePayload {
    Flat { price: f64 },
    History(Vec<RateRecord>),
}

#[derive(Debug, Deserialize)]
struct RateRecord {
    rate: f64,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Parses a rate document.
///
/// Two shapes are accepted: `{"price": <number>}` and an array of
/// `{"rate": <number>, "timestamp": <string>}` records, of which only the
/// last one is used. The rate must be a positive finite number.
pub fn parse_rate_payload(source_name: &str, body: &str) -> Result<RateSnapshot, RateError> {
    let payload: RatePayload = serde_json::from_str(body).map_err(|e| {
        RateError::malformed(
            source_name,
            format!("expected {{\"price\"}} or [{{\"rate\", \"timestamp\"}}]: {e}"),
        )
    })?;

    let (value, timestamp) = match payload {
        RatePayload::Flat { price } => (price, None),
        RatePayload::History(records) => {
            let last = records
                .into_iter()
                .last()
                .ok_or_else(|| RateError::malformed(source_name, "rate history is empty"))?;
            (last.rate, last.timestamp)
        }
    };

    let rate = ExchangeRate::new(value)
        .filter(ExchangeRate::is_set)
        .ok_or_else(|| {
            RateError::malformed(
                source_name,
                format!("rate must be a positive number, got {value}"),
            )
        })?;

    Ok(RateSnapshot { rate, timestamp })
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Human readable location of the source, used in status and error messages.
    fn name(&self) -> &str;

    async fn fetch_rate(&self) -> Result<RateSnapshot, RateError>;
}
