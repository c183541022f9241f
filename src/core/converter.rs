//! The rate-bound converter.
//!
//! A [`Converter`] owns the current [`ExchangeRate`] and the text of the Euro
//! and Toman fields. Every user edit is an [`Edit`] that names the field it
//! came from; applying it stores the raw text for that field and computes
//! exactly one [`FieldWrite`] for the opposite field. Derived writes are plain
//! return values and are never fed back in as edits, so the two fields cannot
//! ping-pong.

use super::format::{format_euro, format_toman, parse_euro_input, parse_toman_input};
use super::rate::{ExchangeRate, RateSource};
use chrono::{SecondsFormat, Utc};
use std::fmt::Display;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Euro,
    Toman,
}

impl Field {
    pub fn opposite(self) -> Field {
        match self {
            Field::Euro => Field::Toman,
            Field::Toman => Field::Euro,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Euro => write!(f, "EUR"),
            Field::Toman => write!(f, "Toman"),
        }
    }
}

/// A user edit of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub source: Field,
    pub raw: String,
}

impl Edit {
    pub fn euro(raw: impl Into<String>) -> Self {
        Edit {
            source: Field::Euro,
            raw: raw.into(),
        }
    }

    pub fn toman(raw: impl Into<String>) -> Self {
        Edit {
            source: Field::Toman,
            raw: raw.into(),
        }
    }
}

/// The single derived write produced by an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrite {
    pub field: Field,
    pub value: String,
}

pub fn euro_to_toman(euro: f64, rate: ExchangeRate) -> f64 {
    euro * rate.value()
}

/// Yields 0 while no positive rate is known.
pub fn toman_to_euro(toman: f64, rate: ExchangeRate) -> f64 {
    if rate.is_set() {
        toman / rate.value()
    } else {
        0.0
    }
}

/// Computes the write an edit implies for the opposite field.
pub fn derive_write(edit: &Edit, rate: ExchangeRate) -> FieldWrite {
    let value = match edit.source {
        Field::Euro => format_toman(euro_to_toman(parse_euro_input(&edit.raw), rate)),
        Field::Toman => format_euro(toman_to_euro(parse_toman_input(&edit.raw), rate)),
    };
    FieldWrite {
        field: edit.source.opposite(),
        value,
    }
}

/// Rate display state shown next to the fields.
#[derive(Debug, Clone, PartialEq)]
pub enum RateStatus {
    /// No fetch has succeeded yet; the configured default is in use.
    Default,
    Updated { source: String, updated_at: String },
    Error(String),
}

impl Display for RateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateStatus::Default => write!(f, "Using default rate"),
            RateStatus::Updated { updated_at, .. } => write!(f, "Last updated: {updated_at}"),
            RateStatus::Error(message) => write!(f, "Error fetching price: {message}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Converter {
    rate: ExchangeRate,
    euro: String,
    toman: String,
    status: RateStatus,
}

impl Converter {
    pub fn new(initial_rate: ExchangeRate) -> Self {
        Self {
            rate: initial_rate,
            euro: String::new(),
            toman: String::new(),
            status: RateStatus::Default,
        }
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    pub fn euro(&self) -> &str {
        &self.euro
    }

    pub fn toman(&self) -> &str {
        &self.toman
    }

    pub fn status(&self) -> &RateStatus {
        &self.status
    }

    /// Records the edited text and writes the derived value into the other field.
    pub fn apply(&mut self, edit: Edit) -> FieldWrite {
        let write = derive_write(&edit, self.rate);
        debug!(source = %edit.source, raw = %edit.raw, derived = %write.value, "Applied edit");
        match edit.source {
            Field::Euro => {
                self.euro = edit.raw;
                self.toman = write.value.clone();
            }
            Field::Toman => {
                self.toman = edit.raw;
                self.euro = write.value.clone();
            }
        }
        write
    }

    pub fn on_euro_edited(&mut self, raw: &str) -> FieldWrite {
        self.apply(Edit::euro(raw))
    }

    pub fn on_toman_edited(&mut self, raw: &str) -> FieldWrite {
        self.apply(Edit::toman(raw))
    }

    /// Fetches a new rate and replaces the current one on success.
    ///
    /// Failures leave the rate untouched and are reported only through
    /// [`RateStatus::Error`]. Field values derived earlier are not recomputed.
    #[instrument(name = "RefreshRate", skip_all, fields(source = %source.name()))]
    pub async fn refresh_rate(&mut self, source: &dyn RateSource) -> &RateStatus {
        match source.fetch_rate().await {
            Ok(snapshot) => {
                debug!(rate = %snapshot.rate, "Rate refreshed");
                self.rate = snapshot.rate;
                let updated_at = snapshot
                    .timestamp
                    .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
                self.status = RateStatus::Updated {
                    source: source.name().to_string(),
                    updated_at,
                };
            }
            Err(e) => {
                warn!(error = %e, rate = %self.rate, "Rate refresh failed, keeping previous rate");
                self.status = RateStatus::Error(e.to_string());
            }
        }
        &self.status
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ExchangeRate::UNSET)
    }
}
