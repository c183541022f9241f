//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod log;
pub mod rate;
pub mod trigger;

// Re-export main types for cleaner imports
pub use converter::{Converter, Edit, Field, FieldWrite, RateStatus};
pub use error::{RateError, TriggerError};
pub use rate::{ExchangeRate, RateSnapshot, RateSource};
pub use trigger::{RemoteTrigger, TriggerAck};
