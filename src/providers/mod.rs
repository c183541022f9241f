pub mod file_source;
pub mod http_source;
pub mod http_trigger;

use crate::core::RateSource;
use crate::core::config::SourceLocation;
use anyhow::Result;

/// Builds the rate source for a configured location.
pub fn build_rate_source(location: &SourceLocation) -> Result<Box<dyn RateSource>> {
    Ok(match location {
        SourceLocation::Url(url) => Box::new(http_source::HttpRateSource::new(url)?),
        SourceLocation::File(path) => Box::new(file_source::FileRateSource::new(path)),
    })
}

pub(crate) fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("nerkh/", env!("CARGO_PKG_VERSION")))
        .build()
}
