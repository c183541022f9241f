use super::rate::ExchangeRate;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

/// Where the rate document lives. Exactly one of `url` or `path` is set.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub path: Option<PathBuf>,
}

/// Resolved rate source location.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl SourceConfig {
    pub fn location(&self) -> Result<SourceLocation> {
        match (&self.url, &self.path) {
            (Some(url), None) => Ok(SourceLocation::Url(url.clone())),
            (None, Some(path)) => Ok(SourceLocation::File(path.clone())),
            (Some(_), Some(_)) => bail!("Rate source must set only one of 'url' or 'path'"),
            (None, None) => bail!("Rate source must set one of 'url' or 'path'"),
        }
    }

    /// Interprets a command line value: anything with an http(s) scheme is a URL,
    /// everything else a local file.
    pub fn from_cli_value(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            SourceConfig {
                url: Some(value.to_string()),
                path: None,
            }
        } else {
            SourceConfig {
                url: None,
                path: Some(PathBuf::from(value)),
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TriggerConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub trigger: Option<TriggerConfig>,
    pub default_rate: Option<f64>,
    pub refresh_interval_secs: Option<u64>,
}

impl AppConfig {
    /// A config with only a rate source, used when no config file exists.
    pub fn with_source(source: SourceConfig) -> Self {
        AppConfig {
            source,
            trigger: None,
            default_rate: None,
            refresh_interval_secs: None,
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "nerkh", "nerkh")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Reads and parses a config file without validating it, so command line
    /// overrides can be applied first.
    pub fn parse_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        debug!("Loading config from {}", path.as_ref().display());
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.source.location()?;
        if let Some(rate) = self.default_rate
            && ExchangeRate::new(rate).is_none()
        {
            bail!("default_rate must be a non-negative number, got {rate}");
        }
        if self.refresh_interval_secs == Some(0) {
            bail!("refresh_interval_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn initial_rate(&self) -> ExchangeRate {
        self.default_rate
            .and_then(ExchangeRate::new)
            .unwrap_or(ExchangeRate::UNSET)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs.map(Duration::from_secs)
    }
}
