pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, SourceConfig};
use crate::core::{Converter, Edit, RemoteTrigger};
use crate::providers::http_trigger::HttpTrigger;
use anyhow::{Context, Result, bail};
use std::io::Write;
use tracing::{debug, info};

pub enum AppCommand {
    Rate,
    Convert(Edit),
    Trigger,
    Interactive,
}

/// Resolves the configuration for a run.
///
/// An explicit `config_path` must exist. Without one the default location is
/// used if present; otherwise a `source_override` alone is enough.
pub fn resolve_config(
    config_path: Option<&str>,
    source_override: Option<&str>,
) -> Result<AppConfig> {
    let mut config = match (config_path, source_override) {
        (Some(path), _) => AppConfig::parse_from_path(path)?,
        (None, override_value) => {
            let default_path = AppConfig::default_config_path()?;
            if default_path.exists() {
                AppConfig::parse_from_path(&default_path)?
            } else if let Some(value) = override_value {
                AppConfig::with_source(SourceConfig::from_cli_value(value))
            } else {
                bail!(
                    "No configuration found at {}; run `nerkh setup` or pass --source",
                    default_path.display()
                );
            }
        }
    };

    if let Some(value) = source_override {
        config.source = SourceConfig::from_cli_value(value);
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    source_override: Option<&str>,
) -> Result<()> {
    let mut stdout = std::io::stdout();
    run_command_to(command, config_path, source_override, &mut stdout).await
}

/// Like [`run_command`], but renders everything the command prints to `output`.
pub async fn run_command_to<W: Write>(
    command: AppCommand,
    config_path: Option<&str>,
    source_override: Option<&str>,
    output: &mut W,
) -> Result<()> {
    info!("nerkh starting...");

    let config = resolve_config(config_path, source_override)?;
    debug!("Loaded config: {config:#?}");

    let source = providers::build_rate_source(&config.source.location()?)?;
    let trigger = config
        .trigger
        .as_ref()
        .map(|t| HttpTrigger::new(&t.url))
        .transpose()?;
    let trigger = trigger.as_ref().map(|t| t as &dyn RemoteTrigger);
    let mut converter = Converter::new(config.initial_rate());

    match command {
        AppCommand::Rate => cli::rate::run(&mut converter, source.as_ref(), output).await,
        AppCommand::Convert(edit) => {
            cli::convert::run(&mut converter, source.as_ref(), edit, output).await
        }
        AppCommand::Trigger => cli::trigger::run(trigger, output).await,
        AppCommand::Interactive => {
            cli::interactive::run(
                &mut converter,
                source.as_ref(),
                trigger,
                config.refresh_interval(),
                output,
            )
            .await
        }
    }
}
