//! Line driven converter session.
//!
//! The session owns the converter for its whole lifetime. User input and the
//! periodic refresh timer are multiplexed on one task, so edits and refreshes
//! never run concurrently.

use super::ui;
use crate::core::trigger::trigger_remote_update;
use crate::core::{Converter, Edit, RateSource, RemoteTrigger};
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;

const HELP: &str = "\
Commands:
  e <amount>   set the EUR amount
  t <amount>   set the Toman amount
  r            refresh the exchange rate
  u            ask the remote service to update the rate
  s            show both amounts and the rate
  h            show this help
  q            quit";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Edit(Edit),
    Refresh,
    Trigger,
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_lowercase().as_str() {
        "e" | "eur" | "euro" => SessionCommand::Edit(Edit::euro(rest)),
        "t" | "toman" => SessionCommand::Edit(Edit::toman(rest)),
        "r" | "refresh" => SessionCommand::Refresh,
        "u" | "update" => SessionCommand::Trigger,
        "s" | "show" => SessionCommand::Show,
        "h" | "help" | "?" => SessionCommand::Help,
        "q" | "quit" | "exit" => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.to_string()),
    };
    Some(command)
}

/// Runs a session reading commands from stdin.
pub async fn run<W: Write>(
    converter: &mut Converter,
    source: &dyn RateSource,
    trigger: Option<&dyn RemoteTrigger>,
    refresh_interval: Option<Duration>,
    output: &mut W,
) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_session(converter, source, trigger, refresh_interval, stdin, output).await
}

pub async fn run_session<R, W>(
    converter: &mut Converter,
    source: &dyn RateSource,
    trigger: Option<&dyn RemoteTrigger>,
    refresh_interval: Option<Duration>,
    input: R,
    output: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    converter.refresh_rate(source).await;
    write_rate(converter, output)?;
    writeln!(output, "{HELP}")?;

    let mut lines = input.lines();
    let mut ticker = refresh_interval.map(|period| {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    loop {
        write!(output, "> ")?;
        output.flush()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match parse_command(&line) {
                    None => continue,
                    Some(SessionCommand::Quit) => break,
                    Some(command) => {
                        handle_command(command, converter, source, trigger, output).await?
                    }
                }
            }
            _ = next_tick(&mut ticker) => {
                debug!("Periodic rate refresh");
                converter.refresh_rate(source).await;
                writeln!(output)?;
                write_rate(converter, output)?;
            }
        }
    }

    writeln!(output)?;
    Ok(())
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn handle_command<W: Write>(
    command: SessionCommand,
    converter: &mut Converter,
    source: &dyn RateSource,
    trigger: Option<&dyn RemoteTrigger>,
    output: &mut W,
) -> Result<()> {
    match command {
        SessionCommand::Edit(edit) => {
            let write = converter.apply(edit);
            writeln!(
                output,
                "{}: {}",
                write.field,
                ui::style_text(&write.value, ui::StyleType::Value)
            )?;
        }
        SessionCommand::Refresh => {
            converter.refresh_rate(source).await;
            write_rate(converter, output)?;
        }
        SessionCommand::Trigger => match trigger {
            Some(trigger) => {
                let ack = trigger_remote_update(trigger).await;
                writeln!(output, "{ack}")?;
            }
            None => writeln!(output, "No trigger URL configured")?,
        },
        SessionCommand::Show => {
            writeln!(
                output,
                "EUR: {} | Toman: {}",
                display_or_dash(converter.euro()),
                display_or_dash(converter.toman())
            )?;
            write_rate(converter, output)?;
        }
        SessionCommand::Help => writeln!(output, "{HELP}")?,
        SessionCommand::Unknown(line) => {
            writeln!(output, "Unknown command: {line} (type 'h' for help)")?
        }
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn write_rate<W: Write>(converter: &Converter, output: &mut W) -> Result<()> {
    let rate = if converter.rate().is_set() {
        converter.rate().to_string()
    } else {
        "N/A".to_string()
    };
    writeln!(
        output,
        "Rate: {rate} Toman/EUR ({})",
        ui::style_status(converter.status())
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExchangeRate, RateError, RateSnapshot, TriggerError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves the queued rates in order, failing once the queue is empty.
    struct QueuedSource(Mutex<Vec<f64>>);

    impl QueuedSource {
        fn new(rates: &[f64]) -> Self {
            let mut rates = rates.to_vec();
            rates.reverse();
            Self(Mutex::new(rates))
        }
    }

    #[async_trait]
    impl RateSource for QueuedSource {
        fn name(&self) -> &str {
            "queued"
        }

        async fn fetch_rate(&self) -> Result<RateSnapshot, RateError> {
            let next = self.0.lock().unwrap().pop();
            match next {
                Some(v) => Ok(RateSnapshot {
                    rate: ExchangeRate::new(v).unwrap(),
                    timestamp: None,
                }),
                None => Err(RateError::fetch("queued", "offline")),
            }
        }
    }

    struct OkTrigger;

    #[async_trait]
    impl RemoteTrigger for OkTrigger {
        async fn trigger(&self) -> Result<String, TriggerError> {
            Ok("Update triggered successfully!".to_string())
        }
    }

    async fn run_script(
        converter: &mut Converter,
        source: &dyn RateSource,
        trigger: Option<&dyn RemoteTrigger>,
        script: &str,
    ) -> String {
        let mut output = Vec::new();
        run_session(
            converter,
            source,
            trigger,
            None,
            script.as_bytes(),
            &mut output,
        )
        .await
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command("e 12.5"),
            Some(SessionCommand::Edit(Edit::euro("12.5")))
        );
        assert_eq!(
            parse_command("toman 1,000,000"),
            Some(SessionCommand::Edit(Edit::toman("1,000,000")))
        );
        assert_eq!(parse_command("E"), Some(SessionCommand::Edit(Edit::euro(""))));
        assert_eq!(parse_command("r"), Some(SessionCommand::Refresh));
        assert_eq!(parse_command("update"), Some(SessionCommand::Trigger));
        assert_eq!(parse_command("q"), Some(SessionCommand::Quit));
        assert_eq!(
            parse_command("x 1"),
            Some(SessionCommand::Unknown("x 1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_session_converts_with_fetched_rate() {
        let source = QueuedSource::new(&[95000.0]);
        let mut converter = Converter::default();

        let output = run_script(&mut converter, &source, None, "e 2\nt 190000\nq\n").await;

        assert!(output.contains("Rate: 95000 Toman/EUR"));
        assert!(output.contains("190,000.00"));
        assert!(output.contains("2.00"));
        assert_eq!(converter.euro(), "2.00");
        assert_eq!(converter.toman(), "190000");
    }

    #[tokio::test]
    async fn test_session_refresh_failure_keeps_rate() {
        let source = QueuedSource::new(&[87120.0]);
        let mut converter = Converter::default();

        let output = run_script(&mut converter, &source, None, "r\ne 1\n").await;

        assert!(output.contains("Error fetching price"));
        assert!(output.contains("87,120.00"));
        assert_eq!(converter.rate().value(), 87120.0);
    }

    #[tokio::test]
    async fn test_session_trigger() {
        let source = QueuedSource::new(&[87120.0]);
        let mut converter = Converter::default();

        let trigger: &dyn RemoteTrigger = &OkTrigger;
        let output = run_script(&mut converter, &source, Some(trigger), "u\nq\n").await;
        assert!(output.contains("Update triggered successfully!"));
        assert_eq!(converter.rate().value(), 87120.0);

        let output = run_script(&mut converter, &source, None, "u\n").await;
        assert!(output.contains("No trigger URL configured"));
    }

    #[tokio::test]
    async fn test_session_show_and_unknown() {
        let source = QueuedSource::new(&[2.0]);
        let mut converter = Converter::default();

        let output = run_script(&mut converter, &source, None, "s\ne 10\ns\nbogus\n").await;
        assert!(output.contains("EUR: - | Toman: -"));
        assert!(output.contains("EUR: 10 | Toman: 20.00"));
        assert!(output.contains("Unknown command: bogus"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_refresh_updates_rate_only() {
        use tokio::io::AsyncWriteExt;

        let source = QueuedSource::new(&[87120.0, 95000.0]);
        let mut converter = Converter::default();

        let (mut client, server) = tokio::io::duplex(64);
        let typist = tokio::spawn(async move {
            client.write_all(b"e 1\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(301)).await;
            client.write_all(b"s\nq\n").await.unwrap();
        });

        let mut output = Vec::new();
        run_session(
            &mut converter,
            &source,
            None,
            Some(Duration::from_secs(300)),
            BufReader::new(server),
            &mut output,
        )
        .await
        .unwrap();
        typist.await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Rate: 87120 Toman/EUR"));
        assert!(output.contains("Rate: 95000 Toman/EUR"));
        assert_eq!(converter.rate().value(), 95000.0);
        // the Toman field keeps what the earlier edit derived
        assert_eq!(converter.toman(), "87,120.00");
        assert!(output.contains("EUR: 1 | Toman: 87,120.00"));
    }
}
