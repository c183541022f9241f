use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use nerkh::core::Edit;
use nerkh::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Rate source URL or file path, overrides the configured source
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Amount {
    /// Amount in EUR to convert to Toman
    #[arg(long)]
    euro: Option<String>,

    /// Amount in Toman to convert to EUR
    #[arg(long)]
    toman: Option<String>,
}

impl From<Amount> for Edit {
    fn from(amount: Amount) -> Edit {
        match (amount.euro, amount.toman) {
            (Some(euro), _) => Edit::euro(euro),
            (None, toman) => Edit::toman(toman.unwrap_or_default()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch and display the current exchange rate
    Rate,
    /// Convert a single amount at the current exchange rate
    Convert(Amount),
    /// Ask the remote service to recompute the exchange rate
    Trigger,
    /// Edit EUR and Toman amounts interactively
    Interactive,
}

impl Commands {
    fn into_app_command(self) -> Option<nerkh::AppCommand> {
        match self {
            Commands::Setup => None,
            Commands::Rate => Some(nerkh::AppCommand::Rate),
            Commands::Convert(amount) => Some(nerkh::AppCommand::Convert(amount.into())),
            Commands::Trigger => Some(nerkh::AppCommand::Trigger),
            Commands::Interactive => Some(nerkh::AppCommand::Interactive),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command.map(Commands::into_app_command) {
        Some(None) => nerkh::cli::setup::setup(),
        Some(Some(cmd)) => {
            nerkh::run_command(cmd, cli.config_path.as_deref(), cli.source.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
