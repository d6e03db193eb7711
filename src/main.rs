use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ecsa::core::advice::DEFAULT_QUESTION;
use ecsa::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Platform id to analyse (defaults to the first configured platform)
    #[arg(short, long, global = true)]
    platform: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display platform totals and product performance
    Summary,
    /// Display profit/loss per product as a bar chart
    Chart,
    /// List platforms and their fee rates
    Platforms,
    /// Ask the AI strategy advisor about a product
    Advise {
        /// Product id (defaults to the first product)
        #[arg(long)]
        product: Option<String>,

        /// Strategic goal or question for the advisor
        #[arg(short, long, default_value = DEFAULT_QUESTION)]
        question: String,
    },
}

impl From<Commands> for ecsa::AppCommand {
    fn from(cmd: Commands) -> ecsa::AppCommand {
        match cmd {
            Commands::Summary => ecsa::AppCommand::Summary,
            Commands::Chart => ecsa::AppCommand::Chart,
            Commands::Platforms => ecsa::AppCommand::Platforms,
            Commands::Advise { product, question } => {
                ecsa::AppCommand::Advise { product, question }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ecsa::cli::setup::setup(),
        Some(cmd) => {
            ecsa::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.platform.as_deref(),
            )
            .await
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
