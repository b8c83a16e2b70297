use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use toolhub::{
    commands::{self, CheckNamesOptions},
    logging,
};

#[derive(Parser)]
#[command(name = "toolhub", version, about = "Inspect and expose tool names for MCP clients")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// YAML configuration file
    #[arg(long, env = "TOOLHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Tool definition file or directory (repeatable)
    #[arg(long = "tools", value_name = "PATH")]
    tools: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report tool names longer than the client limit
    CheckNames {
        #[command(flatten)]
        source: SourceArgs,

        /// Maximum allowed tool name length
        #[arg(long, default_value_t = 64)]
        max_len: usize,

        /// Check exposed names with automatic shortening enabled
        #[arg(long)]
        test_shortening: bool,

        /// Maximum length for shortened names [default: configured naming budget]
        #[arg(long)]
        shortening_max_len: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print `exposed -> original` for every tool
    Expose {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the exposed tool list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.log_json).context("failed to initialize logging")?;

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::CheckNames {
            source,
            max_len,
            test_shortening,
            shortening_max_len,
            json,
        } => {
            let config = commands::load_config(source.config.as_deref(), &source.tools)
                .await
                .context("failed to load configuration")?;
            let registry = commands::build_registry(&config)
                .await
                .context("failed to load tool definitions")?;

            let options = CheckNamesOptions {
                max_len,
                test_shortening,
                shortening_max_len,
                json,
            };
            // Non-zero exit when violations are present
            if commands::check_names(&registry, options, &mut stdout)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Expose { source, json } => {
            let config = commands::load_config(source.config.as_deref(), &source.tools)
                .await
                .context("failed to load configuration")?;
            let registry = commands::build_registry(&config)
                .await
                .context("failed to load tool definitions")?;

            commands::expose(&registry, json, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
