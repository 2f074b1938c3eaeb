// assessjoin - join recorded mortgages to property assessments

mod exit_codes;
mod join;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use exit_codes::EXIT_SUCCESS;

/// Environment variable holding the log filter (`EnvFilter` syntax).
const LOG_ENV: &str = "ASSESSJOIN_LOG";

#[derive(Parser)]
#[command(name = "assessjoin")]
#[command(about = "Join recent mortgage recordings to property-assessment records")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter recent mortgages and attach each one's assessed value
    #[command(after_help = "\
Examples:
  assessjoin run --properties-csv roll.csv --mortgages-csv recordings.csv
  assessjoin run --config county.join.toml --years 3
  assessjoin run --config county.join.toml --output out/join.csv --json

Set ASSESSJOIN_LOG=debug to see which column satisfied each field.")]
    Run(join::RunArgs),

    /// Check a config file without fetching anything
    #[command(after_help = "\
Examples:
  assessjoin validate county.join.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nlinkage: assessjoin-linkage ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

/// Log records (including the engine's `log` output) go to stderr so they
/// never mix with `--json` on stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Run(args) => join::cmd_run(args),
        Commands::Validate { config } => join::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
