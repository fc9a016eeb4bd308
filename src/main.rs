use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use donform::commands::{inspect_command, submit_command, validate_command};

#[derive(Parser)]
#[command(
    name = "donform",
    about = "A CLI tool that validates donation form submissions",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a form values file (YAML or JSON)
    Validate {
        /// Path to the form values file
        file: PathBuf,
    },

    /// Validate a form values file and run the stub submission
    Submit {
        /// Path to the form values file
        file: PathBuf,
    },

    /// Print the parsed values together with the current error map
    Inspect {
        /// Path to the form values file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate { file } => validate_command(&file)?,
        Commands::Submit { file } => submit_command(&file)?,
        Commands::Inspect { file } => inspect_command(&file)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("donform=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("donform=info"), // -v: info messages
        _ => EnvFilter::new("donform=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
