//! Playground XYZ adapter CLI.
//!
//! This tool runs the adapter's operations over JSON files so the mapping can
//! be inspected without a header-bidding host:
//! - Validating bid requests
//! - Building the outgoing `OpenRTB` request
//! - Interpreting a saved partner response
//! - Listing user-sync pixels

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use playgroundxyz_common::adapter::SyncOptions;

mod commands;
mod error;
mod logging;

use commands::BuildOptions;
use error::CliError;

#[derive(Parser)]
#[command(name = "pgxyz")]
#[command(about = "Playground XYZ bid adapter CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file (defaults to the embedded config)
    #[arg(long, short, global = true, env = "PLAYGROUNDXYZ_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check which bid requests carry the required params
    Validate {
        /// JSON file holding an array of bid requests
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Build the outgoing request for the valid bid requests
    Build {
        /// JSON file holding an array of bid requests
        #[arg(long, short)]
        file: PathBuf,

        /// JSON file holding the bidder request context
        #[arg(long)]
        context: Option<PathBuf>,

        /// GDPR consent string to pass through
        #[arg(long)]
        consent: Option<String>,

        /// Whether GDPR applies to this request
        #[arg(long)]
        gdpr_applies: Option<bool>,
    },

    /// Interpret a saved partner response body
    Interpret {
        /// File holding the raw response body (may be empty)
        #[arg(long, short)]
        file: PathBuf,

        /// JSON file holding the bid requests the response answers
        #[arg(long, short)]
        bids: PathBuf,
    },

    /// List user-sync pixels
    Syncs {
        /// Host allows iframe syncs
        #[arg(long)]
        iframe_enabled: bool,

        /// Host allows image syncs
        #[arg(long)]
        pixel_enabled: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logger(cli.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let settings = commands::load_settings(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Validate { file } => commands::validate(&settings, &file)?,
        Commands::Build {
            file,
            context,
            consent,
            gdpr_applies,
        } => commands::build(
            &settings,
            &file,
            BuildOptions {
                context_file: context.as_deref(),
                consent_string: consent,
                gdpr_applies,
            },
        )?,
        Commands::Interpret { file, bids } => commands::interpret(&settings, &bids, &file)?,
        Commands::Syncs {
            iframe_enabled,
            pixel_enabled,
        } => commands::syncs(
            &settings,
            SyncOptions {
                iframe_enabled,
                pixel_enabled,
            },
        )?,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}
