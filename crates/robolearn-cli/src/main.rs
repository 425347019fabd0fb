//! robolearn CLI — interactive joints and links quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "robolearn",
    version,
    about = "Interactive robotics quiz on joints and links"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Play {
        /// Catalog TOML file (default: built-in robotics catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the session report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: json, html, all, none
        #[arg(long)]
        format: Option<String>,
    },

    /// List the modules of a catalog
    Catalog {
        /// Catalog TOML file (default: built-in robotics catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Validate a catalog TOML file
    Validate {
        /// Path to the catalog file
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Show a saved session report
    Summary {
        /// Report JSON written by `play`
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and catalog files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("robolearn=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            catalog,
            config,
            output,
            format,
        } => commands::play::execute(catalog, config, output, format),
        Commands::Catalog { catalog } => commands::catalog::execute(catalog),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Summary { report, format } => commands::summary::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
