//! Lumen CLI - batch image filtering with parallel scaling benchmarks.
//!
//! Lumen pushes every image of an input tree through a fixed five-stage
//! filter chain (grayscale, Gaussian blur, Sobel, sharpen, brightness),
//! mirrors the results into an output tree, and reports how wall-clock time
//! scales with the number of workers.
//!
//! # Usage
//!
//! ```bash
//! # Benchmark with 1, 2 and 4 workers (the default)
//! lumen bench data/input -o data/output
//!
//! # Custom worker counts, JSON report
//! lumen bench photos/ -o out/ --workers 1,2,4,8 --format json
//!
//! # Single batch run with 4 workers
//! lumen process photos/ -o out/ --workers 4
//!
//! # View configuration
//! lumen config show
//! ```

use clap::{Parser, Subcommand};
use lumen_core::Config;
use std::path::{Path, PathBuf};

use cli::config::{ConfigArgs, ConfigCommand};

mod cli;
mod logging;

/// Lumen - batch image filtering with parallel scaling benchmarks.
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "LUMEN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the filter pipeline once per worker count and report scaling
    Bench(cli::bench::BenchArgs),

    /// Run the filter pipeline once with a single worker count
    Process(cli::process::ProcessArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), &cli.command)?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Lumen v{}", lumen_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Bench(args) => cli::bench::execute(args, config).await,
        Commands::Process(args) => cli::process::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config, cli.config).await,
    }
}

/// Load the configuration the command runs with.
///
/// `config init` creates the file, so it starts from defaults instead of
/// reading a path that may not exist yet.
fn load_config(explicit: Option<&Path>, command: &Commands) -> anyhow::Result<Config> {
    if let Commands::Config(ConfigArgs {
        command: ConfigCommand::Init { .. },
    }) = command
    {
        return Ok(Config::default());
    }

    // Logging isn't initialized yet, so use eprintln for config warnings.
    match explicit {
        Some(path) => Ok(Config::load_from(path)?),
        None => match Config::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `lumen config path`."
                );
                Ok(Config::default())
            }
        },
    }
}
