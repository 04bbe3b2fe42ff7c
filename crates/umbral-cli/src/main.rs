mod commands;
mod summary;
mod timing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "umbral", about = "Locally-adaptive mean thresholding for grayscale images")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show decoded image metadata and pixel statistics
    Info(commands::info::InfoArgs),
    /// Threshold an image with the distributed pipeline
    Run(commands::run::RunArgs),
    /// Sweep worker counts and log a timing row per count
    Bench(commands::bench::BenchArgs),
    /// Print or save a default job config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Bench(args) => commands::bench::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
