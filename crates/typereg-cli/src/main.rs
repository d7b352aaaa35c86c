use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use typereg::GeneratorConfig;

#[derive(Parser)]
#[command(name = "typereg", version)]
#[command(about = "Generate registration code for types marked with //+discovery:", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Package to scan: a package or workspace directory, or `dir/...` for
    /// every package below `dir`
    package: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug) // Show target module in debug mode
        .with_writer(std::io::stderr)
        .init();

    let config = GeneratorConfig::default();
    let report = typereg::generate(&cli.package, &config)
        .with_context(|| format!("generating registrations for {:?}", cli.package))?;

    info!(
        "Registered {} type(s) from {} unit(s)",
        report.types.len(),
        report.units
    );
    Ok(())
}
