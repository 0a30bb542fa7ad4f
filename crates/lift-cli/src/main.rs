//! `plift` binary entry point.

use std::sync::Arc;

use clap::Parser;
use lift_config::LiftConfig;
use lift_engine::{MigrationPipeline, PipelineOptions};

mod bootstrap;
mod cli;
mod output;
mod progress;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("plift error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = bootstrap::load_config()?;

    match &cli.command {
        cli::Commands::Import(args) => run_import(&cli, args, &config).await,
        cli::Commands::Validate(args) => run_validate(&cli, args, &config).await,
    }
}

async fn run_import(
    cli: &cli::Cli,
    args: &cli::ImportArgs,
    config: &LiftConfig,
) -> anyhow::Result<()> {
    let extraction = bootstrap::extraction_client(config, &args.source)?;
    let load = bootstrap::load_client(config, args.dry_run)?;
    let options = bootstrap::pipeline_options(config, args);

    let pipeline = MigrationPipeline::new(extraction, load, options)
        .with_progress(Arc::new(progress::StageProgress::new(cli.quiet, cli.format)));

    let result = pipeline.run_import(&args.source).await;
    output::print_import(&result, cli.format)?;

    if !result.success {
        std::process::exit(2);
    }
    Ok(())
}

async fn run_validate(
    cli: &cli::Cli,
    args: &cli::ValidateArgs,
    config: &LiftConfig,
) -> anyhow::Result<()> {
    let extraction = bootstrap::extraction_client(config, &args.source)?;
    // Validation never writes; the in-memory load client satisfies the
    // pipeline without credentials.
    let load = bootstrap::load_client(config, true)?;

    let pipeline = MigrationPipeline::new(extraction, load, PipelineOptions::default());
    let report = pipeline.validate_source(&args.source).await?;
    output::print_validation(&report, cli.format)?;

    if !report.valid {
        std::process::exit(2);
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PLANLIFT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
