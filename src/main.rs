//! yud - update a dependency across a Yarn workspace
//!
//! Rewrites the version range of one package (or every package) in all
//! package.json files of a project, removes its yarn.lock entries and runs
//! `yarn install`.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use yud::cli::CliArgs;
use yud::orchestrator::{Orchestrator, UpdateOptions};
use yud::output::{OutputSink, TerminalSink};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let mut sink = TerminalSink::new(args.silent)
        .with_color(std::io::stdout().is_terminal())
        .with_dry_run(args.dry_run);

    match run(args, &mut sink).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            sink.error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "yud=debug" } else { "yud=error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs, sink: &mut TerminalSink) -> anyhow::Result<()> {
    let options = UpdateOptions::from_cli(&args)?;
    if args.verbose {
        eprintln!("yud v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", options.cwd.display());
        if options.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let mut orchestrator = Orchestrator::with_npm(options)?;
    orchestrator.run(sink).await?;
    Ok(())
}
