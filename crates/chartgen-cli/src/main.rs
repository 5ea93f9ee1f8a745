mod batch;
mod cli;
mod discovery;
mod prompter;

use anyhow::{Context, Result, bail};
use chartgen_core::{ChartGenerator, ReductionConfig};
use clap::Parser;
use cli::Args;
use prompter::{AutoConfirm, Prompter, StdinPrompter};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if args.verbose {
        "chartgen=debug,chartgen_core=debug"
    } else {
        "chartgen=info,chartgen_core=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = match &args.config {
        Some(path) => ReductionConfig::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => ReductionConfig::default(),
    };
    let generator = ChartGenerator::new(args.apply_to(settings))?;

    let files = discovery::find_charts(&args.path, args.batch)?;
    let prompter: Box<dyn Prompter> = if args.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(StdinPrompter)
    };

    if files.len() > 1 {
        for file in &files {
            println!("{}", file.display());
        }
        if !prompter.confirm("Are these files ok?") {
            bail!("Aborted");
        }
    }
    if args.in_place && !prompter.confirm("Will replace existing files. ARE YOU SURE??") {
        bail!("Aborted");
    }

    info!("Processing {} file(s)", files.len());
    let report = batch::run_batch(&generator, &files, args.in_place, args.jobs)?;
    report.print_summary();

    if report.failed() > 0 {
        bail!("{} of {} file(s) failed", report.failed(), files.len());
    }
    Ok(())
}
