use std::io::{self, IsTerminal, Write};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use phrase_tally::Coordinator;
use phrasecount::{Cli, Report, write_report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let stdin_piped = !io::stdin().is_terminal();
    let sources = cli.sources(stdin_piped);
    info!(
        "reading {} source(s) in {} byte chunks",
        sources.len(),
        cli.chunk_size
    );

    let start = Instant::now();
    let outcome = Coordinator::new(cli.coordinator_config())
        .run(sources)
        .await
        .context("An unknown error occurred!")?;
    info!(
        "tallied {} distinct phrases in {} ms",
        outcome.tally.len(),
        start.elapsed().as_millis()
    );

    let config = cli.report_config();
    let report = Report::from_outcome(&outcome, config.limit);
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &report, config.format).context("writing report")?;
    stdout.flush()?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
