use phrase_tokenizer::tokenize;
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, warn};

use crate::source::{Source, SourceError};
use crate::tally::PhraseTally;
use crate::window::{SlidingWindow, WindowStats};

/// Bytes requested per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct CoordinatorConfig {
    pub chunk_size: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("source pipeline did not complete: {0}")]
    Join(#[from] JoinError),
}

/// Result of one completed source pipeline.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub label: String,
    pub stats: WindowStats,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub tally: PhraseTally,
    /// Pipelines that ran to the end of their data, in completion order.
    pub completed: Vec<SourceReport>,
    /// Sources skipped because they do not exist.
    pub missing: Vec<String>,
    pub source_count: usize,
}

impl RunOutcome {
    pub fn no_sources(&self) -> bool {
        self.source_count == 0
    }
}

/// Runs one pipeline per source against a shared tally and joins them all.
#[derive(Debug, Clone)]
pub struct Coordinator {
    config: CoordinatorConfig,
    tally: PhraseTally,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::with_tally(config, PhraseTally::new())
    }

    pub fn with_tally(config: CoordinatorConfig, tally: PhraseTally) -> Self {
        Self { config, tally }
    }

    /// Drive every source to completion.
    ///
    /// A missing source is skipped and recorded in [`RunOutcome::missing`].
    /// Any other source error fails the run as soon as it is seen; pipelines
    /// still running are detached rather than awaited.
    pub async fn run<I>(self, sources: I) -> Result<RunOutcome, CoordinatorError>
    where
        I: IntoIterator<Item = Source>,
    {
        let chunk_size = self.config.chunk_size.max(1);
        let mut pipelines = JoinSet::new();
        for source in sources {
            let tally = self.tally.clone();
            pipelines.spawn(drive(source, tally, chunk_size));
        }

        let source_count = pipelines.len();
        let mut outcome = RunOutcome {
            tally: self.tally,
            completed: Vec::with_capacity(source_count),
            missing: Vec::new(),
            source_count,
        };
        if source_count == 0 {
            debug!("no sources supplied");
            return Ok(outcome);
        }

        while let Some(joined) = pipelines.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(err) => {
                    error!("source pipeline aborted: {err}");
                    pipelines.detach_all();
                    return Err(err.into());
                }
            };
            match result {
                Ok(report) => outcome.completed.push(report),
                Err(SourceError::NotFound { label }) => {
                    warn!("skipping {label}: not found");
                    outcome.missing.push(label);
                }
                Err(err) => {
                    error!("{err}");
                    pipelines.detach_all();
                    return Err(err.into());
                }
            }
        }

        debug!(
            "{} of {} sources completed, {} distinct phrases",
            outcome.completed.len(),
            source_count,
            outcome.tally.len()
        );
        Ok(outcome)
    }
}

async fn drive(
    source: Source,
    tally: PhraseTally,
    chunk_size: usize,
) -> Result<SourceReport, SourceError> {
    let mut reader = source.open(chunk_size).await?;
    let label = reader.label().to_string();
    debug!("reading {label}");

    let mut window = SlidingWindow::new();
    while let Some(text) = reader.next_chunk().await? {
        window.on_chunk(tokenize(&text), &tally);
    }
    let stats = window.finish(&tally);
    debug!("{label}: {} words, {} phrases", stats.words, stats.phrases);
    Ok(SourceReport { label, stats })
}
