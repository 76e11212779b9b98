use std::path::{Path, PathBuf};

use clap::Parser;
use phrase_tally::{CoordinatorConfig, DEFAULT_CHUNK_SIZE, Source};

use crate::report::{DEFAULT_LIMIT, Format, ReportConfig};

/// Report the most common three-word phrases in text files or piped stdin.
#[derive(Debug, Clone, Parser)]
#[command(name = "phrasecount", version)]
pub struct Cli {
    /// Files to read, relative to the working directory. `-` reads stdin.
    pub paths: Vec<PathBuf>,

    /// Number of phrases to report, at most 100.
    #[arg(
        long,
        env = "PHRASECOUNT_TOP",
        default_value_t = DEFAULT_LIMIT,
        value_parser = parse_top
    )]
    pub top: usize,

    /// Bytes requested per read.
    #[arg(
        long,
        env = "PHRASECOUNT_CHUNK_SIZE",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size
    )]
    pub chunk_size: usize,

    #[arg(long, value_enum, env = "PHRASECOUNT_FORMAT", default_value_t = Format::Text)]
    pub format: Format,

    /// Ignore stdin even when it is piped.
    #[arg(long)]
    pub no_stdin: bool,
}

impl Cli {
    /// Sources in argument order; piped stdin goes last unless `-` already named it.
    pub fn sources(&self, stdin_piped: bool) -> Vec<Source> {
        let mut sources = Vec::with_capacity(self.paths.len() + 1);
        let mut has_stdin = false;
        for path in &self.paths {
            if path == Path::new("-") {
                if !has_stdin {
                    sources.push(Source::Stdin);
                    has_stdin = true;
                }
            } else {
                sources.push(Source::Path(path.clone()));
            }
        }
        if stdin_piped && !self.no_stdin && !has_stdin {
            sources.push(Source::Stdin);
        }
        sources
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            chunk_size: self.chunk_size,
        }
    }

    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            limit: self.top,
            format: self.format,
        }
    }
}

fn parse_top(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(top) if (1..=DEFAULT_LIMIT).contains(&top) => Ok(top),
        Ok(_) => Err(format!("must be between 1 and {DEFAULT_LIMIT}")),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_chunk_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(err) => Err(err.to_string()),
    }
}
