use std::collections::HashMap;
use std::io::{self, Write};

use phrase_tally::RunOutcome;
use serde::Serialize;

pub const DEFAULT_LIMIT: usize = 100;

pub const NO_PHRASES_MESSAGE: &str = "The provided file(s) did not have any three word phrases! It could mean each file had two or fewer words. Please try again.";
pub const NO_SOURCES_MESSAGE: &str =
    "No files provided! Please provide a file name as an argument or pipe a file into stdin.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// How the ranked phrases are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub limit: usize,
    pub format: Format,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            format: Format::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPhrase {
    pub phrase: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub no_sources: bool,
    pub missing: Vec<String>,
    pub phrases: Vec<RankedPhrase>,
}

impl Report {
    pub fn from_outcome(outcome: &RunOutcome, limit: usize) -> Self {
        Self {
            no_sources: outcome.no_sources(),
            missing: outcome.missing.clone(),
            phrases: rank(outcome.tally.snapshot(), limit),
        }
    }
}

/// Highest counts first; equal counts in phrase order so output is stable
/// across runs.
pub fn rank(snapshot: HashMap<String, u64>, limit: usize) -> Vec<RankedPhrase> {
    let mut ranked: Vec<RankedPhrase> = snapshot
        .into_iter()
        .map(|(phrase, count)| RankedPhrase { phrase, count })
        .collect();
    ranked.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.phrase.cmp(&b.phrase)));
    ranked.truncate(limit);
    ranked
}

pub fn write_report<W: Write>(out: &mut W, report: &Report, format: Format) -> io::Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
        Format::Text => write_text(out, report),
    }
}

fn write_text<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    for label in &report.missing {
        writeln!(out, "No file found: {label} does not exist!\n")?;
    }
    if report.no_sources {
        return writeln!(out, "{NO_SOURCES_MESSAGE}");
    }
    if report.phrases.is_empty() {
        return writeln!(out, "{NO_PHRASES_MESSAGE}");
    }
    writeln!(
        out,
        "The {} most common 3 word phrases are:",
        report.phrases.len()
    )?;
    for entry in &report.phrases {
        writeln!(out, "{} - {}", entry.phrase, entry.count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(phrase, count)| (phrase.to_string(), *count))
            .collect()
    }

    fn render(report: &Report, format: Format) -> String {
        let mut out = Vec::new();
        write_report(&mut out, report, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn ranks_by_count_then_phrase() {
        let ranked = rank(
            snapshot(&[("b b b", 2), ("a a a", 2), ("c c c", 5), ("d d d", 1)]),
            10,
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.phrase.as_str()).collect();
        assert_eq!(order, vec!["c c c", "a a a", "b b b", "d d d"]);
    }

    #[test]
    fn truncates_to_limit() {
        let entries: HashMap<String, u64> = (0..150u64).map(|i| (format!("p {i} x"), i)).collect();
        let ranked = rank(entries, DEFAULT_LIMIT);
        assert_eq!(ranked.len(), 100);
        assert_eq!(ranked[0].count, 149);
        assert_eq!(ranked[99].count, 50);
    }

    #[test]
    fn text_table() {
        let report = Report {
            phrases: rank(snapshot(&[("i love sandwiches", 2), ("love sandwiches i", 1)]), 100),
            ..Report::default()
        };
        assert_eq!(
            render(&report, Format::Text),
            "The 2 most common 3 word phrases are:\ni love sandwiches - 2\nlove sandwiches i - 1\n"
        );
    }

    #[test]
    fn text_messages() {
        let empty = Report::default();
        assert_eq!(render(&empty, Format::Text), format!("{NO_PHRASES_MESSAGE}\n"));

        let none = Report {
            no_sources: true,
            ..Report::default()
        };
        assert_eq!(render(&none, Format::Text), format!("{NO_SOURCES_MESSAGE}\n"));

        let missing = Report {
            missing: vec!["gone.txt".to_string()],
            ..Report::default()
        };
        assert!(
            render(&missing, Format::Text)
                .starts_with("No file found: gone.txt does not exist!\n\n")
        );
    }

    #[test]
    fn json_shape() {
        let report = Report {
            missing: vec!["gone.txt".to_string()],
            phrases: rank(snapshot(&[("ocean with me", 1)]), 100),
            ..Report::default()
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&report, Format::Json)).unwrap();
        assert_eq!(value["no_sources"], false);
        assert_eq!(value["missing"][0], "gone.txt");
        assert_eq!(value["phrases"][0]["phrase"], "ocean with me");
        assert_eq!(value["phrases"][0]["count"], 1);
    }
}
