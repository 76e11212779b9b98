use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use phrase_tally::{Coordinator, CoordinatorConfig, Source};

#[tokio::main]
async fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p phrase-tally --example tally_file -- <path-to-text>")?;

    let outcome = Coordinator::new(CoordinatorConfig::default())
        .run([Source::Path(path.clone())])
        .await
        .with_context(|| format!("tallying {}", path.display()))?;

    if !outcome.missing.is_empty() {
        println!("{} does not exist", path.display());
        return Ok(());
    }

    for report in &outcome.completed {
        println!("{}", report.label);
        println!("  words:            {}", report.stats.words);
        println!("  phrases:          {}", report.stats.phrases);
    }
    println!("  distinct phrases: {}", outcome.tally.len());

    let mut top: Vec<_> = outcome.tally.snapshot().into_iter().collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (phrase, count) in top.into_iter().take(10) {
        println!("  {count:>6}  {phrase}");
    }
    Ok(())
}
