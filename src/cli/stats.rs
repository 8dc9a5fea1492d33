use anyhow::Result;
use std::collections::HashSet;

use korpo::config::KorpoConfig;

/// Print a summary of the example snapshot.
pub fn stats(config: &KorpoConfig) -> Result<()> {
    let path = config.resolved_snapshot_path();
    let store = super::open_store(&path)?;

    let examples = store.examples();
    let distinct_sources: HashSet<&str> = examples
        .iter()
        .map(|e| e.source_utterance.as_str())
        .collect();
    let context_lines: usize = examples.iter().map(|e| e.context.len()).sum();
    let avg_context = if examples.is_empty() {
        0.0
    } else {
        context_lines as f64 / examples.len() as f64
    };

    println!("Korpo Example Snapshot");
    println!("======================");
    println!();
    println!("Snapshot:          {}", path.display());
    println!("Examples:          {}", examples.len());
    println!("Distinct sources:  {}", distinct_sources.len());
    println!("Avg context lines: {avg_context:.1}");
    println!();
    println!("Pairing:");
    println!("  Requester:       {}", config.corpus.requester_role);
    println!("  Responder:       {}", config.corpus.responder_role);
    println!("  Lookback:        {} line(s)", config.corpus.lookback);

    Ok(())
}
