//! CLI `ingest` command — extract example pairs from a corpus directory into the snapshot.

use anyhow::Result;
use std::path::{Path, PathBuf};

use korpo::config::KorpoConfig;
use korpo::dialog::PairingRules;
use korpo::store::{ingest, ExampleStore};

/// Ingest `dir` and write the snapshot to `out` (or the configured snapshot path).
///
/// With `append`, pairs are added after the existing snapshot's; otherwise it is replaced.
pub fn ingest(config: &KorpoConfig, dir: &Path, out: Option<PathBuf>, append: bool) -> Result<()> {
    let out = out.unwrap_or_else(|| config.resolved_snapshot_path());
    let rules = PairingRules::from(&config.corpus);

    let (pairs, report) = ingest::ingest_directory(dir, &config.corpus.extension, &rules)?;

    let mut store = if append {
        super::open_store(&out)?
    } else {
        ExampleStore::new()
    };
    let before = store.len();
    store.append(pairs);
    store.save(&out)?;

    for file in &report.files {
        println!("  {:>4} pairs  {}", file.pairs, file.path.display());
    }
    for failure in &report.failures {
        println!("  FAILED       {} ({})", failure.path.display(), failure.message);
    }
    println!();
    println!(
        "Ingested {} pair(s) from {} file(s); snapshot now holds {} example(s) ({} before).",
        report.total_pairs,
        report.files.len(),
        store.len(),
        before
    );
    println!("Snapshot: {}", out.display());

    Ok(())
}
