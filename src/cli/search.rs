use anyhow::Result;
use std::sync::Arc;

use korpo::config::KorpoConfig;
use korpo::embedding::{self, EmbeddingProvider};
use korpo::retrieval::EmbeddingIndex;
use korpo::Direction;

/// Show the examples closest to `query` from the terminal.
pub async fn search(
    config: &KorpoConfig,
    query: &str,
    direction: Direction,
    k: Option<usize>,
) -> Result<()> {
    let store = super::open_store(&config.resolved_snapshot_path())?;
    if store.is_empty() {
        println!("No examples. Run `korpo ingest <dir>` first.");
        return Ok(());
    }

    let provider = embedding::create_provider(&config.embedding)?;
    let embedding_provider: Arc<dyn EmbeddingProvider> = Arc::from(provider);

    let examples = store.snapshot();
    let query_text = query.to_string();
    let k = k.unwrap_or(config.retrieval.top_k);
    let ep = Arc::clone(&embedding_provider);
    let neighbors = tokio::task::spawn_blocking(move || {
        let index = EmbeddingIndex::new();
        index.rebuild(ep.as_ref(), examples)?;
        index.query(ep.as_ref(), &query_text, direction.source(), k)
    })
    .await??;

    println!(
        "{} nearest example(s) in the {} register:\n",
        neighbors.len(),
        direction.source()
    );

    for (i, hit) in neighbors.iter().enumerate() {
        println!(
            "  {}. #{} (distance: {:.4})",
            i + 1,
            hit.position,
            hit.distance
        );
        println!("     korpo: {}", hit.example.source_utterance);
        println!("     plain: {}", hit.example.target_utterance);
        println!();
    }

    Ok(())
}
