mod helpers;

use std::sync::Arc;

use helpers::{pair, WordEmbedder};
use korpo::retrieval::EmbeddingIndex;
use korpo::Register;

fn corpus() -> Arc<Vec<korpo::ExamplePair>> {
    Arc::new(vec![
        pair("Potrzebuję to na EOD", "Na dziś"),
        pair("Zróbmy quick sync", "Pogadajmy"),
        pair("Domknijmy ten case", "Skończmy to"),
        pair("Zaadresujmy ten issue", "Naprawmy błąd"),
        pair("Potrzebuję feedbacku na EOD", "Powiedz co myślisz do wieczora"),
    ])
}

#[test]
fn never_returns_more_than_k_or_corpus_size() {
    let index = EmbeddingIndex::new();
    index.rebuild(&WordEmbedder, corpus()).unwrap();

    for k in 0..8 {
        let hits = index
            .query(&WordEmbedder, "Potrzebuję na EOD", Register::Corporate, k)
            .unwrap();
        assert_eq!(hits.len(), k.min(5), "k = {k}");
    }
}

#[test]
fn results_are_ordered_by_non_decreasing_distance() {
    let index = EmbeddingIndex::new();
    index.rebuild(&WordEmbedder, corpus()).unwrap();

    let hits = index
        .query(&WordEmbedder, "Potrzebuję quick feedbacku", Register::Corporate, 5)
        .unwrap();
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));

    let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 5, "every example appears once");
}

#[test]
fn shared_words_rank_closer() {
    let index = EmbeddingIndex::new();
    index.rebuild(&WordEmbedder, corpus()).unwrap();

    let hits = index
        .query(&WordEmbedder, "Potrzebuję to na EOD", Register::Corporate, 2)
        .unwrap();
    assert_eq!(hits[0].position, 0);
    assert_eq!(hits[0].distance, 0.0);
    assert_eq!(hits[1].position, 4);
}

#[test]
fn empty_store_query_returns_nothing() {
    let index = EmbeddingIndex::new();
    index.rebuild(&WordEmbedder, Arc::new(vec![])).unwrap();
    let hits = index
        .query(&WordEmbedder, "cokolwiek", Register::Plain, 3)
        .unwrap();
    assert!(hits.is_empty());
}
