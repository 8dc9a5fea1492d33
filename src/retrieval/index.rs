//! Exact nearest-neighbor index over example utterances.
//!
//! Every pair is embedded twice, once per register, so a query can be matched
//! against whichever side of the pair is written in the query's register.
//! Search is a flat scan with squared Euclidean distance.

use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::embedding::EmbeddingProvider;
use crate::error::{KorpoError, Result};
use crate::store::types::{ExamplePair, Register};

/// Texts per `embed_batch` call when building an index.
pub const BATCH_SIZE: usize = 32;

/// Brute-force vector table with one fixed dimensionality.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build from vectors that must all share one length.
    pub fn new(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dim = vectors.first().map_or(0, Vec::len);
        if let Some(bad) = vectors.iter().position(|v| v.len() != dim) {
            return Err(KorpoError::Retrieval(format!(
                "vector {bad} has {} dimensions, expected {dim}",
                vectors[bad].len()
            )));
        }
        Ok(Self { dim, vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The `k` nearest rows as `(row, distance)`, closest first. Equal distances
    /// keep row order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dim {
            return Err(KorpoError::Retrieval(format!(
                "query has {} dimensions, index has {}",
                query.len(),
                self.dim
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(row, v)| (row, squared_l2(query, v)))
            .collect();
        // stable sort keeps insertion order on ties
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);
        Ok(scored)
    }
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// An immutable index built from one version of the example store.
#[derive(Debug)]
pub struct IndexSnapshot {
    examples: Arc<Vec<ExamplePair>>,
    corporate: FlatIndex,
    plain: FlatIndex,
}

impl IndexSnapshot {
    pub fn build(provider: &dyn EmbeddingProvider, examples: Arc<Vec<ExamplePair>>) -> Result<Self> {
        let corporate = embed_register(provider, &examples, Register::Corporate)?;
        let plain = embed_register(provider, &examples, Register::Plain)?;
        Ok(Self {
            examples,
            corporate,
            plain,
        })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    fn table(&self, register: Register) -> &FlatIndex {
        match register {
            Register::Corporate => &self.corporate,
            Register::Plain => &self.plain,
        }
    }
}

fn embed_register(
    provider: &dyn EmbeddingProvider,
    examples: &[ExamplePair],
    register: Register,
) -> Result<FlatIndex> {
    let texts: Vec<&str> = examples.iter().map(|e| e.utterance(register)).collect();
    let mut vectors = Vec::with_capacity(texts.len());
    for chunk in texts.chunks(BATCH_SIZE) {
        let batch = provider.embed_batch(chunk).map_err(|e| {
            KorpoError::Retrieval(format!("failed to embed {register} examples: {e:#}"))
        })?;
        vectors.extend(batch);
    }
    if vectors.len() != texts.len() {
        return Err(KorpoError::Retrieval(format!(
            "embedding provider returned {} vectors for {} texts",
            vectors.len(),
            texts.len()
        )));
    }
    FlatIndex::new(vectors)
}

/// A retrieved example and its distance to the query.
#[derive(Debug, Clone, Serialize)]
pub struct Neighbor {
    /// Position of the example in the store.
    pub position: usize,
    pub distance: f32,
    pub example: ExamplePair,
}

/// Swappable handle to the current [`IndexSnapshot`].
///
/// Rebuilds construct a new snapshot without holding the lock and then swap the
/// pointer, so a query always runs against one consistent snapshot.
#[derive(Debug, Default)]
pub struct EmbeddingIndex {
    current: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl EmbeddingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index with one built from `examples`. An empty list unsets it.
    pub fn rebuild(
        &self,
        provider: &dyn EmbeddingProvider,
        examples: Arc<Vec<ExamplePair>>,
    ) -> Result<()> {
        if examples.is_empty() {
            tracing::warn!("no examples to index");
            self.swap(None);
            return Ok(());
        }

        let snapshot = IndexSnapshot::build(provider, examples)?;
        tracing::info!(
            examples = snapshot.len(),
            dim = snapshot.corporate.dim(),
            "example index rebuilt"
        );
        self.swap(Some(Arc::new(snapshot)));
        Ok(())
    }

    fn swap(&self, next: Option<Arc<IndexSnapshot>>) {
        // a poisoned lock still holds a whole pointer, so keep using it
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
    }

    pub fn snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of indexed examples, zero when unset.
    pub fn len(&self) -> usize {
        self.snapshot().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `k` examples whose `register` utterance is closest to `text`.
    ///
    /// Returns an empty list when no index has been built.
    pub fn query(
        &self,
        provider: &dyn EmbeddingProvider,
        text: &str,
        register: Register,
        k: usize,
    ) -> Result<Vec<Neighbor>> {
        let Some(snapshot) = self.snapshot() else {
            tracing::warn!("example index not initialized, returning no examples");
            return Ok(vec![]);
        };
        if k == 0 {
            return Ok(vec![]);
        }

        let query = provider
            .embed(text)
            .map_err(|e| KorpoError::Retrieval(format!("failed to embed query: {e:#}")))?;

        let hits = snapshot.table(register).search(&query, k)?;
        Ok(hits
            .into_iter()
            .map(|(position, distance)| Neighbor {
                position,
                distance,
                example: snapshot.examples[position].clone(),
            })
            .collect())
    }
}
