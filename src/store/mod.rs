//! Append-only collection of example pairs.
//!
//! [`ExampleStore`] keeps pairs in insertion order behind an `Arc` so the index
//! can hold a consistent snapshot while the store keeps growing. Pairs are never
//! edited in place: the store is only appended to or replaced wholesale.

pub mod ingest;
pub mod snapshot;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use crate::error::{KorpoError, Result};
use types::ExamplePair;

#[derive(Debug, Clone, Default)]
pub struct ExampleStore {
    examples: Arc<Vec<ExamplePair>>,
}

impl ExampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: Vec<ExamplePair>) -> Self {
        Self {
            examples: Arc::new(pairs),
        }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[ExamplePair] {
        &self.examples
    }

    /// Cheap handle to the current contents.
    pub fn snapshot(&self) -> Arc<Vec<ExamplePair>> {
        Arc::clone(&self.examples)
    }

    /// Append pairs, keeping their order after the existing ones.
    pub fn append(&mut self, pairs: impl IntoIterator<Item = ExamplePair>) {
        Arc::make_mut(&mut self.examples).extend(pairs);
    }

    /// Replace the whole contents.
    pub fn replace(&mut self, pairs: Vec<ExamplePair>) {
        self.examples = Arc::new(pairs);
    }

    /// Serialize every pair to `path` as a JSON array.
    pub fn save(&self, path: &Path) -> Result<()> {
        snapshot::write_snapshot(path, &self.examples)
            .map_err(|e| KorpoError::persistence(path, e))?;
        tracing::info!(path = %path.display(), examples = self.len(), "examples saved");
        Ok(())
    }

    /// Replace the contents with the snapshot at `path`.
    ///
    /// The file is fully parsed before anything is replaced, so a failed load
    /// leaves the store as it was.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let pairs =
            snapshot::read_snapshot(path).map_err(|e| KorpoError::persistence(path, e))?;
        tracing::info!(path = %path.display(), examples = pairs.len(), "examples loaded");
        self.replace(pairs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: &str, target: &str) -> ExamplePair {
        ExamplePair {
            source_utterance: source.into(),
            target_utterance: target.into(),
            context: vec![],
        }
    }

    #[test]
    fn append_preserves_order() {
        let mut store = ExampleStore::new();
        store.append(vec![pair("a", "1")]);
        store.append(vec![pair("b", "2"), pair("c", "3")]);
        let sources: Vec<_> = store
            .examples()
            .iter()
            .map(|p| p.source_utterance.as_str())
            .collect();
        assert_eq!(sources, vec!["a", "b", "c"]);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_appends() {
        let mut store = ExampleStore::from_pairs(vec![pair("a", "1")]);
        let before = store.snapshot();
        store.append(vec![pair("b", "2")]);
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_contents() {
        let mut store = ExampleStore::from_pairs(vec![pair("a", "1")]);
        let err = store
            .load(Path::new("/nonexistent/korpo/examples.json"))
            .unwrap_err();
        assert!(matches!(err, KorpoError::Persistence { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_rejects_blank_records_and_keeps_contents() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("examples.json");
        std::fs::write(
            &path,
            r#"[{"source_utterance": "   ", "target_utterance": "", "context": []}]"#,
        )
        .unwrap();

        let mut store = ExampleStore::from_pairs(vec![pair("a", "1")]);
        let err = store.load(&path).unwrap_err();
        assert!(matches!(err, KorpoError::Persistence { .. }));
        assert_eq!(store.examples()[0].source_utterance, "a");
    }
}
