//! JSON snapshot persistence for example pairs.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::store::types::ExamplePair;

/// Write `examples` as a pretty-printed JSON array. Uses atomic write (tmp + rename).
pub fn write_snapshot(path: &Path, examples: &[ExamplePair]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(examples).context("failed to serialize examples")?;

    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, json)
        .with_context(|| format!("failed to write temp file: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path).context("failed to rename temp file")?;

    Ok(())
}

/// Read a JSON array of example pairs.
///
/// Every record must have non-blank source and target utterances; the first
/// record that doesn't fails the whole read.
pub fn read_snapshot(path: &Path) -> Result<Vec<ExamplePair>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
    let examples: Vec<ExamplePair> =
        serde_json::from_str(&json).context("failed to parse snapshot JSON")?;

    if let Some(index) = examples.iter().position(|p| {
        p.source_utterance.trim().is_empty() || p.target_utterance.trim().is_empty()
    }) {
        bail!("snapshot record {index} has an empty utterance");
    }

    Ok(examples)
}
