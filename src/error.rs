//! Error kinds surfaced by the translation core.
//!
//! Internal plumbing works in `anyhow`; the public operations convert into
//! [`KorpoError`] so callers can tell a failed file read from a failed model call.

use std::path::{Path, PathBuf};

/// Errors returned by the example store, index and translator.
#[derive(Debug, thiserror::Error)]
pub enum KorpoError {
    /// An embedding or generation capability could not be constructed.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A single corpus file could not be read or parsed.
    #[error("failed to ingest {}: {message}", path.display())]
    Ingestion { path: PathBuf, message: String },

    /// Saving or loading an example snapshot failed.
    #[error("persistence failed for {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    /// The index could not answer a query.
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    /// The external generation call failed.
    #[error("generation failed: {0}")]
    Generation(String),
}

impl KorpoError {
    pub(crate) fn ingestion(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Ingestion {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        }
    }

    pub(crate) fn persistence(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Persistence {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        }
    }
}

pub type Result<T, E = KorpoError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path() {
        let err = KorpoError::ingestion(Path::new("/tmp/a.txt"), "bad utf-8");
        assert_eq!(err.to_string(), "failed to ingest /tmp/a.txt: bad utf-8");
    }

    #[test]
    fn alternate_format_keeps_anyhow_chain() {
        let source = anyhow::anyhow!("no such file").context("failed to read snapshot");
        let err = KorpoError::persistence(Path::new("x.json"), source);
        match err {
            KorpoError::Persistence { message, .. } => {
                assert_eq!(message, "failed to read snapshot: no such file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
