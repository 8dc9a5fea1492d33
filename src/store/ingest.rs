//! Directory ingestion: read every corpus file and extract its pairs.
//!
//! A failing file is logged and recorded in the [`IngestReport`]; the rest of the
//! directory is still processed.

use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::dialog::{extract_pairs, PairingRules};
use crate::error::{KorpoError, Result};
use crate::store::types::ExamplePair;

/// Per-file outcome of an ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub pairs: usize,
}

/// Summary of an ingestion run.
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    /// Files that were read successfully, in processing order.
    pub files: Vec<FileReport>,
    /// Files that failed, with the reason.
    pub failures: Vec<IngestFailure>,
    pub total_pairs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Parse one corpus file into example pairs.
pub fn ingest_file(path: &Path, rules: &PairingRules) -> Result<Vec<ExamplePair>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file: {}", path.display()))
        .map_err(|e| KorpoError::ingestion(path, e))?;
    let lines: Vec<&str> = contents.lines().collect();
    Ok(extract_pairs(&lines, rules))
}

/// List the files in `dir` whose extension matches, sorted by file name.
pub fn corpus_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read corpus directory: {}", dir.display()))
        .map_err(|e| KorpoError::ingestion(dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(extension))
        .collect();
    files.sort();
    Ok(files)
}

/// Ingest every matching file in `dir`, returning pairs in file order.
///
/// Only an unreadable directory is an error; individual file failures go into the report.
pub fn ingest_directory(
    dir: &Path,
    extension: &str,
    rules: &PairingRules,
) -> Result<(Vec<ExamplePair>, IngestReport)> {
    tracing::info!(dir = %dir.display(), extension, "ingesting corpus directory");

    let mut pairs = Vec::new();
    let mut report = IngestReport::default();

    for path in corpus_files(dir, extension)? {
        match ingest_file(&path, rules) {
            Ok(found) => {
                tracing::info!(file = %path.display(), pairs = found.len(), "corpus file processed");
                report.files.push(FileReport {
                    path,
                    pairs: found.len(),
                });
                pairs.extend(found);
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping corpus file");
                report.failures.push(IngestFailure {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }

    report.total_pairs = pairs.len();
    tracing::info!(
        files = report.files.len(),
        failed = report.failures.len(),
        pairs = report.total_pairs,
        "corpus ingestion finished"
    );

    Ok((pairs, report))
}
