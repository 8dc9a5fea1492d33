//! Retrieval-augmented translation between corporate speak and plain language.
//!
//! Korpo turns labeled dialog transcripts into few-shot examples and uses the
//! closest ones to steer a text generation call:
//!
//! ```text
//! corpus files ─► dialog parser ─► pair extractor ─► example store
//!                                                        │
//!                                   embedding index ◄────┘
//!                                         │
//!   request ─► embed ─► top-k examples ─► prompt ─► generation ─► result + state
//! ```
//!
//! # Architecture
//!
//! - **Corpus**: plain-text files, one `[Role]: Utterance` turn per line
//! - **Embeddings**: Local ONNX Runtime with all-MiniLM-L6-v2 (384 dimensions)
//! - **Index**: exact flat search, squared Euclidean distance, one table per register
//! - **Generation**: OpenAI-compatible chat completions over HTTP
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`dialog`] — Transcript line parsing and translation pair extraction
//! - [`store`] — Append-only example store, directory ingestion, JSON snapshots
//! - [`embedding`] — Text-to-vector embedding pipeline via ONNX Runtime
//! - [`retrieval`] — Nearest-neighbor index and prompt assembly
//! - [`generation`] — Text completion capability
//! - [`translator`] — The orchestrating translator, its state tracker and instance cache

pub mod config;
pub mod dialog;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod retrieval;
pub mod store;
pub mod translator;

pub use error::KorpoError;
pub use store::types::{ExamplePair, Register};
pub use translator::{Direction, TranslationRequest, TranslationResult, Translator};
