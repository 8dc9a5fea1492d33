//! Retrieval-augmented translator.
//!
//! [`Translator`] owns the example store, the embedding index over it, and the
//! operation state. A translation embeds the input, retrieves the closest examples
//! for the input's register, assembles a prompt, and makes one generation call,
//! optionally followed by a best-effort naming call.

pub mod cache;
pub mod state;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::KorpoConfig;
use crate::dialog::PairingRules;
use crate::embedding::{self, EmbeddingProvider};
use crate::error::{KorpoError, Result};
use crate::generation::{self, CompletionRequest, GenerationProvider};
use crate::retrieval::prompt::{self, PromptLimits};
use crate::retrieval::{EmbeddingIndex, Neighbor};
use crate::store::ingest::{self, IngestReport};
use crate::store::types::ExamplePair;
use crate::store::ExampleStore;

pub use cache::InstanceCache;
pub use state::{StateTracker, StatusSnapshot, TranslatorState};
pub use types::{Direction, TranslationRequest, TranslationResult};

/// Tunables for one translator instance.
#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    pub top_k: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub name_max_tokens: u32,
    pub generate_names: bool,
    pub limits: PromptLimits,
    pub rules: PairingRules,
    pub extension: String,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self::from(&KorpoConfig::default())
    }
}

impl From<&KorpoConfig> for TranslatorOptions {
    fn from(config: &KorpoConfig) -> Self {
        Self {
            top_k: config.retrieval.top_k,
            temperature: config.generation.temperature,
            max_tokens: config.generation.max_tokens,
            name_max_tokens: config.generation.name_max_tokens,
            generate_names: config.generation.generate_names,
            limits: PromptLimits {
                token_budget: config.retrieval.prompt_token_budget,
                context_lines: config.retrieval.example_context_lines,
            },
            rules: PairingRules::from(&config.corpus),
            extension: config.corpus.extension.clone(),
        }
    }
}

pub struct Translator {
    embedding: Arc<dyn EmbeddingProvider>,
    generation: Arc<dyn GenerationProvider>,
    options: TranslatorOptions,
    store: RwLock<ExampleStore>,
    index: Arc<EmbeddingIndex>,
    // serializes snapshot-then-rebuild so an older snapshot never lands last
    rebuild_lock: tokio::sync::Mutex<()>,
    tracker: StateTracker,
}

impl Translator {
    pub fn new(
        embedding: Arc<dyn EmbeddingProvider>,
        generation: Arc<dyn GenerationProvider>,
        options: TranslatorOptions,
    ) -> Self {
        Self {
            embedding,
            generation,
            options,
            store: RwLock::new(ExampleStore::new()),
            index: Arc::new(EmbeddingIndex::new()),
            rebuild_lock: tokio::sync::Mutex::new(()),
            tracker: StateTracker::new(),
        }
    }

    /// Build both capabilities from config. Any failure is an initialization error.
    pub fn from_config(config: &KorpoConfig) -> Result<Self> {
        let embedding = embedding::create_provider(&config.embedding)
            .map_err(|e| KorpoError::Initialization(format!("{e:#}")))?;
        let generation = generation::create_provider(&config.generation)
            .map_err(|e| KorpoError::Initialization(format!("{e:#}")))?;
        tracing::info!(model = %generation.model(), "translator initialized");
        Ok(Self::new(
            Arc::from(embedding),
            Arc::from(generation),
            TranslatorOptions::from(config),
        ))
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    pub fn status(&self) -> StatusSnapshot {
        self.tracker.snapshot()
    }

    pub fn state(&self) -> TranslatorState {
        self.tracker.state()
    }

    pub fn example_count(&self) -> usize {
        self.read_store().len()
    }

    /// Current examples, in insertion order.
    pub fn examples(&self) -> Arc<Vec<ExamplePair>> {
        self.read_store().snapshot()
    }

    /// Number of examples covered by the live index.
    pub fn indexed_count(&self) -> usize {
        self.index.len()
    }

    fn read_store(&self) -> RwLockReadGuard<'_, ExampleStore> {
        self.store.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, ExampleStore> {
        self.store.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Ingest every corpus file in `dir`, append the pairs, and rebuild the index.
    pub async fn ingest_directory(&self, dir: &Path) -> Result<IngestReport> {
        self.tracker.begin();
        let outcome = self.ingest_inner(dir.to_path_buf()).await;
        self.tracker.finish(&outcome);
        outcome
    }

    async fn ingest_inner(&self, dir: PathBuf) -> Result<IngestReport> {
        let rules = self.options.rules.clone();
        let extension = self.options.extension.clone();
        let dir_for_task = dir.clone();
        let (pairs, report) = tokio::task::spawn_blocking(move || {
            ingest::ingest_directory(&dir_for_task, &extension, &rules)
        })
        .await
        .map_err(|e| KorpoError::ingestion(&dir, format!("ingestion task failed: {e}")))??;

        self.write_store().append(pairs);
        self.rebuild_index().await?;
        Ok(report)
    }

    /// Write every example to `path`.
    pub async fn save_examples(&self, path: &Path) -> Result<()> {
        self.tracker.begin();
        let outcome = self.save_inner(path).await;
        self.tracker.finish(&outcome);
        outcome
    }

    async fn save_inner(&self, path: &Path) -> Result<()> {
        let store = self.read_store().clone();
        let path = path.to_path_buf();
        let path_for_task = path.clone();
        tokio::task::spawn_blocking(move || store.save(&path_for_task))
            .await
            .map_err(|e| KorpoError::persistence(&path, format!("save task failed: {e}")))?
    }

    /// Replace all examples with the snapshot at `path` and rebuild the index.
    ///
    /// A snapshot that cannot be read leaves the current examples and index in place.
    pub async fn load_examples(&self, path: &Path) -> Result<()> {
        self.tracker.begin();
        let outcome = self.load_inner(path).await;
        self.tracker.finish(&outcome);
        outcome
    }

    async fn load_inner(&self, path: &Path) -> Result<()> {
        let path = path.to_path_buf();
        let path_for_task = path.clone();
        let loaded = tokio::task::spawn_blocking(move || {
            let mut store = ExampleStore::new();
            store.load(&path_for_task).map(|()| store)
        })
        .await
        .map_err(|e| KorpoError::persistence(&path, format!("load task failed: {e}")))??;

        *self.write_store() = loaded;
        self.rebuild_index().await
    }

    async fn rebuild_index(&self) -> Result<()> {
        let _guard = self.rebuild_lock.lock().await;
        let examples = self.read_store().snapshot();
        let index = Arc::clone(&self.index);
        let embedding = Arc::clone(&self.embedding);
        tokio::task::spawn_blocking(move || index.rebuild(embedding.as_ref(), examples))
            .await
            .map_err(|e| KorpoError::Retrieval(format!("index task failed: {e}")))?
    }

    /// The `k` examples closest to `text`, matched against the register `text` is written in.
    pub async fn find_similar(
        &self,
        text: &str,
        direction: Direction,
        k: usize,
    ) -> Result<Vec<Neighbor>> {
        let index = Arc::clone(&self.index);
        let embedding = Arc::clone(&self.embedding);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            index.query(embedding.as_ref(), &text, direction.source(), k)
        })
        .await
        .map_err(|e| KorpoError::Retrieval(format!("query task failed: {e}")))?
    }

    /// Translate `request.text` in `request.direction`.
    ///
    /// On failure the error is returned and also readable through [`Translator::status`].
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        self.tracker.begin();
        let outcome = self.translate_inner(request).await;
        let state = self.tracker.finish(&outcome);

        match outcome {
            Ok((translation, name)) => {
                tracing::info!(direction = %request.direction, "translation succeeded");
                Ok(TranslationResult {
                    translation,
                    name,
                    state,
                    error: None,
                })
            }
            Err(e) => {
                tracing::error!(direction = %request.direction, error = %e, "translation failed");
                Err(e)
            }
        }
    }

    async fn translate_inner(&self, request: &TranslationRequest) -> Result<(String, String)> {
        let neighbors = match self
            .find_similar(&request.text, request.direction, self.options.top_k)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "example retrieval failed, translating without examples");
                vec![]
            }
        };

        let prompt = prompt::build_prompt(
            request.direction,
            &neighbors,
            request.context.as_deref(),
            &request.text,
            self.options.limits,
        );
        tracing::debug!(
            retrieved = neighbors.len(),
            used = prompt.examples_used,
            "prompt assembled"
        );

        let raw = self
            .generation
            .complete(&CompletionRequest {
                system: Some(prompt.system),
                prompt: prompt.user,
                temperature: self.options.temperature,
                max_tokens: self.options.max_tokens,
            })
            .await
            .map_err(|e| KorpoError::Generation(format!("{e:#}")))?;

        let translation = raw.trim().to_string();
        let name = self
            .generate_name(&request.text, &translation, request.context.as_deref())
            .await;
        Ok((translation, name))
    }

    /// Best-effort label for a translation; falls back to a fixed label on any failure.
    async fn generate_name(&self, original: &str, translation: &str, context: Option<&str>) -> String {
        if !self.options.generate_names {
            return prompt::fallback_name(original);
        }

        let request = CompletionRequest {
            system: None,
            prompt: prompt::name_prompt(original, translation, context),
            temperature: self.options.temperature,
            max_tokens: self.options.name_max_tokens,
        };
        match self.generation.complete(&request).await {
            Ok(raw) => {
                let name = raw.trim().trim_matches('"').trim();
                if name.is_empty() {
                    prompt::fallback_name(original)
                } else {
                    name.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "name generation failed, using fallback");
                prompt::fallback_name(original)
            }
        }
    }
}
