use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct KorpoConfig {
    pub server: ServerConfig,
    pub corpus: CorpusConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

/// Where dialog transcripts live and how their turns are paired.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorpusConfig {
    /// File extension (without the dot) picked up by directory ingestion.
    pub extension: String,
    /// Role whose lines carry the corporate-register utterance.
    pub requester_role: String,
    /// Role whose lines carry the plain-register answer.
    pub responder_role: String,
    /// How many raw lines before a responder line are searched for its requester.
    pub lookback: usize,
    pub snapshot_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub cache_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: String,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub name_max_tokens: u32,
    pub generate_names: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub prompt_token_budget: usize,
    pub example_context_lines: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let snapshot_path = default_korpo_dir()
            .join("examples.json")
            .to_string_lossy()
            .into_owned();
        Self {
            extension: "txt".into(),
            requester_role: "Pracodawca".into(),
            responder_role: "Korpotłumacz".into(),
            lookback: 4,
            snapshot_path,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let cache_dir = default_korpo_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            provider: "local".into(),
            model: "all-MiniLM-L6-v2".into(),
            cache_dir,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4".into(),
            api_key: String::new(),
            temperature: 0.7,
            max_tokens: 500,
            name_max_tokens: 50,
            generate_names: true,
            timeout_secs: 60,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            prompt_token_budget: 2000,
            example_context_lines: 8,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

/// Returns `~/.korpo/`, or `./.korpo/` when no home directory is known.
pub fn default_korpo_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".korpo")
}

/// Returns the default config file path: `~/.korpo/config.toml`
pub fn default_config_path() -> PathBuf {
    default_korpo_dir().join("config.toml")
}

impl KorpoConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            KorpoConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (KORPO_LOG_LEVEL, KORPO_SNAPSHOT, KORPO_MODEL, KORPO_BASE_URL, OPENAI_API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("KORPO_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("KORPO_SNAPSHOT") {
            self.corpus.snapshot_path = val;
        }
        if let Ok(val) = std::env::var("KORPO_MODEL") {
            self.generation.model = val;
        }
        if let Ok(val) = std::env::var("KORPO_BASE_URL") {
            self.generation.base_url = val;
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            self.generation.api_key = val;
        }
    }

    /// Resolve the example snapshot path, expanding `~` if needed.
    pub fn resolved_snapshot_path(&self) -> PathBuf {
        expand_tilde(&self.corpus.snapshot_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
