#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use korpo::embedding::EmbeddingProvider;
use korpo::generation::{CompletionRequest, GenerationProvider};
use korpo::translator::{Translator, TranslatorOptions};
use korpo::ExamplePair;

pub const TEST_DIM: usize = 256;

/// Deterministic bag-of-words embedding: each lowercased word bumps one hashed slot.
/// Identical texts map to identical vectors; texts sharing words land close together.
pub struct WordEmbedder;

impl EmbeddingProvider for WordEmbedder {
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut v = vec![0.0f32; TEST_DIM];
        for word in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            v[(hasher.finish() as usize) % TEST_DIM] += 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        TEST_DIM
    }
}

/// Generation fake that replays scripted replies and records every request.
///
/// When the script runs out it answers `"ok"`.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
        let replies = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(anyhow::anyhow!(msg)),
            None => Ok("ok".to_string()),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

pub fn test_translator(generator: Arc<ScriptedGenerator>) -> Translator {
    test_translator_with(generator, TranslatorOptions::default())
}

pub fn test_translator_with(
    generator: Arc<ScriptedGenerator>,
    options: TranslatorOptions,
) -> Translator {
    Translator::new(Arc::new(WordEmbedder), generator, options)
}

/// Write a corpus file made of `lines`.
pub fn write_corpus(dir: &Path, name: &str, lines: &[&str]) {
    std::fs::write(dir.join(name), lines.join("\n")).unwrap();
}

pub fn pair(source: &str, target: &str) -> ExamplePair {
    ExamplePair {
        source_utterance: source.into(),
        target_utterance: target.into(),
        context: vec![
            format!("[Pracodawca]: {source}"),
            format!("[Korpotłumacz]: {target}"),
        ],
    }
}
