//! Example pair and register definitions.

use serde::{Deserialize, Serialize};

/// One of the two language styles the translator moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Register {
    /// Corporate jargon, spoken by the requester.
    Corporate,
    /// Plain language, spoken by the responder.
    Plain,
}

impl Register {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corporate => "corporate",
            Self::Plain => "plain",
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A few-shot exemplar: an aligned corporate/plain utterance pair and the
/// dialog lines that led up to it.
///
/// The `korpo`/`human` aliases read snapshots written by earlier tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePair {
    /// The corporate-register phrase.
    #[serde(alias = "korpo")]
    pub source_utterance: String,
    /// The plain-register phrase.
    #[serde(alias = "human")]
    pub target_utterance: String,
    /// Preceding dialog lines, oldest first, ending with the responder's line.
    #[serde(default)]
    pub context: Vec<String>,
}

impl ExamplePair {
    /// The utterance written in `register`.
    pub fn utterance(&self, register: Register) -> &str {
        match register {
            Register::Corporate => &self.source_utterance,
            Register::Plain => &self.target_utterance,
        }
    }
}
