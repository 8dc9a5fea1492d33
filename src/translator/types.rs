//! Request and result values exchanged with callers.

use serde::{Deserialize, Serialize};

use crate::store::types::Register;
use crate::translator::state::TranslatorState;

/// Which way a translation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Corporate speak into plain language.
    ToPlain,
    /// Plain language into corporate speak.
    ToCorporate,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToPlain => "to_plain",
            Self::ToCorporate => "to_corporate",
        }
    }

    /// Register of the text being translated, and so of the example side it is matched against.
    pub fn source(&self) -> Register {
        match self {
            Self::ToPlain => Register::Corporate,
            Self::ToCorporate => Register::Plain,
        }
    }

    pub fn target(&self) -> Register {
        match self {
            Self::ToPlain => Register::Plain,
            Self::ToCorporate => Register::Corporate,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_plain" | "korpo_to_human" => Ok(Self::ToPlain),
            "to_corporate" | "human_to_korpo" => Ok(Self::ToCorporate),
            _ => Err(format!("unknown direction: {s} (expected to_plain or to_corporate)")),
        }
    }
}

/// Input to [`crate::translator::Translator::translate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub direction: Direction,
    /// Free-text description of the situation the text comes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, direction: Direction) -> Self {
        Self {
            text: text.into(),
            direction,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Output of a successful translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    /// Short generated label for the translation.
    pub name: String,
    pub state: TranslatorState,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_registers_are_opposite() {
        for d in [Direction::ToPlain, Direction::ToCorporate] {
            assert_ne!(d.source(), d.target());
        }
        assert_eq!(Direction::ToPlain.source(), Register::Corporate);
    }

    #[test]
    fn direction_parses_current_and_legacy_names() {
        assert_eq!("to_plain".parse::<Direction>().unwrap(), Direction::ToPlain);
        assert_eq!("human_to_korpo".parse::<Direction>().unwrap(), Direction::ToCorporate);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn request_json_shape() {
        let request: TranslationRequest =
            serde_json::from_str(r#"{"text": "Na EOD", "direction": "to_plain"}"#).unwrap();
        assert_eq!(request.direction, Direction::ToPlain);
        assert!(request.context.is_none());
    }
}
