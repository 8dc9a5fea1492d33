//! Pair extraction: align each responder turn with the nearest preceding
//! requester turn.

use super::parser::parse_turn;
use crate::config::CorpusConfig;
use crate::store::types::ExamplePair;

/// Roles and window used when pairing turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingRules {
    pub requester_role: String,
    pub responder_role: String,
    /// Number of raw lines scanned backwards from a responder line.
    pub lookback: usize,
}

impl Default for PairingRules {
    fn default() -> Self {
        Self::from(&CorpusConfig::default())
    }
}

impl From<&CorpusConfig> for PairingRules {
    fn from(config: &CorpusConfig) -> Self {
        Self {
            requester_role: config.requester_role.clone(),
            responder_role: config.responder_role.clone(),
            lookback: config.lookback,
        }
    }
}

/// Scan `lines` in order and emit one [`ExamplePair`] per responder turn that has a
/// requester turn within the lookback window.
///
/// The window is measured over raw line positions, so unparseable lines still take
/// up a slot. The context buffer only collects lines that parsed as turns, stored
/// trimmed, and each pair gets a snapshot of it up to and including the responder.
pub fn extract_pairs<S: AsRef<str>>(lines: &[S], rules: &PairingRules) -> Vec<ExamplePair> {
    let mut pairs = Vec::new();
    let mut buffer: Vec<String> = Vec::new();

    for (i, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let Some(turn) = parse_turn(raw) else {
            continue;
        };

        buffer.push(raw.trim().to_string());

        if turn.role != rules.responder_role {
            continue;
        }

        let window_start = i.saturating_sub(rules.lookback);
        let requester = lines[window_start..i]
            .iter()
            .rev()
            .filter_map(|prev| parse_turn(prev.as_ref()))
            .find(|prev| prev.role == rules.requester_role);

        if let Some(requester) = requester {
            pairs.push(ExamplePair {
                source_utterance: requester.utterance.to_string(),
                target_utterance: turn.utterance.to_string(),
                context: buffer.clone(),
            });
        }
    }

    pairs
}
