//! Readable per-instance operation state.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::KorpoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslatorState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl TranslatorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for TranslatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State plus the message of the last failure, if the last operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusSnapshot {
    pub state: TranslatorState,
    pub error_message: Option<String>,
}

/// Tracks `idle -> loading -> {success, error}` for one translator.
///
/// The terminal state of an operation is derived from its `Result`. Concurrent
/// operations on one instance are last-writer-wins here; each call's own return
/// value is unaffected.
#[derive(Debug, Default)]
pub struct StateTracker {
    inner: Mutex<StatusSnapshot>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, next: StatusSnapshot) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// Mark the start of an operation. Clears any previous error.
    pub fn begin(&self) {
        self.set(StatusSnapshot {
            state: TranslatorState::Loading,
            error_message: None,
        });
    }

    /// Record the outcome of an operation and return the resulting state.
    pub fn finish<T>(&self, outcome: &Result<T, KorpoError>) -> TranslatorState {
        let next = match outcome {
            Ok(_) => StatusSnapshot {
                state: TranslatorState::Success,
                error_message: None,
            },
            Err(e) => StatusSnapshot {
                state: TranslatorState::Error,
                error_message: Some(e.to_string()),
            },
        };
        let state = next.state;
        self.set(next);
        state
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn state(&self) -> TranslatorState {
        self.snapshot().state
    }
}
