//! Nearest-neighbor example retrieval and prompt assembly.

pub mod index;
pub mod prompt;

pub use index::{EmbeddingIndex, Neighbor};
pub use prompt::{build_prompt, Prompt, PromptLimits};
