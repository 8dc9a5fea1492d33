//! Labeled-transcript parsing and translation pair extraction.
//!
//! Corpus files hold one dialog turn per line in the form `[Role]: Utterance`.
//! [`parser`] handles a single line; [`pairs`] walks a whole transcript and
//! aligns responder turns with the requester turns they answer.

pub mod pairs;
pub mod parser;

pub use pairs::{extract_pairs, PairingRules};
pub use parser::{parse_line, parse_turn, DialogLine};
