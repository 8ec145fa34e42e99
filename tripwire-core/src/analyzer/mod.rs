//! Text analysis.
//!
//! Triggers and documents go through the same [`Tokenizer`], so a phrase
//! trigger and a run of document tokens compare token by token.

pub mod tokenizer;

pub use tokenizer::{is_delimiter, tokenize, Tokenizer};
