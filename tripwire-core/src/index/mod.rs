//! Trigger index and longest-match scanner.
//!
//! Triggers are indexed by their first token. A token that is only ever a
//! single-word trigger maps to [`TriggerEntry::SingleWord`]; a token that
//! starts any phrase maps to a per-word trie holding every phrase with that
//! first token.
//!
//! Lifecycle:
//! - [`TriggerIndexBuilder`] owns and mutates the trie while triggers are added
//! - [`TriggerIndexBuilder::build`] freezes it into a [`TriggerIndex`]
//! - [`TriggerIndex`] is read-only, `Send` and `Sync`, and reusable for any
//!   number of documents
//!
//! Scanning is linear in the document's token count, bounded at each trigger
//! start by the length of the longest trigger.

mod builder;
mod search;
mod stats;
mod types;

pub use builder::{build_index, TriggerIndexBuilder};
pub use search::find_matches;
pub use stats::IndexStats;
pub use types::{PhraseEdge, PhraseNode, TriggerEntry, TriggerIndex};
