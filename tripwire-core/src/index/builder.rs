//! Index building logic.
//!
//! Building is the only phase in which the trie is mutated. The builder owns
//! every node exclusively while triggers are inserted, and [`TriggerIndexBuilder::build`]
//! hands the finished map to a [`TriggerIndex`] that exposes no mutation at all.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tripwire_types::TriggerError;

use crate::analyzer::Tokenizer;
use crate::index::types::{PhraseEdge, PhraseNode, TriggerEntry, TriggerIndex};

/// Trigger tokens are short; most phrases fit inline.
type TriggerTokens<'a> = SmallVec<[&'a str; 8]>;

/// Mutable build phase for a [`TriggerIndex`].
#[derive(Debug, Default)]
pub struct TriggerIndexBuilder {
    entries: FxHashMap<Box<str>, TriggerEntry>,
    tokenizer: Tokenizer,
    trigger_count: usize,
    longest_trigger: usize,
}

impl TriggerIndexBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one trigger word or phrase.
    ///
    /// The trigger is split with the same rule as documents, so
    /// `"David  Letterman."` and `"David Letterman"` are the same trigger.
    /// Returns `Ok(true)` if the trigger is new and `Ok(false)` for a
    /// duplicate (re-insertion is idempotent).
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::Empty` if the trigger contains no tokens.
    pub fn insert(&mut self, trigger: &str) -> Result<bool, TriggerError> {
        let mut tokens = TriggerTokens::new();
        self.tokenizer.tokenize(trigger, |token, _| tokens.push(token));

        let Some((&first, rest)) = tokens.split_first() else {
            return Err(TriggerError::Empty {
                raw: trigger.to_owned(),
            });
        };

        let inserted = if rest.is_empty() {
            self.insert_word(first)
        } else {
            self.insert_phrase(first, rest)
        };

        if inserted {
            self.trigger_count += 1;
            self.longest_trigger = self.longest_trigger.max(tokens.len());
        }
        Ok(inserted)
    }

    /// Inserts many triggers, skipping any that contain no tokens.
    ///
    /// Returns `(inserted, skipped)`; duplicates count as neither.
    pub fn extend<I, S>(&mut self, triggers: I) -> (usize, usize)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inserted = 0;
        let mut skipped = 0;

        for trigger in triggers {
            match self.insert(trigger.as_ref()) {
                Ok(true) => inserted += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("skipping trigger: {e}");
                    skipped += 1;
                }
            }
        }
        (inserted, skipped)
    }

    /// Freezes the builder into a read-only index.
    #[must_use]
    pub fn build(self) -> TriggerIndex {
        tracing::debug!(
            triggers = self.trigger_count,
            starts = self.entries.len(),
            longest = self.longest_trigger,
            "trigger index built"
        );
        TriggerIndex {
            entries: self.entries,
            trigger_count: self.trigger_count,
            longest_trigger: self.longest_trigger,
        }
    }

    /// Single-word trigger. When a phrase already starts with `word`, the
    /// root edge is marked complete instead of overwriting the phrase trie.
    fn insert_word(&mut self, word: &str) -> bool {
        match self.entries.entry(word.into()) {
            Entry::Vacant(slot) => {
                slot.insert(TriggerEntry::SingleWord);
                true
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                TriggerEntry::SingleWord => false,
                TriggerEntry::Phrase(edge) => !std::mem::replace(&mut edge.complete, true),
            },
        }
    }

    /// Multi-word trigger. A prior single-word entry for `first` is promoted
    /// to a complete root edge so the shorter trigger survives.
    fn insert_phrase(&mut self, first: &str, rest: &[&str]) -> bool {
        let entry = self
            .entries
            .entry(first.into())
            .or_insert_with(|| TriggerEntry::Phrase(PhraseEdge::default()));

        if matches!(entry, TriggerEntry::SingleWord) {
            *entry = TriggerEntry::Phrase(PhraseEdge {
                node: PhraseNode::default(),
                complete: true,
            });
        }

        match entry {
            TriggerEntry::Phrase(edge) => Self::insert_path(&mut edge.node, rest),
            TriggerEntry::SingleWord => unreachable!("single-word entry promoted above"),
        }
    }

    /// Walks `tokens` down from `node`, creating children as needed, and
    /// marks the last edge complete.
    fn insert_path(mut node: &mut PhraseNode, tokens: &[&str]) -> bool {
        let last = tokens.len() - 1;
        for (i, &token) in tokens.iter().enumerate() {
            let edge = node.children.entry(token.into()).or_default();
            if i == last {
                return !std::mem::replace(&mut edge.complete, true);
            }
            node = &mut edge.node;
        }
        false
    }
}

/// Builds an index from a set of triggers.
///
/// Triggers that contain no tokens are skipped.
pub fn build_index<I, S>(triggers: I) -> TriggerIndex
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TriggerIndexBuilder::new();
    builder.extend(triggers);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase_edge<'a>(index: &'a TriggerIndex, first: &str) -> &'a PhraseEdge {
        match index.lookup(first) {
            Some(TriggerEntry::Phrase(edge)) => edge,
            other => panic!("expected phrase entry for {first:?}, got {other:?}"),
        }
    }

    #[test]
    fn single_word_entry() {
        let index = build_index(["Comcast"]);
        assert_eq!(index.lookup("Comcast"), Some(&TriggerEntry::SingleWord));
        assert!(index.lookup("Comcast").is_some_and(TriggerEntry::is_complete));
        assert_eq!(index.lookup("comcast"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn phrase_entry_is_incomplete_at_root() {
        let index = build_index(["David Letterman"]);
        let edge = phrase_edge(&index, "David");
        assert!(!edge.is_complete());
        assert!(index.lookup("David").is_some_and(|entry| !entry.is_complete()));
        assert!(edge.node().child("Letterman").is_some_and(PhraseEdge::is_complete));
        assert_eq!(index.lookup("Letterman"), None);
    }

    #[test]
    fn word_then_phrase_promotes_word() {
        let index = build_index(["New", "New York"]);
        let edge = phrase_edge(&index, "New");
        assert!(edge.is_complete());
        assert!(edge.node().child("York").is_some_and(PhraseEdge::is_complete));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn phrase_then_word_marks_root_complete() {
        let index = build_index(["New York", "New"]);
        let edge = phrase_edge(&index, "New");
        assert!(edge.is_complete());
        assert!(edge.node().child("York").is_some_and(PhraseEdge::is_complete));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let index = build_index(["New York City", "New York", "New Jersey"]);
        let edge = phrase_edge(&index, "New");
        assert!(!edge.is_complete());
        assert_eq!(edge.node().len(), 2);

        let york = edge.node().child("York").expect("York edge");
        assert!(york.is_complete());
        assert!(york.node().child("City").is_some_and(PhraseEdge::is_complete));
        assert!(edge.node().child("Jersey").is_some_and(PhraseEdge::is_complete));
    }

    #[test]
    fn longer_phrase_first_then_prefix() {
        let index = build_index(["New York City", "New York"]);
        let york = phrase_edge(&index, "New").node().child("York").expect("York edge");
        assert!(york.is_complete());
        assert!(york.node().child("City").is_some());
    }

    #[test]
    fn duplicates_are_idempotent() {
        let mut builder = TriggerIndexBuilder::new();
        assert_eq!(builder.insert("AOL"), Ok(true));
        assert_eq!(builder.insert("AOL"), Ok(false));
        assert_eq!(builder.insert("David Letterman"), Ok(true));
        assert_eq!(builder.insert("David, Letterman."), Ok(false));

        let once = builder.build();
        assert_eq!(once.len(), 2);
        assert_eq!(once, build_index(["AOL", "David Letterman"]));
    }

    #[test]
    fn empty_trigger_is_rejected() {
        let mut builder = TriggerIndexBuilder::new();
        assert_eq!(
            builder.insert(""),
            Err(TriggerError::Empty { raw: String::new() })
        );
        assert!(builder.insert(" .,' ").is_err());

        let index = builder.build();
        assert!(index.is_empty());
        assert_eq!(index.lookup(""), None);
    }

    #[test]
    fn extend_counts_inserted_and_skipped() {
        let mut builder = TriggerIndexBuilder::new();
        let (inserted, skipped) = builder.extend(["AOL", "", "AOL", "New York", "..."]);
        assert_eq!(inserted, 2);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn trigger_delimiters_follow_tokenizer() {
        let index = build_index(["Comcast's"]);
        let edge = phrase_edge(&index, "Comcast");
        assert!(!edge.is_complete());
        assert!(edge.node().child("s").is_some_and(PhraseEdge::is_complete));
    }

    #[test]
    fn longest_trigger_tracked() {
        let index = build_index(["a", "b c d", "b c"]);
        assert_eq!(index.longest_trigger, 3);
    }
}
