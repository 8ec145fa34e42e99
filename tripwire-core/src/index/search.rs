//! Longest-match scanning logic.

use rustc_hash::FxHashSet;
use tripwire_types::{MatchSpan, TokenPos};

use crate::analyzer::Tokenizer;
use crate::index::types::{PhraseEdge, TriggerEntry, TriggerIndex};

impl TriggerIndex {
    /// Scans `tokens` once and reports every trigger, deduplicated.
    ///
    /// Matched phrases are the document tokens joined with single spaces.
    /// Each distinct string appears once, at the position of its first
    /// occurrence.
    pub fn find_matches(&self, tokens: &[&str]) -> Vec<String> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut out = Vec::new();

        self.scan(tokens, |start, end| {
            let text = tokens[start..=end].join(" ");
            if seen.insert(text.clone()) {
                out.push(text);
            }
        });
        out
    }

    /// Scans `tokens` once and reports every trigger occurrence in order,
    /// without deduplication.
    pub fn match_spans(&self, tokens: &[&str]) -> Vec<MatchSpan> {
        let mut out = Vec::new();
        self.scan(tokens, |start, end| {
            out.push(MatchSpan::new(
                start as TokenPos,
                end as TokenPos,
                tokens[start..=end].join(" "),
            ));
        });
        out
    }

    /// Tokenizes `text` and runs [`find_matches`](Self::find_matches).
    pub fn find_matches_in(&self, text: &str) -> Vec<String> {
        self.find_matches(&Tokenizer::new().split(text))
    }

    /// Left-to-right scan; calls `emit(start, end)` with inclusive token
    /// indices for each match and resumes after the consumed tokens.
    #[inline]
    fn scan<F>(&self, tokens: &[&str], mut emit: F)
    where
        F: FnMut(usize, usize),
    {
        let mut i = 0usize;
        while i < tokens.len() {
            match self.lookup(tokens[i]) {
                Some(TriggerEntry::SingleWord) => {
                    emit(i, i);
                    i += 1;
                }
                Some(TriggerEntry::Phrase(root)) => match Self::longest_match(tokens, i, root) {
                    Some(end) => {
                        emit(i, end);
                        i = end + 1;
                    }
                    None => i += 1,
                },
                None => i += 1,
            }
        }
    }

    /// Walks the phrase trie from `tokens[start]` as far as the document
    /// allows and returns the end of the longest complete trigger seen.
    #[inline]
    fn longest_match(tokens: &[&str], start: usize, root: &PhraseEdge) -> Option<usize> {
        let mut best = root.complete.then_some(start);
        let mut node = &root.node;
        let mut j = start + 1;

        while let Some(edge) = tokens.get(j).and_then(move |token| node.child(token)) {
            if edge.complete {
                best = Some(j);
            }
            node = &edge.node;
            j += 1;
        }
        best
    }
}

/// Scans `tokens` against `index`; see [`TriggerIndex::find_matches`].
#[inline]
pub fn find_matches(index: &TriggerIndex, tokens: &[&str]) -> Vec<String> {
    index.find_matches(tokens)
}
