//! Statistics and IndexStats.

use crate::index::types::{PhraseNode, TriggerEntry, TriggerIndex};

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of distinct triggers.
    pub triggers: usize,
    /// First tokens that are only single-word triggers.
    pub single_words: usize,
    /// First tokens that start at least one phrase.
    pub phrase_starts: usize,
    /// Trie nodes below the phrase starts.
    pub phrase_nodes: usize,
    /// Token count of the longest trigger.
    pub longest_trigger: usize,
}

impl TriggerIndex {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        let mut single_words = 0;
        let mut phrase_starts = 0;
        let mut phrase_nodes = 0;

        for entry in self.entries.values() {
            match entry {
                TriggerEntry::SingleWord => single_words += 1,
                TriggerEntry::Phrase(edge) => {
                    phrase_starts += 1;
                    phrase_nodes += count_nodes(&edge.node);
                }
            }
        }

        IndexStats {
            triggers: self.trigger_count,
            single_words,
            phrase_starts,
            phrase_nodes,
            longest_trigger: self.longest_trigger,
        }
    }
}

fn count_nodes(node: &PhraseNode) -> usize {
    let mut count = 0;
    let mut stack: Vec<&PhraseNode> = vec![node];
    while let Some(node) = stack.pop() {
        count += node.len();
        stack.extend(node.iter().map(|(_, edge)| edge.node()));
    }
    count
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} triggers, {} single words, {} phrase starts, {} phrase nodes, longest {} tokens",
            self.triggers,
            self.single_words,
            self.phrase_starts,
            self.phrase_nodes,
            self.longest_trigger
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::index::build_index;

    #[test]
    fn empty_index() {
        let stats = build_index(Vec::<String>::new()).stats();
        assert_eq!(stats.triggers, 0);
        assert_eq!(stats.single_words, 0);
        assert_eq!(stats.phrase_starts, 0);
        assert_eq!(stats.phrase_nodes, 0);
        assert_eq!(stats.longest_trigger, 0);
    }

    #[test]
    fn counts_entries_and_nodes() {
        let stats = build_index(["AOL", "Comcast", "New", "New York City", "New Jersey"]).stats();
        assert_eq!(stats.triggers, 5);
        assert_eq!(stats.single_words, 2);
        assert_eq!(stats.phrase_starts, 1);
        // York, City, Jersey
        assert_eq!(stats.phrase_nodes, 3);
        assert_eq!(stats.longest_trigger, 3);
    }

    #[test]
    fn display_summarizes() {
        let stats = build_index(["AOL", "David Letterman"]).stats();
        assert_eq!(
            stats.to_string(),
            "2 triggers, 1 single words, 1 phrase starts, 1 phrase nodes, longest 2 tokens"
        );
    }
}
