//! Index types.

use rustc_hash::FxHashMap;

/// Continuations of a trigger prefix.
///
/// A node carries no match flag of its own. Completeness lives on the
/// [`PhraseEdge`] leading into a node, so the same node can sit under a
/// complete trigger (`"New York"`) and continue to a longer one
/// (`"New York City"`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhraseNode {
    pub(crate) children: FxHashMap<Box<str>, PhraseEdge>,
}

impl PhraseNode {
    /// Follows the edge labelled `token`, if any.
    #[inline]
    pub fn child(&self, token: &str) -> Option<&PhraseEdge> {
        self.children.get(token)
    }

    /// Number of distinct next tokens.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if no trigger continues past this node.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterates over `(token, edge)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PhraseEdge)> {
        self.children.iter().map(|(k, v)| (&**k, v))
    }
}

/// An edge into a [`PhraseNode`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhraseEdge {
    pub(crate) node: PhraseNode,
    pub(crate) complete: bool,
}

impl PhraseEdge {
    /// Returns `true` if the token path ending at this edge is a whole trigger.
    #[inline(always)]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// The node this edge leads to.
    #[inline(always)]
    #[must_use]
    pub const fn node(&self) -> &PhraseNode {
        &self.node
    }
}

/// What the index knows about a token that may start a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEntry {
    /// The token alone is a trigger and no phrase starts with it.
    SingleWord,
    /// At least one multi-word trigger starts with this token.
    ///
    /// The edge runs from the root into the first token; it is complete when
    /// the first token is also a trigger on its own.
    Phrase(PhraseEdge),
}

impl TriggerEntry {
    /// Returns `true` if the first token alone is a trigger.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        match self {
            TriggerEntry::SingleWord => true,
            TriggerEntry::Phrase(edge) => edge.complete,
        }
    }
}

/// Frozen trigger index.
///
/// Built once by [`TriggerIndexBuilder`](crate::index::TriggerIndexBuilder)
/// and read-only afterwards. It holds no reference to any document, so one
/// index serves any number of scans, including concurrent ones.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TriggerIndex {
    pub(crate) entries: FxHashMap<Box<str>, TriggerEntry>,
    /// Distinct triggers inserted.
    pub(crate) trigger_count: usize,
    /// Token count of the longest trigger.
    pub(crate) longest_trigger: usize,
}

impl TriggerIndex {
    /// Returns the entry for a possible trigger start.
    #[inline(always)]
    pub fn lookup(&self, token: &str) -> Option<&TriggerEntry> {
        self.entries.get(token)
    }

    /// Returns the number of distinct triggers in the index.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.trigger_count
    }

    /// Returns `true` if the index contains no triggers.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trigger_count == 0
    }
}
