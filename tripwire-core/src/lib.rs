//! Tripwire: a longest-match multi-word trigger scanner.
//!
//! Given a set of trigger words and phrases, Tripwire scans a tokenized
//! document once and reports every occurrence, preferring the longest phrase
//! starting at any token over shorter ones that share its prefix.
//!
//! ```
//! use tripwire_core::{build_index, tokenize};
//!
//! let index = build_index(["New", "New York", "New York City"]);
//! let tokens = tokenize("I live in New York City now");
//! assert_eq!(index.find_matches(&tokens), ["New York City"]);
//! ```
//!
//! Around that core sit a thin page layer ([`page`], [`disclaimer`]) and
//! per-site [`profile`]s, tied together by [`Scanner`].

pub mod analyzer;
pub mod disclaimer;
pub mod index;
pub mod page;
pub mod profile;
pub mod scanner;

pub use analyzer::{tokenize, Tokenizer};
pub use disclaimer::Disclaimer;
pub use index::{build_index, find_matches, IndexStats, TriggerIndex, TriggerIndexBuilder};
pub use page::{PageSource, StaticPage};
pub use profile::{ProfileError, SiteProfile};
pub use scanner::{Report, Scanner};
pub use tripwire_types::{Attachment, DocumentError, MatchSpan, ScanConfig, TriggerError};
