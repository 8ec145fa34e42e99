//! Core types shared across the Tripwire trigger scanner.
//!
//! This crate holds the plain data that crosses crate boundaries:
//!
//! - **Matches**: [`MatchSpan`] describes one trigger occurrence in a document
//! - **Configuration**: [`ScanConfig`] bounds the work a single scan may do
//! - **Errors**: [`TriggerError`] and [`DocumentError`]
//! - **Placement**: [`Attachment`] says where a rendered disclaimer goes
//!
//! Nothing here knows how triggers are indexed or matched; that lives in
//! `tripwire-core`.

#![warn(missing_docs)]

use core::fmt;

/// Token position inside a tokenized document.
///
/// Positions count tokens, not bytes. A document with more than `u32::MAX`
/// tokens is far outside any realistic page.
pub type TokenPos = u32;

/// One trigger occurrence found in a document.
///
/// `start` and `end` are inclusive token positions, so a single-word match
/// has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    /// Position of the first token of the match.
    pub start: TokenPos,
    /// Position of the last token of the match.
    pub end: TokenPos,
    /// Matched tokens joined with single spaces.
    pub text: String,
}

impl MatchSpan {
    /// Creates a new match span.
    #[inline]
    pub fn new(start: TokenPos, end: TokenPos, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Number of tokens covered by this match.
    #[inline]
    #[must_use]
    pub const fn token_len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

impl fmt::Display for MatchSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}..={}", self.text, self.start, self.end)
    }
}

/// Errors raised when registering a trigger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    /// The trigger contains no tokens once delimiters are removed.
    #[error("trigger {raw:?} contains no tokens")]
    Empty {
        /// The trigger as supplied by the caller.
        raw: String,
    },
}

/// Errors raised when a document is handed to a scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// Document exceeds the configured byte budget.
    #[error("document too large: {size} bytes (max: {max_size} bytes)")]
    TooLarge {
        /// The actual size of the document in bytes.
        size: usize,
        /// The maximum allowed size in bytes.
        max_size: usize,
    },
}

/// Scan configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Largest document, in bytes, a scanner will tokenize.
    /// Default: 1 MiB
    pub max_document_bytes: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: Self::DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl ScanConfig {
    /// Default byte budget for a single document.
    pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

    /// Creates a configuration with no practical size limit.
    pub const fn unbounded() -> Self {
        Self {
            max_document_bytes: usize::MAX,
        }
    }

    /// Creates a configuration with the given byte budget.
    pub const fn with_max_document_bytes(max_document_bytes: usize) -> Self {
        Self { max_document_bytes }
    }

    /// Checks a document against the byte budget.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::TooLarge` if `text` exceeds the budget.
    #[inline]
    pub fn check_document(&self, text: &str) -> Result<(), DocumentError> {
        if text.len() > self.max_document_bytes {
            return Err(DocumentError::TooLarge {
                size: text.len(),
                max_size: self.max_document_bytes,
            });
        }
        Ok(())
    }
}

/// Where a rendered disclaimer should be attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attachment {
    /// The first candidate selector that exists on the page.
    Selector(String),
    /// No candidate exists; attach to the page body.
    Body,
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attachment::Selector(selector) => f.write_str(selector),
            Attachment::Body => f.write_str("body"),
        }
    }
}
