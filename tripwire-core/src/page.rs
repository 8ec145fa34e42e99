//! Page adapter boundary.
//!
//! The scanner never touches a live document. Whatever hosts it (a browser
//! extension, a crawler, a test) implements [`PageSource`] and the functions
//! here turn that into article text and an attachment choice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tripwire_types::Attachment;

/// Read-only view of a structured page.
pub trait PageSource {
    /// Text of every section matching `selector`, in document order.
    fn section_texts(&self, selector: &str) -> Vec<String>;

    /// Returns `true` if at least one section matches `selector`.
    fn has(&self, selector: &str) -> bool {
        !self.section_texts(selector).is_empty()
    }

    /// Text of the whole page body.
    fn body_text(&self) -> String;
}

/// Concatenates the text of every section named by `selectors`.
///
/// Each section contributes its text followed by a single space. If nothing
/// but whitespace is collected, the page body is used instead.
pub fn collect_article<P: PageSource + ?Sized>(page: &P, selectors: &[String]) -> String {
    let mut article = String::new();
    for selector in selectors {
        for text in page.section_texts(selector) {
            article.push_str(&text);
            article.push(' ');
        }
    }

    if article.trim().is_empty() {
        tracing::debug!("no article sections found, falling back to page body");
        return page.body_text();
    }
    article
}

/// Picks the first candidate present on the page, or the body.
pub fn choose_attachment<P: PageSource + ?Sized>(page: &P, candidates: &[String]) -> Attachment {
    candidates
        .iter()
        .find(|candidate| page.has(candidate))
        .map_or(Attachment::Body, |candidate| {
            Attachment::Selector(candidate.clone())
        })
}

/// In-memory page: selector → section texts, plus a body.
///
/// Selectors are matched literally; there is no CSS engine behind this type.
///
/// ```json
/// {
///   "sections": { ".article-body": ["first paragraph", "second paragraph"] },
///   "body": "whole page text"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticPage {
    pub sections: BTreeMap<String, Vec<String>>,
    pub body: String,
}

impl StaticPage {
    /// A page with a body and no sections.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            sections: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Adds a section's text under `selector`.
    #[must_use]
    pub fn with_section(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.sections
            .entry(selector.into())
            .or_default()
            .push(text.into());
        self
    }

    /// Parses a page from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

impl PageSource for StaticPage {
    fn section_texts(&self, selector: &str) -> Vec<String> {
        self.sections.get(selector).cloned().unwrap_or_default()
    }

    fn has(&self, selector: &str) -> bool {
        self.sections
            .get(selector)
            .is_some_and(|texts| !texts.is_empty())
    }

    fn body_text(&self) -> String {
        self.body.clone()
    }
}
