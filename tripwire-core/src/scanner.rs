//! Scanning sessions.
//!
//! A [`Scanner`] ties a frozen [`TriggerIndex`] to the disclaimer sentences of
//! one site profile and to a [`ScanConfig`]. Build it once, then hand it any
//! number of documents or pages.

use std::collections::BTreeMap;

use tripwire_types::{Attachment, DocumentError, MatchSpan, ScanConfig};

use crate::analyzer::Tokenizer;
use crate::disclaimer::Disclaimer;
use crate::index::{TriggerIndex, TriggerIndexBuilder};
use crate::page::{choose_attachment, collect_article, PageSource};
use crate::profile::{ProfileError, SiteProfile};

/// Outcome of scanning one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Deduplicated matches in first-occurrence order.
    pub matches: Vec<String>,
    /// Disclaimer built from the matches.
    pub disclaimer: Disclaimer,
    /// Where the disclaimer should be attached.
    pub attachment: Attachment,
}

/// A trigger index plus everything needed to report on a page.
#[derive(Debug, Clone)]
pub struct Scanner {
    index: TriggerIndex,
    /// Keyed by the trigger's tokens joined with single spaces, which is the
    /// form matches are reported in.
    explanations: BTreeMap<String, String>,
    article_from: Vec<String>,
    append_to: Vec<String>,
    config: ScanConfig,
    tokenizer: Tokenizer,
}

impl Scanner {
    /// Builds a scanner from a site profile.
    ///
    /// Triggers that contain no tokens are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoTriggers` if no trigger survives.
    pub fn from_profile(profile: &SiteProfile, config: ScanConfig) -> Result<Self, ProfileError> {
        let tokenizer = Tokenizer::new();
        let mut builder = TriggerIndexBuilder::new();
        let mut explanations = BTreeMap::new();

        for (trigger, sentence) in &profile.triggers {
            match builder.insert(trigger) {
                Ok(_) => {
                    let canonical = tokenizer.split(trigger).join(" ");
                    explanations.entry(canonical).or_insert_with(|| sentence.clone());
                }
                Err(e) => tracing::warn!("skipping trigger: {e}"),
            }
        }

        let index = builder.build();
        if index.is_empty() {
            return Err(ProfileError::NoTriggers);
        }

        Ok(Self {
            index,
            explanations,
            article_from: profile.article_from.clone(),
            append_to: profile.append_to.clone(),
            config,
            tokenizer,
        })
    }

    /// The frozen trigger index.
    pub fn index(&self) -> &TriggerIndex {
        &self.index
    }

    /// Scan configuration in effect.
    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Scans raw text and returns deduplicated matches.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::TooLarge` if `text` exceeds the byte budget.
    pub fn scan(&self, text: &str) -> Result<Vec<String>, DocumentError> {
        self.config.check_document(text)?;
        let tokens = self.tokenizer.split(text);
        let matches = self.index.find_matches(&tokens);
        tracing::debug!(tokens = tokens.len(), matches = matches.len(), "scanned document");
        Ok(matches)
    }

    /// Scans raw text and returns every occurrence with its token span.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::TooLarge` if `text` exceeds the byte budget.
    pub fn scan_spans(&self, text: &str) -> Result<Vec<MatchSpan>, DocumentError> {
        self.config.check_document(text)?;
        Ok(self.index.match_spans(&self.tokenizer.split(text)))
    }

    /// Disclaimer sentence for a reported match.
    pub fn explanation(&self, matched: &str) -> Option<&str> {
        self.explanations.get(matched).map(String::as_str)
    }

    /// Runs the whole page flow: collect the article, scan it, build the
    /// disclaimer and choose where it goes.
    ///
    /// Returns `Ok(None)` when the page needs no disclaimer.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::TooLarge` if the article exceeds the byte budget.
    pub fn report<P: PageSource + ?Sized>(&self, page: &P) -> Result<Option<Report>, DocumentError> {
        let article = collect_article(page, &self.article_from);
        let matches = self.scan(&article)?;

        let Some(disclaimer) = Disclaimer::from_matches(&matches, &self.explanations) else {
            return Ok(None);
        };

        let attachment = choose_attachment(page, &self.append_to);
        tracing::debug!(%attachment, matches = matches.len(), "page needs a disclaimer");

        Ok(Some(Report {
            matches,
            disclaimer,
            attachment,
        }))
    }
}
