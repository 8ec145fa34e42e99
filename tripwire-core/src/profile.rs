//! Site profiles.
//!
//! A profile tells the page adapter where a site keeps its article text, which
//! triggers to look for, what to say about each one, and where the disclaimer
//! goes:
//!
//! ```toml
//! site_name = "The Verge"
//! article_from = [".article-body", ".m-article__entry", "#feature-body"]
//! append_to = [".m-article__sources", "article"]
//!
//! [triggers]
//! "Comcast" = "The Verge is owned by Vox which owns Comcast"
//! "AOL" = "The Verge is associated with AOL"
//! "David Letterman" = "The Verge is paid by David Letterman"
//! ```
//!
//! Profiles may also be written as JSON with the same field names.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors raised while loading a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The profile file could not be read.
    #[error("io error: {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile is not valid TOML.
    #[error("invalid TOML profile: {0}")]
    Toml(#[from] toml::de::Error),

    /// The profile is not valid JSON.
    #[error("invalid JSON profile: {0}")]
    Json(#[from] serde_json::Error),

    /// No trigger in the profile contains a token.
    #[error("profile defines no usable triggers")]
    NoTriggers,
}

/// Per-site scanning instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteProfile {
    /// Display name of the site.
    pub site_name: Option<String>,
    /// Sections whose text is concatenated, in order, to form the article.
    pub article_from: Vec<String>,
    /// Trigger word or phrase mapped to its disclaimer sentence.
    pub triggers: BTreeMap<String, String>,
    /// Attachment candidates in priority order.
    pub append_to: Vec<String>,
}

impl SiteProfile {
    /// Parses a TOML profile.
    pub fn from_toml_str(input: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(input)?)
    }

    /// Parses a JSON profile.
    pub fn from_json_str(input: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads a profile from disk.
    ///
    /// Files ending in `.json` are parsed as JSON; anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let profile = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            triggers = profile.triggers.len(),
            "loaded site profile"
        );
        Ok(profile)
    }

    /// Trigger strings, in sorted order.
    pub fn trigger_names(&self) -> impl Iterator<Item = &str> {
        self.triggers.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VERGE_TOML: &str = r##"
site_name = "The Verge"
article_from = [".article-body", ".m-article__entry", "#feature-body"]
append_to = [".m-article__sources", "article"]

[triggers]
"Comcast" = "The Verge is owned by Vox which owns Comcast"
"AOL" = "The Verge is associated with AOL"
"David Letterman" = "The Verge is paid by David Letterman"
"##;

    #[test]
    fn parses_toml() {
        let profile = SiteProfile::from_toml_str(VERGE_TOML).unwrap();
        assert_eq!(profile.site_name.as_deref(), Some("The Verge"));
        assert_eq!(profile.article_from.len(), 3);
        assert_eq!(profile.append_to, [".m-article__sources", "article"]);
        assert_eq!(
            profile.triggers.get("AOL").map(String::as_str),
            Some("The Verge is associated with AOL")
        );
        assert_eq!(
            profile.trigger_names().collect::<Vec<_>>(),
            ["AOL", "Comcast", "David Letterman"]
        );
    }

    #[test]
    fn parses_json() {
        let json = r#"{
            "article_from": [".story"],
            "triggers": { "AOL": "associated with AOL" }
        }"#;
        let profile = SiteProfile::from_json_str(json).unwrap();
        assert_eq!(profile.site_name, None);
        assert_eq!(profile.article_from, [".story"]);
        assert!(profile.append_to.is_empty());
        assert_eq!(profile.triggers.len(), 1);
    }

    #[test]
    fn missing_fields_default() {
        let profile = SiteProfile::from_toml_str("").unwrap();
        assert_eq!(profile, SiteProfile::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = SiteProfile::from_toml_str("append_too = []").unwrap_err();
        assert!(matches!(err, ProfileError::Toml(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SiteProfile::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ProfileError::Json(_)));
        assert!(err.to_string().starts_with("invalid JSON profile"));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("verge.toml");
        std::fs::write(&toml_path, VERGE_TOML).unwrap();
        let from_toml = SiteProfile::load(&toml_path).unwrap();

        let json_path = dir.path().join("verge.JSON");
        let mut file = std::fs::File::create(&json_path).unwrap();
        file.write_all(serde_json::to_string(&from_toml).unwrap().as_bytes())
            .unwrap();
        let from_json = SiteProfile::load(&json_path).unwrap();

        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = SiteProfile::load(&path).unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
