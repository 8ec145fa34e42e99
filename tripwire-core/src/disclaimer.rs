//! Disclaimer construction and rendering.

use std::collections::BTreeMap;

use memchr::memchr3;

/// First line of every disclaimer.
pub const DISCLAIMER_HEADER: &str = "Disclaimer:";

/// Class attribute of the rendered list.
pub const DISCLAIMER_CLASS: &str = "--pbe-disclaimer";

/// Lines of a disclaimer: a header followed by one sentence per match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclaimer {
    lines: Vec<String>,
}

impl Disclaimer {
    /// Builds a disclaimer from scan matches.
    ///
    /// `explanations` maps a matched trigger to its sentence. Returns `None`
    /// when there is nothing to say.
    pub fn from_matches(matches: &[String], explanations: &BTreeMap<String, String>) -> Option<Self> {
        let mut lines = Vec::with_capacity(matches.len() + 1);
        lines.push(DISCLAIMER_HEADER.to_owned());

        for matched in matches {
            match explanations.get(matched) {
                Some(sentence) => lines.push(sentence.clone()),
                None => tracing::debug!(trigger = %matched, "no disclaimer for match"),
            }
        }

        (lines.len() > 1).then_some(Self { lines })
    }

    /// Header plus one sentence per match.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Explanation sentences without the header.
    pub fn sentences(&self) -> &[String] {
        &self.lines[1..]
    }

    /// Renders the disclaimer as an HTML list.
    pub fn render_html(&self) -> String {
        let mut out = String::with_capacity(64 + self.lines.iter().map(String::len).sum::<usize>());
        out.push_str("<ul class=\"");
        out.push_str(DISCLAIMER_CLASS);
        out.push_str("\">");
        for line in &self.lines {
            out.push_str("<li>");
            escape_html_into(line, &mut out);
            out.push_str("</li>");
        }
        out.push_str("</ul>");
        out
    }
}

impl core::fmt::Display for Disclaimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut lines = self.lines.iter();
        if let Some(header) = lines.next() {
            f.write_str(header)?;
        }
        for line in lines {
            write!(f, "\n- {line}")?;
        }
        Ok(())
    }
}

/// Appends `text` to `out`, escaping `&`, `<` and `>`.
fn escape_html_into(text: &str, out: &mut String) {
    let bytes = text.as_bytes();
    let mut start = 0usize;

    while let Some(offset) = memchr3(b'&', b'<', b'>', &bytes[start..]) {
        let i = start + offset;
        out.push_str(&text[start..i]);
        out.push_str(match bytes[i] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            _ => "&gt;",
        });
        start = i + 1;
    }
    out.push_str(&text[start..]);
}
