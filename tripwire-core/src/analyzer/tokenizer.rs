//! Streaming Tokenizer Module
//!
//! This module splits raw text into word tokens. It is used twice: once on each
//! trigger while the index is built, and once on every document that gets
//! scanned. Using the same splitting rule on both sides is what lets a phrase
//! like `"David Letterman"` line up with the tokens of a document.
//!
//! ## What It Does
//!
//! Given input like `"Comcast, AOL's partner."`, it emits each non-empty run
//! between delimiters with its position:
//!
//! ```ignore
//! ("Comcast", 0)
//! ("AOL", 1)
//! ("s", 2)
//! ("partner", 3)
//! ```
//!
//! ## The Delimiter Set
//!
//! - Any Unicode whitespace except U+0085 (next line), plus U+FEFF (zero
//!   width no-break space). This is the JavaScript `\s` class.
//! - Period `.`
//! - Comma `,`
//! - ASCII apostrophe `'`
//!
//! Everything else is part of a token. In particular the typographic
//! apostrophe `’` is not a delimiter, so `Comcast’s` stays one token and does
//! not match a `Comcast` trigger.
//!
//! ## No Normalization
//!
//! Tokens are exact slices of the input. There is no case folding, stemming
//! or punctuation stripping beyond the delimiter set.
//!
//! ## Usage
//!
//! ```rust
//! use tripwire_core::analyzer::tokenizer::Tokenizer;
//!
//! let tokens = Tokenizer::new().split("I live in New York.");
//! assert_eq!(tokens, ["I", "live", "in", "New", "York"]);
//! ```

use tripwire_types::TokenPos;

const ASCII_DELIMITER: [bool; 128] = {
    let mut table = [false; 128];
    table[b'\t' as usize] = true;
    table[b'\n' as usize] = true;
    table[0x0B] = true;
    table[0x0C] = true;
    table[b'\r' as usize] = true;
    table[b' ' as usize] = true;
    table[b'\'' as usize] = true;
    table[b',' as usize] = true;
    table[b'.' as usize] = true;
    table
};

/// Returns `true` if `c` separates tokens.
#[inline(always)]
pub fn is_delimiter(c: char) -> bool {
    if c.is_ascii() {
        ASCII_DELIMITER[c as usize]
    } else {
        (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
    }
}

/// Streaming tokenizer - splits text into tokens on the delimiter set.
///
/// Tokens are not copied; they're slices (`&str`) into the input string.
/// The tokenizer holds no state, so one value can be shared freely and reused
/// for any number of inputs.
///
/// ## Example
///
/// ```
/// use tripwire_core::analyzer::tokenizer::Tokenizer;
///
/// let mut count = 0;
/// Tokenizer::new().tokenize("one, two.. three", |_text, _pos| count += 1);
/// assert_eq!(count, 3);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes `text` and emits `(token, position)` for every non-empty token.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop (overflow protection).
    #[inline]
    pub fn tokenize<'t, F>(&self, text: &'t str, mut emit: F)
    where
        F: FnMut(&'t str, TokenPos),
    {
        if text.is_ascii() {
            Self::tokenize_ascii(text, &mut emit);
        } else {
            Self::tokenize_unicode(text, &mut emit);
        }
    }

    /// Tokenizes `text` into an ordered list of borrowed tokens.
    ///
    /// An empty or all-delimiter input yields an empty list.
    #[must_use]
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut out = Vec::with_capacity(text.len() / 6 + 1);
        self.tokenize(text, |token, _| out.push(token));
        out
    }

    fn tokenize_ascii<'t, F>(text: &'t str, emit: &mut F)
    where
        F: FnMut(&'t str, TokenPos),
    {
        let bytes = text.as_bytes();
        let mut start = 0usize;
        let mut pos: TokenPos = 0;

        for (i, &b) in bytes.iter().enumerate() {
            if ASCII_DELIMITER[b as usize] {
                if start < i {
                    emit(&text[start..i], pos);
                    if pos == TokenPos::MAX {
                        return;
                    }
                    pos += 1;
                }
                start = i + 1;
            }
        }

        if start < bytes.len() {
            emit(&text[start..], pos);
        }
    }

    fn tokenize_unicode<'t, F>(text: &'t str, emit: &mut F)
    where
        F: FnMut(&'t str, TokenPos),
    {
        let mut pos: TokenPos = 0;

        for token in text.split(is_delimiter).filter(|t| !t.is_empty()) {
            emit(token, pos);
            if pos == TokenPos::MAX {
                return;
            }
            pos += 1;
        }
    }
}

/// Splits `text` into tokens with the default [`Tokenizer`].
#[inline]
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    Tokenizer::new().split(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use yare::parameterized;

    fn collect(input: &str) -> Vec<(&str, TokenPos)> {
        let mut out = Vec::new();
        Tokenizer::new().tokenize(input, |text, pos| out.push((text, pos)));
        out
    }

    #[parameterized(
        single_word = { "Comcast", &["Comcast"] },
        two_words = { "hello world", &["hello", "world"] },
        period = { "end.start", &["end", "start"] },
        comma = { "a,b", &["a", "b"] },
        apostrophe = { "AOL's", &["AOL", "s"] },
        delimiter_runs = { "  one ,. two''\t\nthree  ", &["one", "two", "three"] },
        keeps_other_punctuation = { "mid-July (2014)!", &["mid-July", "(2014)!"] },
        typographic_apostrophe = { "Comcast’s", &["Comcast’s"] },
        non_breaking_space = { "New\u{00A0}York", &["New", "York"] },
        byte_order_mark = { "\u{FEFF}AOL\u{FEFF}", &["AOL"] },
        ideographic_space = { "東京\u{3000}大阪", &["東京", "大阪"] },
        next_line_is_not_whitespace = { "AOL\u{0085}Comcast", &["AOL\u{0085}Comcast"] },
    )]
    fn splits_on_delimiter_set(input: &str, expected: &[&str]) {
        assert_eq!(tokenize(input), expected);
    }

    #[parameterized(
        empty = { "" },
        spaces = { "     " },
        only_delimiters = { " ., '\t\r\n" },
        unicode_only_delimiters = { "\u{2003}\u{FEFF}." },
    )]
    fn all_delimiter_input_is_empty(input: &str) {
        assert!(tokenize(input).is_empty());
    }

    #[test]
    fn positions_are_sequential() {
        let out = collect("the. quick,, brown fox");
        assert_eq!(out.len(), 4);
        for (i, (_, pos)) in out.iter().enumerate() {
            assert_eq!(*pos, i as TokenPos);
        }
    }

    #[test]
    fn unicode_positions_are_sequential() {
        let out = collect("café\u{2009}crème brûlée");
        assert_eq!(out, [("café", 0), ("crème", 1), ("brûlée", 2)]);
    }

    #[test]
    fn no_case_folding() {
        assert_eq!(tokenize("AOL aol Aol"), ["AOL", "aol", "Aol"]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello, wörld");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        Tokenizer::new().tokenize(&input, |text, _| {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn ascii_and_unicode_paths_agree() {
        let ascii = "  I live in New York. It's big, really  ";
        let mut expected = Vec::new();
        Tokenizer::tokenize_ascii(ascii, &mut |t, p| expected.push((t, p)));
        let mut actual = Vec::new();
        Tokenizer::tokenize_unicode(ascii, &mut |t, p| actual.push((t, p)));
        assert_eq!(expected, actual);
    }

    #[test]
    fn tokenizer_is_reusable() {
        let t = Tokenizer::new();
        assert_eq!(t.split("hello world").len(), 2);
        assert_eq!(t.split("one two three").len(), 3);
    }

    #[test]
    fn delimiter_predicate() {
        for c in [' ', '\t', '\n', '.', ',', '\'', '\u{00A0}', '\u{FEFF}'] {
            assert!(is_delimiter(c), "{c:?} should split");
        }
        for c in ['a', '-', '’', '!', ';', '"', '\u{0085}'] {
            assert!(!is_delimiter(c), "{c:?} should not split");
        }
    }

    proptest! {
        #[test]
        fn joined_tokens_round_trip(words in prop::collection::vec("[A-Za-z0-9’!?-]{1,12}", 0..20)) {
            let joined = words.join(" ");
            let tokens = tokenize(&joined);
            prop_assert_eq!(tokens, words.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn tokens_never_contain_delimiters(input in "\\PC{0,64}") {
            for token in tokenize(&input) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.chars().any(is_delimiter));
            }
        }
    }
}
