//! Chunk-aware word tokenization.
//!
//! Text arrives in arbitrary pieces, so a single chunk can start or end in the
//! middle of a word. [`tokenize`] normalizes one chunk and reports enough about
//! its edges for a caller to stitch words back together across chunk seams.
//!
//! # How it works
//! 1. Strip apostrophes and quote variants, so contractions collapse
//!    (`"don't"` becomes `dont`).
//! 2. Lowercase character by character.
//! 3. Extract maximal runs of letters and combining marks (`[\p{L}\p{M}]+`).
//! 4. If the chunk ends on a letter, hold back the last run as
//!    [`Tokens::trailing`], since the next chunk may continue it.
//!
//! # Example
//! ```rust
//! use phrase_tokenizer::tokenize;
//!
//! let tokens = tokenize("Shouldn't be, sho");
//! assert_eq!(tokens.words, vec!["shouldnt", "be"]);
//! assert_eq!(tokens.trailing.as_deref(), Some("sho"));
//! assert!(tokens.starts_with_letter);
//! assert!(tokens.ends_with_letter());
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Characters removed before scanning so contractions stay one word.
pub const STRIPPED_QUOTES: &[char] = &[
    '\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{02BC}',
];

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{M}]+").expect("word pattern is valid"));

/// The normalized words of one chunk plus its edge information.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tokens {
    /// Words known to be complete on their right edge, in order.
    pub words: Vec<String>,
    /// Last run of a chunk that ended on a letter; it may continue in the next chunk.
    pub trailing: Option<String>,
    /// Whether the first character (after quote stripping) is a letter or mark.
    pub starts_with_letter: bool,
    /// False when nothing was left after quote stripping.
    pub has_text: bool,
}

impl Tokens {
    pub fn ends_with_letter(&self) -> bool {
        self.trailing.is_some()
    }

    /// Total number of runs extracted, held-back run included.
    pub fn run_count(&self) -> usize {
        self.words.len() + usize::from(self.trailing.is_some())
    }
}

/// Tokenize one chunk of raw text. Never fails; any input is accepted.
pub fn tokenize(chunk: &str) -> Tokens {
    let normalized: String = chunk
        .chars()
        .filter(|c| !STRIPPED_QUOTES.contains(c))
        .flat_map(char::to_lowercase)
        .collect();

    if normalized.is_empty() {
        return Tokens::default();
    }

    let starts_with_letter = normalized.chars().next().is_some_and(is_word_char);
    let ends_with_letter = normalized.chars().next_back().is_some_and(is_word_char);

    let mut words: Vec<String> = WORD_RUN
        .find_iter(&normalized)
        .map(|m| m.as_str().to_owned())
        .collect();
    let trailing = if ends_with_letter { words.pop() } else { None };

    Tokens {
        words,
        trailing,
        starts_with_letter,
        has_text: true,
    }
}

/// Whether `c` belongs to a word: any Unicode letter or combining mark.
pub fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_RUN.is_match(c.encode_utf8(&mut buf))
}
