//! # Chord Line Module
//!
//! Parses one line of lyrics with inline chord markup into words, each word
//! optionally carrying the chords written in brackets right before it.
//!
//! ## Markup
//! A chord is written in square brackets attached to the syllable it falls on:
//!
//! ```text
//! [G]Drink! A river pure and clear
//! l[C]i[G]fe!
//! [G-C-G]night!
//! ```
//!
//! ## Parsing Algorithm
//! 1. Split the line on every whitespace character. Empty tokens are kept, so a
//!    blank line still yields one (empty) word and spacing survives.
//! 2. If the line holds no `[...]` anywhere, every word gets `chords == None`.
//! 3. Otherwise every token is searched: bracket contents become the word's
//!    chords in reading order (empty brackets are dropped), the brackets are cut
//!    out of the word, and a token without brackets gets an empty chord list.
//!
//! `None` and `Some(vec![])` are different on purpose: `None` means the line was
//! never searched for chords, an empty list means it was searched and this word
//! has none.
//!
//! ## Example
//! ```rust
//! use inline_chords::parse;
//!
//! let line = parse("[G]Drink! A river pure and clear");
//! assert!(line.has_chords());
//! assert_eq!(line.words()[0].word(), "Drink!");
//! assert_eq!(line.words()[0].chords(), Some(&["G".to_string()][..]));
//! assert_eq!(line.words()[1].chords(), Some(&[][..]));
//! ```
//!
//! ## Related Modules
//! - `transpose` - Rewrites the chords of parsed words
//! - `sheet` - Parses a whole song into chord lines

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::transpose::transpose_chord;

/// Non-greedy `[...]` chord annotation; group 1 is the chord text.
static CHORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("chord pattern is a valid regex"));

/// One whitespace-delimited token of a lyric line.
///
/// Holds the lyric text with chord markup removed and the chords attached to
/// it. The chords as first parsed are kept alongside the current ones together
/// with the offset applied so far, so every transposition is computed from the
/// written chord rather than from a previous result.
///
/// Equality compares what is shown, the word and its current chords, not how
/// they were reached.
#[derive(Debug, Clone, Serialize)]
pub struct ChordWord {
    word: String,
    chords: Option<Vec<String>>,
    #[serde(skip)]
    source: Option<Vec<String>>,
    #[serde(skip)]
    offset: i64,
}

impl PartialEq for ChordWord {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word && self.chords == other.chords
    }
}

impl Eq for ChordWord {}

impl ChordWord {
    /// A word from a line that was never searched for chords.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            chords: None,
            source: None,
            offset: 0,
        }
    }

    /// A word from a line that was searched for chords.
    pub fn with_chords(word: impl Into<String>, chords: Vec<String>) -> Self {
        Self {
            word: word.into(),
            source: Some(chords.clone()),
            chords: Some(chords),
            offset: 0,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn chords(&self) -> Option<&[String]> {
        self.chords.as_deref()
    }

    /// True when at least one chord is attached.
    pub fn has_chords(&self) -> bool {
        self.chords.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Chords joined by a single space, as shown above the word.
    ///
    /// - `None` when the line was never searched for chords.
    /// - `None` when both the word and the joined chords are empty.
    /// - `Some(" ")` when the word has text but no chords, so the renderer
    ///   still reserves the chord row above it.
    pub fn chord_string(&self) -> Option<String> {
        let chords = self.chords.as_ref()?;
        let joined = chords.join(" ");
        let joined = joined.trim();
        if !joined.is_empty() {
            Some(joined.to_string())
        } else if self.word.is_empty() {
            None
        } else {
            Some(" ".to_string())
        }
    }

    /// Move every chord by `steps` half-steps.
    ///
    /// Each chord is recomputed from its written form and the accumulated
    /// offset, so offsets that cancel out restore the exact written spelling.
    pub(crate) fn shift(&mut self, steps: i32) {
        let (Some(chords), Some(source)) = (self.chords.as_mut(), self.source.as_ref()) else {
            return;
        };
        self.offset += i64::from(steps);
        for (chord, written) in chords.iter_mut().zip(source) {
            *chord = transpose_chord(written, self.offset);
        }
    }
}

/// One line of a song.
///
/// The word sequence is fixed once parsed; only the chord spellings of its
/// words change when transposed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChordLine {
    words: Vec<ChordWord>,
}

impl ChordLine {
    pub fn new(words: Vec<ChordWord>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[ChordWord] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [ChordWord] {
        &mut self.words
    }

    /// True when any word carries a non-empty chord list.
    pub fn has_chords(&self) -> bool {
        self.words.iter().any(ChordWord::has_chords)
    }
}

impl From<&str> for ChordLine {
    fn from(line: &str) -> Self {
        parse(line)
    }
}

/// Parse one line of lyrics with inline `[chord]` markup.
pub fn parse(line: &str) -> ChordLine {
    let tokens = line.split(char::is_whitespace);

    if !CHORD_PATTERN.is_match(line) {
        return ChordLine::new(tokens.map(ChordWord::new).collect());
    }

    ChordLine::new(tokens.map(parse_token).collect())
}

fn parse_token(token: &str) -> ChordWord {
    let chords: Vec<String> = CHORD_PATTERN
        .captures_iter(token)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|chord| !chord.is_empty())
        .map(str::to_string)
        .collect();

    let word = CHORD_PATTERN.replace_all(token, "");
    ChordWord::with_chords(word, chords)
}
