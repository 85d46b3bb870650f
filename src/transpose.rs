//! # Transpose Module
//!
//! Shifts chord symbols by a number of chromatic half-steps and keeps the
//! running offset plus the label shown for it.
//!
//! ## Chord Symbols
//! - **Root**: letter `A`-`G` with optional `#`/`♯` or `b`/`♭`
//! - **Suffix**: everything after the root (`m`, `7`, `m7`, `dim`, `sus4`, ...),
//!   copied unchanged
//! - **Slash bass**: `G/B` transposes the bass note after `/` as well
//! - **Compound**: `G-C-G` is split on `-`, each piece transposed on its own
//! - Anything without a recognizable root (`N.C.`, `*`) passes through
//!
//! ## Spelling
//! A chord is always recomputed from its written form and the total offset
//! applied to it. A total that is a multiple of 12 gives back the written
//! chord exactly; otherwise upward totals spell with sharps and downward
//! totals with flats:
//!
//! ```rust
//! use inline_chords::transpose_chord;
//!
//! assert_eq!(transpose_chord("G", -3), "E");
//! assert_eq!(transpose_chord("C#m7", -3), "Bbm7");
//! assert_eq!(transpose_chord("Em", -3), "Dbm");
//! assert_eq!(transpose_chord("G-C-G", 2), "A-D-A");
//! assert_eq!(transpose_chord("C#m7", 12), "C#m7");
//! ```
//!
//! ## Offset and Label
//! [`Transposer`] accumulates the steps applied to a set of lines and derives a
//! [`TranspositionLabel`]: `"Transpose"` at zero, `"Capo +2"` / `"Capo -3"`
//! otherwise, and no label at all when none of the lines carry chords.

use serde::Serialize;
use tracing::{debug, trace};

use crate::chord_line::ChordLine;
use crate::pitch::{self, Spelling};

/// Label text shown while no transposition is applied.
pub const TRANSPOSE_PLACEHOLDER: &str = "Transpose";

/// Transpose a chord symbol by `offset` half-steps from its written form.
pub fn transpose_chord(chord: &str, offset: i64) -> String {
    if offset.rem_euclid(12) == 0 {
        return chord.to_string();
    }

    let spelling = Spelling::for_offset(offset);
    chord
        .split('-')
        .map(|piece| transpose_single(piece, offset, spelling))
        .collect::<Vec<_>>()
        .join("-")
}

fn transpose_single(chord: &str, offset: i64, spelling: Spelling) -> String {
    let Some((root, root_len)) = pitch::parse_root(chord) else {
        if !chord.is_empty() {
            debug!(chord, "no root to transpose, leaving chord as written");
        }
        return chord.to_string();
    };

    let suffix = &chord[root_len..];
    let mut out = String::with_capacity(chord.len() + 1);
    out.push_str(spelling.name(pitch::shift(root, offset)));

    match suffix.rsplit_once('/') {
        Some((quality, bass)) => {
            out.push_str(quality);
            out.push('/');
            out.push_str(&transpose_bass(bass, offset, spelling));
        }
        None => out.push_str(suffix),
    }

    out
}

fn transpose_bass(bass: &str, offset: i64, spelling: Spelling) -> String {
    match pitch::parse_root(bass) {
        Some((root, root_len)) => {
            format!("{}{}", spelling.name(pitch::shift(root, offset)), &bass[root_len..])
        }
        None => bass.to_string(),
    }
}

/// Transpose every chord of every word in `lines` by `steps` half-steps.
///
/// Word count, word order and the number of chords per word never change.
pub fn transpose(lines: &mut [ChordLine], steps: i32) {
    if steps == 0 {
        return;
    }
    for line in lines.iter_mut() {
        for word in line.words_mut() {
            word.shift(steps);
        }
    }
}

/// Undo `current_offset` one half-step at a time.
///
/// Applies `transpose(lines, ±1)` repeatedly, opposite to the sign of the
/// offset, until it reaches zero. Returns the offset left, which is always 0.
pub fn reset_transposition(lines: &mut [ChordLine], current_offset: i64) -> i64 {
    let mut offset = current_offset;
    while offset != 0 {
        let step = -offset.signum() as i32;
        trace!(offset, step, "reset step");
        transpose(lines, step);
        offset += i64::from(step);
    }
    offset
}

/// Whether the label reads as the neutral placeholder or as an active offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    #[default]
    Plain,
    Accented,
}

/// Display state for the current transposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspositionLabel {
    pub transposition: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub emphasis: Emphasis,
}

impl TranspositionLabel {
    /// Label for `transposition` over lines that do or don't carry chords.
    ///
    /// # Example
    /// ```
    /// use inline_chords::{Emphasis, TranspositionLabel};
    ///
    /// let label = TranspositionLabel::new(-3, true);
    /// assert_eq!(label.text.as_deref(), Some("Capo -3"));
    /// assert_eq!(label.emphasis, Emphasis::Accented);
    ///
    /// assert_eq!(TranspositionLabel::new(2, false).text, None);
    /// ```
    pub fn new(transposition: i64, has_chords: bool) -> Self {
        let (text, emphasis) = match (has_chords, transposition) {
            (false, _) => (None, Emphasis::Plain),
            (true, 0) => (Some(TRANSPOSE_PLACEHOLDER.to_string()), Emphasis::Plain),
            (true, n) => (Some(format!("Capo {:+}", n)), Emphasis::Accented),
        };
        Self {
            transposition,
            text,
            emphasis,
        }
    }
}

/// Running transposition over a set of chord lines.
///
/// Every call runs over the whole set before returning, and the returned
/// [`TranspositionLabel`] reflects the finished state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Transposer {
    transposition: i64,
}

impl Transposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transposition(&self) -> i64 {
        self.transposition
    }

    /// Transpose `lines` by `steps` and accumulate the offset.
    pub fn transpose(&mut self, lines: &mut [ChordLine], steps: i32) -> TranspositionLabel {
        transpose(lines, steps);
        self.transposition += i64::from(steps);
        debug!(steps, transposition = self.transposition, "transposed chord lines");
        self.label(lines)
    }

    /// Walk the offset back to zero in unit steps.
    pub fn reset_transposition(&mut self, lines: &mut [ChordLine]) -> TranspositionLabel {
        while self.transposition != 0 {
            let step = -self.transposition.signum() as i32;
            trace!(transposition = self.transposition, step, "reset step");
            self.transpose(lines, step);
        }
        self.label(lines)
    }

    pub fn label(&self, lines: &[ChordLine]) -> TranspositionLabel {
        let has_chords = lines.iter().any(ChordLine::has_chords);
        TranspositionLabel::new(self.transposition, has_chords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord_line::parse;

    fn all_chords(lines: &[ChordLine]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|l| l.words())
            .filter_map(|w| w.chords())
            .flatten()
            .cloned()
            .collect()
    }

    #[test]
    fn test_transpose_down_three() {
        assert_eq!(transpose_chord("G", -3), "E");
        assert_eq!(transpose_chord("G7", -3), "E7");
        assert_eq!(transpose_chord("C#m7", -3), "Bbm7");
        assert_eq!(transpose_chord("D", -3), "B");
        assert_eq!(transpose_chord("Em", -3), "Dbm");
    }

    #[test]
    fn test_transpose_up_uses_sharps() {
        assert_eq!(transpose_chord("G", 1), "G#");
        assert_eq!(transpose_chord("Bb", 1), "B");
        assert_eq!(transpose_chord("Eb", 3), "F#");
        assert_eq!(transpose_chord("Asus4", 1), "A#sus4");
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(transpose_chord("B", 1), "C");
        assert_eq!(transpose_chord("C", -1), "B");
        assert_eq!(transpose_chord("A", 14), "B");
        assert_eq!(transpose_chord("A", -14), "G");
    }

    #[test]
    fn test_full_octave_keeps_spelling() {
        for chord in ["C#m7", "Dbm", "Bbdim", "F#", "G-C-G", "E#"] {
            assert_eq!(transpose_chord(chord, 12), chord);
            assert_eq!(transpose_chord(chord, -24), chord);
        }
    }

    #[test]
    fn test_extreme_offsets_do_not_overflow() {
        assert_eq!(transpose_chord("B", i64::from(i32::MAX)), "F#");
        assert_eq!(transpose_chord("B", -i64::from(i32::MAX)), "E");
        assert_eq!(transpose_chord("C", i64::MAX), "G");
        assert_eq!(transpose_chord("C", i64::MIN), "E");
        assert_eq!(transpose_chord("G/B", i64::MIN), "B/Eb");
    }

    #[test]
    fn test_transposer_extreme_steps_round_trip() {
        let mut lines = vec![parse("[B]Go")];
        let mut transposer = Transposer::new();

        let label = transposer.transpose(&mut lines, i32::MAX);
        assert_eq!(all_chords(&lines), vec!["F#"]);
        assert_eq!(label.text.as_deref(), Some("Capo +2147483647"));

        transposer.transpose(&mut lines, -i32::MAX);
        assert_eq!(transposer.transposition(), 0);
        assert_eq!(all_chords(&lines), vec!["B"]);

        // The running total leaves the i32 range without losing track.
        transposer.transpose(&mut lines, i32::MAX);
        transposer.transpose(&mut lines, i32::MAX);
        transposer.transpose(&mut lines, i32::MIN);
        transposer.transpose(&mut lines, i32::MIN);
        assert_eq!(transposer.transposition(), -2);
        assert_eq!(all_chords(&lines), vec!["A"]);
    }

    #[test]
    fn test_suffix_untouched() {
        assert_eq!(transpose_chord("Cmaj7", 2), "Dmaj7");
        assert_eq!(transpose_chord("Fdim", -1), "Edim");
        assert_eq!(transpose_chord("Bbm7b5", 2), "Cm7b5");
    }

    #[test]
    fn test_compound_chord() {
        assert_eq!(transpose_chord("G-C-G", 2), "A-D-A");
        assert_eq!(transpose_chord("D7-G", -2), "C7-F");
    }

    #[test]
    fn test_slash_bass() {
        assert_eq!(transpose_chord("G/B", 2), "A/C#");
        assert_eq!(transpose_chord("D/F#", -2), "C/E");
        assert_eq!(transpose_chord("Am7/G", 3), "Cm7/A#");
        assert_eq!(transpose_chord("C/x", 2), "D/x");
    }

    #[test]
    fn test_malformed_passes_through() {
        assert_eq!(transpose_chord("N.C.", 2), "N.C.");
        assert_eq!(transpose_chord("*", -5), "*");
        assert_eq!(transpose_chord("x-G", 2), "x-A");
        assert_eq!(transpose_chord("G--C", 2), "A--D");
    }

    #[test]
    fn test_transpose_lines_keeps_attachment() {
        let mut lines = vec![parse("[G]Here there [D7]is no [G-C-G]night!")];
        transpose(&mut lines, 2);

        let words = lines[0].words();
        assert_eq!(words[0].word(), "Here");
        assert_eq!(words[0].chords(), Some(&["A".to_string()][..]));
        assert_eq!(words[1].chords(), Some(&[][..]));
        assert_eq!(words[2].word(), "is");
        assert_eq!(words[2].chords(), Some(&["E7".to_string()][..]));
        assert_eq!(words[4].word(), "night!");
        assert_eq!(words[4].chords(), Some(&["A-D-A".to_string()][..]));
    }

    #[test]
    fn test_transpose_zero_steps_is_noop() {
        let mut lines = vec![parse("[C#]Hal[Bb]le")];
        transpose(&mut lines, 0);
        assert_eq!(all_chords(&lines), vec!["C#", "Bb"]);
    }

    #[test]
    fn test_round_trip_restores_spelling() {
        let mut lines = vec![parse("[C#m7]Al[Db]le[G/B]lu[Eb-Ab]ia")];
        let original = all_chords(&lines);
        for n in [1, 3, 6, 11, 13, -5, -12, -17] {
            transpose(&mut lines, n);
            transpose(&mut lines, -n);
            assert_eq!(all_chords(&lines), original, "round trip by {}", n);
        }
    }

    #[test]
    fn test_reset_transposition_free_fn() {
        let mut lines = vec![parse("[C#m7]Sing [F]to the [Bb]Lord")];
        let original = all_chords(&lines);
        transpose(&mut lines, 4);
        transpose(&mut lines, -9);
        assert_eq!(reset_transposition(&mut lines, -5), 0);
        assert_eq!(all_chords(&lines), original);
    }

    #[test]
    fn test_transposer_labels() {
        let mut lines = vec![parse("[G]Drink! A river pure and clear")];
        let mut transposer = Transposer::new();

        let label = transposer.label(&lines);
        assert_eq!(label.text.as_deref(), Some("Transpose"));
        assert_eq!(label.emphasis, Emphasis::Plain);

        let label = transposer.transpose(&mut lines, 2);
        assert_eq!(label.text.as_deref(), Some("Capo +2"));
        assert_eq!(label.emphasis, Emphasis::Accented);

        let label = transposer.transpose(&mut lines, -5);
        assert_eq!(label.text.as_deref(), Some("Capo -3"));
        assert_eq!(label.emphasis, Emphasis::Accented);
        assert_eq!(transposer.transposition(), -3);
    }

    #[test]
    fn test_transposer_reset() {
        let mut lines = vec![
            parse("[G]Here there [D7]is no [G-C-G]night!"),
            parse(""),
            parse("[C#m7]Al[Ebsus4]le"),
        ];
        let original = all_chords(&lines);
        let mut transposer = Transposer::new();
        transposer.transpose(&mut lines, 5);
        transposer.transpose(&mut lines, -2);
        transposer.transpose(&mut lines, 7);

        let label = transposer.reset_transposition(&mut lines);
        assert_eq!(transposer.transposition(), 0);
        assert_eq!(label.text.as_deref(), Some("Transpose"));
        assert_eq!(label.emphasis, Emphasis::Plain);
        assert_eq!(all_chords(&lines), original);
    }

    #[test]
    fn test_label_suppressed_without_chords() {
        let mut lines = vec![parse("Drink! A river"), parse("[]pure and clear")];
        let mut transposer = Transposer::new();
        assert_eq!(transposer.label(&lines).text, None);

        let label = transposer.transpose(&mut lines, 3);
        assert_eq!(label.text, None);
        assert_eq!(label.emphasis, Emphasis::Plain);
        assert_eq!(label.transposition, 3);
    }

    #[test]
    fn test_label_serializes_camel_case() {
        let json = serde_json::to_string(&TranspositionLabel::new(2, true)).unwrap();
        assert_eq!(json, r#"{"transposition":2,"text":"Capo +2","emphasis":"accented"}"#);
    }
}
