//! Chromatic spelling tables.
//!
//! Pitch classes run from C = 0 to B = 11. Spelling a pitch class back into a
//! note name is a lookup into one of two fixed tables; parsing a root is the
//! reverse lookup.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Spellings used when transposing upward.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Spellings used when transposing downward.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Reverse lookup from a spelled root to its pitch class.
///
/// Covers both tables plus the enharmonic spellings neither table produces
/// (`Cb`, `Fb`, `E#`, `B#`) so hand-written chords still parse.
static PITCH_CLASSES: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (pc, (sharp, flat)) in SHARP_NAMES.iter().zip(FLAT_NAMES.iter()).enumerate() {
        map.insert(*sharp, pc as u8);
        map.insert(*flat, pc as u8);
    }
    map.insert("Cb", 11);
    map.insert("Fb", 4);
    map.insert("E#", 5);
    map.insert("B#", 0);
    map
});

/// Which table black keys are spelled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Sharps,
    Flats,
}

impl Spelling {
    /// Upward offsets spell with sharps, downward ones with flats.
    pub fn for_offset(offset: i64) -> Self {
        if offset < 0 {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }

    pub fn name(self, pitch_class: u8) -> &'static str {
        let index = usize::from(pitch_class % 12);
        match self {
            Spelling::Sharps => SHARP_NAMES[index],
            Spelling::Flats => FLAT_NAMES[index],
        }
    }
}

/// Shift a pitch class by `steps` half-steps, wrapping into 0..12.
pub fn shift(pitch_class: u8, steps: i64) -> u8 {
    (i64::from(pitch_class) + steps.rem_euclid(12)).rem_euclid(12) as u8
}

/// Parse the root at the start of `symbol`.
///
/// Returns the pitch class and the byte length of the root (letter plus an
/// optional `#`, `♯`, `b` or `♭`). Returns `None` when `symbol` does not start
/// with a letter `A` to `G`.
pub fn parse_root(symbol: &str) -> Option<(u8, usize)> {
    let mut chars = symbol.chars();
    let letter = chars.next().filter(|c| ('A'..='G').contains(c))?;

    let (accidental, accidental_len) = match chars.next() {
        Some(c @ ('#' | '♯')) => ("#", c.len_utf8()),
        Some(c @ ('b' | '♭')) => ("b", c.len_utf8()),
        _ => ("", 0),
    };

    let mut key = String::with_capacity(2);
    key.push(letter);
    key.push_str(accidental);

    PITCH_CLASSES
        .get(key.as_str())
        .map(|&pc| (pc, letter.len_utf8() + accidental_len))
}
