//! Inline chord parsing and transposition for lyric sheets.
//!
//! Lyric lines carry chords in brackets attached to the syllable they fall on
//! (`[G]Drink! A river`). [`parse`] turns a line into words with their chords,
//! [`Transposer`] shifts every chord by half-steps and keeps the label for the
//! current offset, and [`Sheet`] ties a whole song and its metadata together.

pub mod api;
pub mod chord_line;
pub mod error;
pub mod pitch;
pub mod render;
pub mod sheet;
pub mod transpose;

pub use api::{load_sheet, load_sheet_from_path, render_sheet, transpose_sheet, OutputFormat};
pub use chord_line::{parse, ChordLine, ChordWord};
pub use error::{ChordsError, Result};
pub use render::{render_json, render_line, render_text};
pub use sheet::{Metadata, Sheet, SheetSnapshot};
pub use transpose::{
    reset_transposition, transpose, transpose_chord, Emphasis, Transposer, TranspositionLabel,
};
