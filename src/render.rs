//! Text and JSON output for sheets.
//!
//! The text layout puts each chord on its own row above the lyric row, starting
//! at the column of the word it belongs to:
//!
//! ```text
//! G          D7    G-C-G
//! Here there is no night!
//! ```

use crate::chord_line::ChordLine;
use crate::error::Result;
use crate::sheet::Sheet;

/// Render `sheet` as chords-over-lyrics text.
///
/// With `header` set, the title and the transposition label (when present) are
/// printed first, followed by a blank line.
pub fn render_text(sheet: &Sheet, header: bool) -> String {
    let mut out = String::new();

    if header {
        let mut wrote_header = false;
        if let Some(title) = &sheet.metadata().title {
            out.push_str(title);
            out.push('\n');
            wrote_header = true;
        }
        if let Some(text) = sheet.label().text {
            out.push_str(&format!("[{}]\n", text));
            wrote_header = true;
        }
        if wrote_header {
            out.push('\n');
        }
    }

    for line in sheet.lines() {
        out.push_str(&render_line(line));
        out.push('\n');
    }

    out
}

/// Render one line; a chord row is only emitted when the line has chords.
pub fn render_line(line: &ChordLine) -> String {
    let lyrics: Vec<&str> = line.words().iter().map(|w| w.word()).collect();
    let lyric_row = lyrics.join(" ");

    if !line.has_chords() {
        return lyric_row;
    }

    let mut chord_row = String::new();
    let mut chord_width = 0;
    let mut column = 0;

    for word in line.words() {
        if let Some(chords) = word.chord_string().filter(|c| !c.trim().is_empty()) {
            if chord_width < column {
                chord_row.extend(std::iter::repeat(' ').take(column - chord_width));
                chord_width = column;
            } else if chord_width > 0 {
                // Keep neighbouring chords apart when the previous one overran.
                chord_row.push(' ');
                chord_width += 1;
            }
            chord_row.push_str(&chords);
            chord_width += chords.chars().count();
        }
        column += word.word().chars().count() + 1;
    }

    format!("{}\n{}", chord_row.trim_end(), lyric_row.trim_end())
}

/// Render the sheet snapshot as pretty-printed JSON.
pub fn render_json(sheet: &Sheet) -> Result<String> {
    Ok(serde_json::to_string_pretty(&sheet.snapshot())?)
}
