//! # Public API
//!
//! Entry points that go from song text to a transposed, rendered sheet.
//!
//! ## Functions
//!
//! - [`load_sheet()`] - Parse song text (frontmatter transposition applied)
//! - [`load_sheet_from_path()`] - Same, reading the text from a file
//! - [`transpose_sheet()`] - Parse, then transpose by a number of half-steps
//! - [`render_sheet()`] - Parse, transpose and render in one call
//!
//! ## Typical Usage
//!
//! ```rust
//! use inline_chords::{render_sheet, OutputFormat};
//!
//! let source = r#"---
//! title: Drink! A River Pure and Clear
//! ---
//! [G]Drink! A river pure and clear
//! "#;
//!
//! let text = render_sheet(source, 2, OutputFormat::Text)?;
//! assert!(text.contains("Capo +2"));
//! # Ok::<(), inline_chords::ChordsError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::render::{render_json, render_text};
use crate::sheet::Sheet;

/// Output flavour for [`render_sheet()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Chords over lyrics with a title/label header.
    #[default]
    Text,
    /// Sheet snapshot as pretty JSON.
    Json,
}

/// Parse song text into a [`Sheet`].
///
/// # Errors
/// Returns [`crate::ChordsError::MetadataError`] if the frontmatter is invalid.
pub fn load_sheet(source: &str) -> Result<Sheet> {
    Sheet::parse(source)
}

/// Read and parse a song file.
///
/// # Errors
/// Returns [`crate::ChordsError::Io`] if the file can't be read, or a metadata
/// error as for [`load_sheet()`].
pub fn load_sheet_from_path(path: impl AsRef<Path>) -> Result<Sheet> {
    let source = fs::read_to_string(path)?;
    load_sheet(&source)
}

/// Parse song text and transpose it by `steps` half-steps on top of any
/// frontmatter transposition.
///
/// # Example
/// ```rust
/// use inline_chords::transpose_sheet;
///
/// let sheet = transpose_sheet("[C#m7]Sing", -3)?;
/// assert_eq!(sheet.lines()[0].words()[0].chord_string().as_deref(), Some("Bbm7"));
/// # Ok::<(), inline_chords::ChordsError>(())
/// ```
pub fn transpose_sheet(source: &str, steps: i32) -> Result<Sheet> {
    let mut sheet = load_sheet(source)?;
    sheet.transpose(steps);
    Ok(sheet)
}

/// Parse, transpose and render a song.
pub fn render_sheet(source: &str, steps: i32, format: OutputFormat) -> Result<String> {
    let sheet = transpose_sheet(source, steps)?;
    match format {
        OutputFormat::Text => Ok(render_text(&sheet, true)),
        OutputFormat::Json => render_json(&sheet),
    }
}
