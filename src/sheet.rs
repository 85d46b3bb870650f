//! # Sheet Module
//!
//! A whole song: optional YAML frontmatter followed by lyric lines with inline
//! chords.
//!
//! ## Format
//! ```text
//! ---
//! title: Drink! A River Pure and Clear
//! number: 1151
//! category: hymn
//! key: G
//! transpose: 2
//! ---
//! [G]Drink! A river pure and clear
//! That's [D7]flowing from the throne;
//!
//! [G]Here there [D7]is no [G-C-G]night!
//! ```
//!
//! The frontmatter block is only recognized on the first line. Every body line
//! becomes one [`ChordLine`]; blank lines are kept as verse spacers. A
//! `transpose` value in the frontmatter is applied on load.
//!
//! ## Example
//! ```rust
//! use inline_chords::Sheet;
//!
//! let sheet = Sheet::parse("---\ntitle: Test\n---\n[G]Drink!\n\nA river")?;
//! assert_eq!(sheet.metadata().title.as_deref(), Some("Test"));
//! assert_eq!(sheet.lines().len(), 3);
//! assert!(sheet.has_chords());
//! # Ok::<(), inline_chords::ChordsError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chord_line::{parse, ChordLine};
use crate::error::{ChordsError, Result};
use crate::transpose::{Transposer, TranspositionLabel};

const FRONTMATTER_MARKER: &str = "---";

/// Song metadata from the frontmatter block.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Half-steps applied right after loading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transpose: Option<i32>,
}

/// A parsed song and its transposition state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sheet {
    metadata: Metadata,
    lines: Vec<ChordLine>,
    transposer: Transposer,
}

impl Sheet {
    /// Parse a song from its text, applying any frontmatter transposition.
    pub fn parse(source: &str) -> Result<Self> {
        let (frontmatter, body) = split_frontmatter(source)?;
        let metadata = match frontmatter {
            Some(content) => parse_metadata(&content)?,
            None => Metadata::default(),
        };

        let lines: Vec<ChordLine> = body.lines().map(parse).collect();
        debug!(lines = lines.len(), title = ?metadata.title, "parsed sheet");

        let mut sheet = Self::from_lines(lines);
        if let Some(steps) = metadata.transpose {
            sheet.transpose(steps);
        }
        sheet.metadata = metadata;
        Ok(sheet)
    }

    /// A sheet without metadata.
    pub fn from_lines(lines: Vec<ChordLine>) -> Self {
        Self {
            metadata: Metadata::default(),
            lines,
            transposer: Transposer::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn lines(&self) -> &[ChordLine] {
        &self.lines
    }

    pub fn has_chords(&self) -> bool {
        self.lines.iter().any(ChordLine::has_chords)
    }

    pub fn transposition(&self) -> i64 {
        self.transposer.transposition()
    }

    pub fn label(&self) -> TranspositionLabel {
        self.transposer.label(&self.lines)
    }

    pub fn transpose(&mut self, steps: i32) -> TranspositionLabel {
        self.transposer.transpose(&mut self.lines, steps)
    }

    pub fn reset_transposition(&mut self) -> TranspositionLabel {
        self.transposer.reset_transposition(&mut self.lines)
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> SheetSnapshot<'_> {
        SheetSnapshot {
            metadata: &self.metadata,
            label: self.label(),
            lines: &self.lines,
        }
    }
}

/// What a front end needs to draw a sheet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSnapshot<'a> {
    pub metadata: &'a Metadata,
    pub label: TranspositionLabel,
    pub lines: &'a [ChordLine],
}

fn parse_metadata(content: &str) -> Result<Metadata> {
    if content.trim().is_empty() {
        return Ok(Metadata::default());
    }
    serde_yaml::from_str(content).map_err(|e| ChordsError::MetadataError(e.to_string()))
}

/// Split a leading `---` block from the body.
/// Returns (frontmatter_content, body)
fn split_frontmatter(source: &str) -> Result<(Option<String>, String)> {
    let lines: Vec<&str> = source.lines().collect();

    if lines.first().map(|l| l.trim()) != Some(FRONTMATTER_MARKER) {
        return Ok((None, source.to_string()));
    }

    let end = lines
        .iter()
        .skip(1)
        .position(|l| l.trim() == FRONTMATTER_MARKER)
        .map(|i| i + 1)
        .ok_or_else(|| ChordsError::MetadataError("frontmatter has no closing ---".to_string()))?;

    let content = lines[1..end].join("\n");
    let body = lines[end + 1..].join("\n");
    Ok((Some(content), body))
}
