//! # Error Types
//!
//! Parsing a chord line and transposing it never fail: malformed chord symbols
//! pass through untouched. Errors only come from the layers around that core:
//! reading a sheet from disk, its YAML frontmatter, and JSON output.
//!
//! ## Error Types
//! - `MetadataError` - Invalid or unterminated YAML frontmatter
//! - `Io` - Reading a sheet from a file failed
//! - `Json` - Serializing a sheet snapshot failed

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordsError {
    /// Invalid metadata error.
    ///
    /// Occurs when the frontmatter is not valid YAML, uses an unknown key, or
    /// has no closing `---` line.
    ///
    /// # Example
    /// ```
    /// # use inline_chords::ChordsError;
    /// let err = ChordsError::MetadataError("unknown field `composer`".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: unknown field `composer`");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChordsError>;
