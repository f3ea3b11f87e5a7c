//! Content diagnostics.
//!
//! Every stage of the compiler reports problems in the authored content as
//! [`ContentError`] values rather than aborting. Callers collect them into a
//! [`Diagnostics`] accumulator and hand partial results downstream.
//!
//! # Example
//!
//! ```rust
//! use lectern_core::{ContentError, Diagnostics};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.push(
//!     ContentError::warning("Lenses/intro.md", "Duplicate field 'content'")
//!         .at_line(12)
//!         .with_suggestion("Remove one of the definitions"),
//! );
//!
//! assert!(!diagnostics.has_errors());
//! assert_eq!(diagnostics.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The content cannot be served correctly.
    Error,
    /// The content can be served but is probably not what the author meant.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single problem found in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentError {
    /// Path of the file the problem was found in.
    pub file: String,
    /// 1-indexed line number, when the problem can be pinned to a line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Human-readable description.
    pub message: String,
    /// Actionable fix, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Error or warning.
    pub severity: Severity,
}

impl ContentError {
    /// Creates an error-severity diagnostic.
    pub fn error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(file, message, Severity::Error)
    }

    /// Creates a warning-severity diagnostic.
    pub fn warning(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(file, message, Severity::Warning)
    }

    fn new(file: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            file: file.into(),
            line: None,
            message: message.into(),
            suggestion: None,
            severity,
        }
    }

    /// Pin the diagnostic to a 1-indexed line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a suggested fix.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Returns `true` for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}: {}: {}", self.file, self.severity, self.message)?,
            None => write!(f, "{}: {}: {}", self.file, self.severity, self.message)?,
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (hint: {suggestion})")?;
        }
        Ok(())
    }
}

/// Order-preserving accumulator of [`ContentError`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<ContentError>,
}

impl Diagnostics {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: ContentError) {
        self.items.push(diagnostic);
    }

    /// Record every diagnostic from another source, preserving order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = ContentError>) {
        self.items.extend(diagnostics);
    }

    /// Returns `true` if any error-severity diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(ContentError::is_error)
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over recorded diagnostics in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentError> {
        self.items.iter()
    }

    /// First error-severity diagnostic, if any.
    pub fn first_error(&self) -> Option<&ContentError> {
        self.items.iter().find(|d| d.is_error())
    }

    /// Consume the accumulator.
    pub fn into_vec(self) -> Vec<ContentError> {
        self.items
    }
}

impl IntoIterator for Diagnostics {
    type Item = ContentError;
    type IntoIter = std::vec::IntoIter<ContentError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a ContentError;
    type IntoIter = std::slice::Iter<'a, ContentError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
