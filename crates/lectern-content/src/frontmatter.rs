//! YAML frontmatter extraction.
//!
//! Every Lectern document starts with a YAML header delimited by `---` lines:
//!
//! ```markdown
//! ---
//! slug: intro
//! title: Introduction to AI Safety
//! contentId: 7a1e2f0c-3b4d-4c5e-8f90-a1b2c3d4e5f6
//! ---
//!
//! # Page: Welcome
//! ```
//!
//! Unlike general-purpose markdown, the header is mandatory: a document
//! without one cannot be identified, so extraction fails with a
//! [`FrontmatterError`] that callers turn into a diagnostic for that one
//! document.
//!
//! # Usage
//!
//! ```rust
//! use lectern_content::extract_frontmatter;
//!
//! let content = "---\ntitle: Test\n---\nBody";
//! let result = extract_frontmatter(content).unwrap();
//!
//! assert_eq!(result.get_str("title"), Some("Test"));
//! assert_eq!(result.body(), "Body");
//! assert_eq!(result.body_line(), 4);
//! ```

use lectern_core::{ContentError, Error, Result};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

/// Why a document's frontmatter could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontmatterError {
    /// The document does not start with `---`.
    #[error("Missing frontmatter")]
    Missing,

    /// The opening `---` has no matching closing line.
    #[error("Unclosed frontmatter")]
    Unclosed,

    /// The header is not valid YAML, or not a key/value mapping.
    #[error("Invalid frontmatter syntax: {message}")]
    InvalidSyntax {
        /// Underlying parser message
        message: String,
        /// 1-indexed line in the document, when the parser reported one
        line: Option<usize>,
    },
}

impl FrontmatterError {
    /// Line the diagnostic should point at.
    pub fn line(&self) -> usize {
        match self {
            Self::Missing | Self::Unclosed => 1,
            Self::InvalidSyntax { line, .. } => line.unwrap_or(1),
        }
    }

    /// Suggested fix for the author.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Missing => "Start the file with a '---' line, the header fields, and another '---' line",
            Self::Unclosed => "Add a closing '---' line after the header fields",
            Self::InvalidSyntax { .. } => "Check the header for unbalanced quotes or bad indentation",
        }
    }

    /// Convert into a diagnostic for `file`.
    pub fn to_content_error(&self, file: &str) -> ContentError {
        ContentError::error(file, self.to_string())
            .at_line(self.line())
            .with_suggestion(self.suggestion())
    }
}

/// Result of frontmatter extraction.
///
/// Holds the parsed header mapping, the body after the closing delimiter,
/// and the 1-indexed line the body starts on.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    value: Mapping,
    body: &'a str,
    body_line: usize,
}

impl<'a> FrontmatterResult<'a> {
    /// The parsed header mapping.
    pub fn value(&self) -> &Mapping {
        &self.value
    }

    /// Body content (everything after the closing delimiter line).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// 1-indexed line number of the first body line.
    pub fn body_line(&self) -> usize {
        self.body_line
    }

    /// Get a string field from the header.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.value.get(key)?.as_str()
    }

    /// Get a scalar field rendered as a trimmed, non-empty string.
    ///
    /// Numbers and booleans are rendered with their YAML spelling, so
    /// `number: 3` reads back as `"3"`.
    pub fn get_string(&self, key: &str) -> Option<String> {
        let rendered = match self.value.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!rendered.is_empty()).then_some(rendered)
    }

    /// Deserialize the header into a specific type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_value(Value::Mapping(self.value.clone()))
            .map_err(|e| Error::parse(format!("Failed to deserialize frontmatter: {e}")))
    }
}

/// Extract YAML frontmatter from a document.
///
/// The first line must be exactly `---`; the header ends at the next line
/// that is exactly `---`. An empty header yields an empty mapping.
///
/// # Example
///
/// ```rust
/// use lectern_content::{extract_frontmatter, FrontmatterError};
///
/// assert_eq!(extract_frontmatter("# No header").unwrap_err(), FrontmatterError::Missing);
/// assert_eq!(extract_frontmatter("---\ntitle: x\n").unwrap_err(), FrontmatterError::Unclosed);
/// ```
pub fn extract_frontmatter(content: &str) -> std::result::Result<FrontmatterResult<'_>, FrontmatterError> {
    let first_end = content.find('\n').unwrap_or(content.len());
    if content[..first_end].trim_end() != DELIMITER {
        return Err(FrontmatterError::Missing);
    }
    if first_end == content.len() {
        return Err(FrontmatterError::Unclosed);
    }

    let header_start = first_end + 1;
    let mut line_start = header_start;
    let mut line_number = 2;

    while line_start <= content.len() {
        let line_end = content[line_start..]
            .find('\n')
            .map_or(content.len(), |pos| line_start + pos);

        if content[line_start..line_end].trim_end() == DELIMITER {
            let header = &content[header_start..line_start];
            let body = if line_end < content.len() {
                &content[line_end + 1..]
            } else {
                ""
            };
            let value = parse_header(header)?;
            return Ok(FrontmatterResult {
                value,
                body,
                body_line: line_number + 1,
            });
        }

        if line_end == content.len() {
            break;
        }
        line_start = line_end + 1;
        line_number += 1;
    }

    log::debug!("Frontmatter opening delimiter found but no closing delimiter");
    Err(FrontmatterError::Unclosed)
}

fn parse_header(header: &str) -> std::result::Result<Mapping, FrontmatterError> {
    if header.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(header) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(FrontmatterError::InvalidSyntax {
            message: "header must be a list of 'key: value' pairs".to_string(),
            line: Some(2),
        }),
        // The header starts on line 2 of the document.
        Err(e) => Err(FrontmatterError::InvalidSyntax {
            line: e.location().map(|loc| loc.line() + 1),
            message: e.to_string(),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
