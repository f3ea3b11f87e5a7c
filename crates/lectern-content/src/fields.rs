//! `key:: value` field extraction.
//!
//! Fields are the structured part of a section body:
//!
//! ```markdown
//! source:: [[../Lenses/what-is-ai]]
//! optional:: true
//! content::
//! Everything on the following lines belongs to `content`
//! until the next field marker or the end of the scope.
//! ```
//!
//! The scanner is a small state machine over lines with a single
//! accumulator for the multiline field being collected. A continuation ends
//! at the next field marker or at the end of the slice it was given; the
//! caller cuts the slice at recognized structural sub-headers. A
//! heading-shaped line inside a continuation also ends it, with a warning.

use std::sync::LazyLock;

use lectern_core::{ContentError, Diagnostics};
use regex::Regex;

use crate::sections::{heading_depth, is_fence};

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*)::(.*)$").expect("Invalid field regex")
});

static SINGLE_COLON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*):(?:\s|$)").expect("Invalid single-colon regex")
});

/// Whether a line opens a multiline continuation: `Some(true)` for a field
/// marker with nothing after `::`, `Some(false)` for any other field marker.
pub(crate) fn opens_continuation(line: &str) -> Option<bool> {
    FIELD_RE.captures(line).map(|caps| caps[2].trim().is_empty())
}

/// Ordered field map with case-sensitive keys.
///
/// Re-defining a key keeps its original position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, if defined.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a field is defined (even with an empty value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Define a field, returning the previous value if it was already set.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Iterate fields in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field is defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Pending<'a> {
    key: String,
    line: usize,
    lines: Vec<&'a str>,
}

/// Extract fields from one scope (a section's own lines, or one
/// sub-section's lines).
///
/// `first_line` is the 1-indexed document line of `lines[0]`. Warnings go to
/// `diagnostics`; nothing here is fatal.
///
/// # Example
///
/// ```rust
/// use lectern_content::extract_fields;
/// use lectern_core::Diagnostics;
///
/// let lines = ["from:: \"The first step\"", "content::", "Line one", "Line two", ""];
/// let mut diagnostics = Diagnostics::new();
/// let fields = extract_fields(&lines, 10, "Lenses/a.md", &["from", "content"], &mut diagnostics);
///
/// assert_eq!(fields.get("from"), Some("\"The first step\""));
/// assert_eq!(fields.get("content"), Some("Line one\nLine two"));
/// assert!(diagnostics.is_empty());
/// ```
pub fn extract_fields(
    lines: &[&str],
    first_line: usize,
    file: &str,
    known_fields: &[&str],
    diagnostics: &mut Diagnostics,
) -> Fields {
    let mut fields = Fields::new();
    let mut pending: Option<Pending<'_>> = None;
    let mut seen_field = false;
    let mut warned_free_text = false;
    let mut in_fence = false;

    for (offset, &line) in lines.iter().enumerate() {
        let line_number = first_line + offset;

        if is_fence(line) {
            in_fence = !in_fence;
        } else if !in_fence {
            if let Some(caps) = FIELD_RE.captures(line) {
                if let Some(done) = pending.take() {
                    finish(done, &mut fields, file, diagnostics);
                }
                seen_field = true;

                let key = caps[1].to_string();
                let value = caps[2].trim();
                if value.is_empty() {
                    pending = Some(Pending {
                        key,
                        line: line_number,
                        lines: Vec::new(),
                    });
                } else {
                    define(&mut fields, key, value.to_string(), line_number, file, diagnostics);
                }
                continue;
            }

            if let Some(open) = &pending {
                if heading_depth(line).is_some() {
                    diagnostics.push(
                        ContentError::warning(
                            file,
                            format!(
                                "Line looks like a Markdown heading and ends field '{}'",
                                open.key
                            ),
                        )
                        .at_line(line_number)
                        .with_suggestion(format!(
                            "Escape it as '\\{}' to keep it inside the field",
                            line.trim_start()
                        )),
                    );
                    if let Some(done) = pending.take() {
                        finish(done, &mut fields, file, diagnostics);
                    }
                    continue;
                }
            }
        }

        if let Some(open) = pending.as_mut() {
            open.lines.push(line);
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        if !in_fence {
            if let Some(key) = single_colon_field(line, known_fields) {
                diagnostics.push(
                    ContentError::warning(file, format!("Field '{key}' uses a single colon"))
                        .at_line(line_number)
                        .with_suggestion(format!("Write '{key}::' to define the field")),
                );
                continue;
            }
        }

        if !seen_field && !warned_free_text {
            warned_free_text = true;
            diagnostics.push(
                ContentError::warning(file, "Text before the first field is ignored")
                    .at_line(line_number)
                    .with_suggestion("Put this text inside a field such as 'content::'"),
            );
        }
    }

    if let Some(done) = pending.take() {
        finish(done, &mut fields, file, diagnostics);
    }

    fields
}

fn finish(pending: Pending<'_>, fields: &mut Fields, file: &str, diagnostics: &mut Diagnostics) {
    let start = pending
        .lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(pending.lines.len());
    let value = pending.lines[start..].join("\n").trim_end().to_string();
    define(fields, pending.key, value, pending.line, file, diagnostics);
}

fn define(
    fields: &mut Fields,
    key: String,
    value: String,
    line: usize,
    file: &str,
    diagnostics: &mut Diagnostics,
) {
    let message = format!("Duplicate field '{key}'");
    if fields.insert(key, value).is_some() {
        diagnostics.push(
            ContentError::warning(file, message)
                .at_line(line)
                .with_suggestion("Remove one of the definitions; the last one is used"),
        );
    }
}

fn single_colon_field<'a>(line: &'a str, known_fields: &[&str]) -> Option<&'a str> {
    let caps = SINGLE_COLON_RE.captures(line)?;
    let key = caps.get(1)?.as_str();
    known_fields.contains(&key).then_some(key)
}

// ============================================================================
// Tests
// ============================================================================
