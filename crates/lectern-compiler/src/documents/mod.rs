//! Per-type document parsers.
//!
//! Each parser composes the generic stages from `lectern-content`
//! (frontmatter, sections, fields, wikilinks) with the validation rules of
//! one document type. Parsers never fail outright: they return a
//! [`ParseOutcome`] holding the parsed value, when the document is usable,
//! together with every diagnostic found along the way.

pub mod article;
pub mod course;
pub mod learning_outcome;
pub mod lens;
pub mod module;
pub mod segments;
pub mod video;

use lectern_content::{Fields, FrontmatterResult, Section, extract_frontmatter, resolve_reference};
use lectern_core::{ContentError, ContentKind, ContentLayout, Diagnostics, is_valid_content_id};

pub use article::{Article, parse_article};
pub use course::parse_course;
pub use learning_outcome::{LearningOutcome, LensReference, parse_learning_outcome};
pub use lens::{Lens, LensSection, TerminalKind, parse_lens};
pub use module::{Module, ModuleIdentity, ModuleSection, parse_module};
pub use segments::SegmentSource;
pub use video::{Cue, VideoTranscript, parse_video_transcript};

/// A parsed document plus its diagnostics.
///
/// `value` is `None` when the document cannot be used at all (unreadable
/// header, missing identity). Diagnostics may be present either way.
#[derive(Debug, Clone)]
pub struct ParseOutcome<T> {
    /// The usable document, if any.
    pub value: Option<T>,
    /// Everything found while parsing, in document order.
    pub diagnostics: Diagnostics,
}

impl<T> ParseOutcome<T> {
    pub(crate) fn new(value: Option<T>, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }
}

/// Extract frontmatter, recording a diagnostic on failure.
pub(crate) fn read_header<'a>(
    text: &'a str,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Option<FrontmatterResult<'a>> {
    match extract_frontmatter(text) {
        Ok(header) => Some(header),
        Err(e) => {
            diagnostics.push(e.to_content_error(file));
            None
        }
    }
}

/// A required, non-empty frontmatter field.
pub(crate) fn required_header(
    header: &FrontmatterResult<'_>,
    key: &str,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    let value = header.get_string(key);
    if value.is_none() {
        diagnostics.push(
            ContentError::error(file, format!("Missing required frontmatter field '{key}'"))
                .at_line(1)
                .with_suggestion(format!("Add '{key}: ...' between the '---' lines")),
        );
    }
    value
}

/// A required frontmatter field holding a UUID.
pub(crate) fn required_content_id(
    header: &FrontmatterResult<'_>,
    key: &str,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    let id = required_header(header, key, file, diagnostics)?;
    if is_valid_content_id(&id) {
        Some(id)
    } else {
        diagnostics.push(
            ContentError::error(file, format!("Field '{key}' must be a UUID, found '{id}'"))
                .at_line(1)
                .with_suggestion("Generate a fresh id with a UUID generator such as `uuidgen`"),
        );
        None
    }
}

/// A required, non-empty section field.
pub(crate) fn required_field<'s>(
    section: &'s Section,
    key: &str,
    label: &str,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Option<&'s str> {
    match section.fields.get(key) {
        Some(value) if !value.trim().is_empty() => Some(value),
        Some(_) => {
            diagnostics.push(
                ContentError::error(file, format!("{label} has an empty '{key}::' field"))
                    .at_line(section.line)
                    .with_suggestion(format!("Give '{key}::' a value")),
            );
            None
        }
        None => {
            diagnostics.push(
                ContentError::error(file, format!("{label} is missing required field '{key}::'"))
                    .at_line(section.line)
                    .with_suggestion(format!("Add a '{key}:: ...' line below the header")),
            );
            None
        }
    }
}

/// Parse the `optional::` flag (absent means `false`).
pub(crate) fn optional_flag(fields: &Fields, line: usize, file: &str, diagnostics: &mut Diagnostics) -> bool {
    let Some(value) = fields.get("optional") else {
        return false;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => true,
        "false" => false,
        other => {
            diagnostics.push(
                ContentError::error(file, format!("Field 'optional' must be 'true' or 'false', found '{other}'"))
                    .at_line(line)
                    .with_suggestion("Write 'optional:: true' or remove the field"),
            );
            false
        }
    }
}

/// Resolve a wikilink field to a path of the expected kind.
pub(crate) fn reference(
    value: &str,
    expected: ContentKind,
    line: usize,
    file: &str,
    layout: &ContentLayout,
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    match resolve_reference(value, file, layout, expected) {
        Ok(link) => Some(link.path),
        Err(e) => {
            diagnostics.push(e.to_content_error(file, line, layout));
            None
        }
    }
}

/// Resolve the required `source::` field of a reference section.
///
/// A reference that cannot be resolved is kept as `Err` with a one-line
/// summary, so whatever depends on it can fail instead of skipping it. The
/// detailed diagnostic is recorded here.
pub(crate) fn source_reference(
    section: &Section,
    expected: ContentKind,
    label: &str,
    file: &str,
    layout: &ContentLayout,
    diagnostics: &mut Diagnostics,
) -> Result<String, String> {
    let title = &section.title;
    let Some(value) = required_field(section, "source", label, file, diagnostics) else {
        return Err(format!("{label} '{title}' in '{file}' has no 'source::' link"));
    };
    reference(value, expected, section.line, file, layout, diagnostics).ok_or_else(|| {
        format!(
            "{label} '{title}' in '{file}' links to '{}', which cannot be resolved",
            value.trim()
        )
    })
}

/// Strip one pair of matching surrounding quotes.
pub(crate) fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}
