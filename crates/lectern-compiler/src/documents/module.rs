//! Module documents.
//!
//! A module is the top-level unit a student works through:
//!
//! ```markdown
//! ---
//! slug: intro
//! title: Introduction
//! contentId: 7a1e2f0c-3b4d-4c5e-8f90-a1b2c3d4e5f6
//! ---
//!
//! # Page: Welcome
//! id:: 0b1f3a2e-6c4d-4e8f-9a1b-2c3d4e5f6a7b
//! ## Text
//! content:: Welcome to the course.
//!
//! # Learning Outcome: Core risks
//! source:: [[../Learning Outcomes/core-risks]]
//!
//! # Uncategorized: Extras
//! ## Lens: Further reading
//! source:: [[../Lenses/further-reading]]
//! optional:: true
//! ```

use lectern_content::{Section, SectionSpec, extract_frontmatter, split_sections};
use lectern_core::{ContentError, ContentKind, ContentLayout, Diagnostics, is_valid_content_id, slug_from_path};

use super::learning_outcome::{LensReference, parse_lens_reference};
use super::segments::{PAGE_SEGMENTS, SegmentSource, parse_segments};
use super::{ParseOutcome, optional_flag, read_header, required_content_id, required_header, source_reference};

const SECTION_TYPES: &[&str] = &["page", "learning outcome", "uncategorized"];
const STRUCTURAL: &[&str] = &["text", "chat", "lens"];
const KNOWN_FIELDS: &[&str] = &["id", "source", "optional", "content", "instructions"];

/// A parsed module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// URL slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Content id (UUID).
    pub content_id: String,
    /// Sections in document order.
    pub sections: Vec<ModuleSection>,
}

/// One top-level section of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSection {
    /// Authored page with inline segments.
    Page {
        /// Section title
        title: String,
        /// Optional content id from `id::`
        content_id: Option<String>,
        /// Text and chat segments
        segments: Vec<SegmentSource>,
        /// Header line
        line: usize,
    },
    /// Reference to a learning outcome document.
    LearningOutcome {
        /// Section title
        title: String,
        /// Resolved path of the learning outcome, or why the link could
        /// not be resolved
        source: Result<String, String>,
        /// Whether the whole outcome is optional
        optional: bool,
        /// Header line
        line: usize,
    },
    /// Lenses not tied to any learning outcome.
    Uncategorized {
        /// Section title
        title: String,
        /// Referenced lenses in order
        lenses: Vec<LensReference>,
        /// Header line
        line: usize,
    },
}

/// The identity of a module, recovered leniently from its header.
///
/// Used to report modules that could not be parsed: the slug falls back to
/// the file name and the title to an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIdentity {
    /// Header slug, or one derived from the path.
    pub slug: String,
    /// Header title, or empty.
    pub title: String,
    /// Header content id, when present and valid.
    pub content_id: Option<String>,
}

impl ModuleIdentity {
    /// Read whatever identity the document provides.
    pub fn recover(text: &str, file: &str) -> Self {
        let header = extract_frontmatter(text).ok();
        let field = |key: &str| header.as_ref().and_then(|h| h.get_string(key));
        Self {
            slug: field("slug").unwrap_or_else(|| slug_from_path(file)),
            title: field("title").unwrap_or_default(),
            content_id: field("contentId").filter(|id| is_valid_content_id(id)),
        }
    }
}

/// Parse a module document.
///
/// The value is `None` when the header is unreadable or lacks `slug`,
/// `title`, or a valid `contentId`. References whose link cannot be
/// resolved are kept as `Err`, so flattening fails the module; other
/// broken sections are dropped with a diagnostic.
pub fn parse_module(text: &str, file: &str, layout: &ContentLayout) -> ParseOutcome<Module> {
    let mut diagnostics = Diagnostics::new();
    let Some(header) = read_header(text, file, &mut diagnostics) else {
        return ParseOutcome::new(None, diagnostics);
    };

    let slug = required_header(&header, "slug", file, &mut diagnostics);
    let title = required_header(&header, "title", file, &mut diagnostics);
    let content_id = required_content_id(&header, "contentId", file, &mut diagnostics);

    let spec = SectionSpec::new(1, SECTION_TYPES)
        .with_structural(STRUCTURAL)
        .with_known_fields(KNOWN_FIELDS);
    let sections: Vec<ModuleSection> = split_sections(header.body(), header.body_line(), &spec, file, &mut diagnostics)
        .iter()
        .filter(|s| s.recognized)
        .filter_map(|s| parse_section(s, file, layout, &mut diagnostics))
        .collect();

    if sections.is_empty() {
        diagnostics.push(
            ContentError::warning(file, "Module has no sections")
                .at_line(header.body_line())
                .with_suggestion("Add a '# Page:', '# Learning Outcome:' or '# Uncategorized:' section"),
        );
    }

    let module = match (slug, title, content_id) {
        (Some(slug), Some(title), Some(content_id)) => Some(Module {
            slug,
            title,
            content_id,
            sections,
        }),
        _ => None,
    };
    ParseOutcome::new(module, diagnostics)
}

fn parse_section(
    section: &Section,
    file: &str,
    layout: &ContentLayout,
    diagnostics: &mut Diagnostics,
) -> Option<ModuleSection> {
    match section.kind.as_str() {
        "page" => Some(parse_page(section, file, diagnostics)),
        "learning outcome" => {
            let source = source_reference(
                section,
                ContentKind::LearningOutcome,
                "Learning Outcome section",
                file,
                layout,
                diagnostics,
            );
            Some(ModuleSection::LearningOutcome {
                title: section.title.clone(),
                source,
                optional: optional_flag(&section.fields, section.line, file, diagnostics),
                line: section.line,
            })
        }
        "uncategorized" => {
            let spec = SectionSpec::new(2, &["lens"]).with_known_fields(&["source", "optional"]);
            let lenses: Vec<LensReference> = split_sections(&section.body, section.body_line(), &spec, file, diagnostics)
                .iter()
                .filter(|s| s.recognized)
                .map(|s| parse_lens_reference(s, file, layout, diagnostics))
                .collect();
            if lenses.is_empty() {
                diagnostics.push(
                    ContentError::warning(file, "Uncategorized section has no lens references")
                        .at_line(section.line)
                        .with_suggestion("Add '## Lens:' sub-sections with a 'source::' field"),
                );
            }
            Some(ModuleSection::Uncategorized {
                title: section.title.clone(),
                lenses,
                line: section.line,
            })
        }
        _ => None,
    }
}

fn parse_page(section: &Section, file: &str, diagnostics: &mut Diagnostics) -> ModuleSection {
    let content_id = section.fields.get("id").map(str::trim).and_then(|id| {
        if is_valid_content_id(id) {
            Some(id.to_string())
        } else {
            diagnostics.push(
                ContentError::error(file, format!("Page id '{id}' is not a UUID"))
                    .at_line(section.line)
                    .with_suggestion("Use a UUID for 'id::' or remove the field"),
            );
            None
        }
    });

    ModuleSection::Page {
        title: section.title.clone(),
        content_id,
        segments: parse_segments(section, 2, PAGE_SEGMENTS, file, diagnostics),
        line: section.line,
    }
}
