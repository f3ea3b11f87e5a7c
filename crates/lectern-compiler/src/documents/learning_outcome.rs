//! Learning outcome documents.
//!
//! ```markdown
//! ---
//! id: 3f2a9c1e-8b7d-4e6f-a5c4-1d2e3f4a5b6c
//! ---
//!
//! ## Lens: What is AI?
//! source:: [[../Lenses/what-is-ai]]
//!
//! ## Test: Check understanding
//! source:: [[../tests/what-is-ai]]
//! ```

use lectern_content::{Section, SectionSpec, WikilinkReference, parse_wikilink, resolve_wikilink, split_sections};
use lectern_core::{ContentError, ContentKind, ContentLayout, Diagnostics};

use super::{ParseOutcome, optional_flag, read_header, required_content_id, required_field, source_reference};

const SECTION_TYPES: &[&str] = &["lens", "test"];
const KNOWN_FIELDS: &[&str] = &["source", "optional"];

/// A parsed learning outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningOutcome {
    /// Content id (UUID).
    pub id: String,
    /// Lenses in document order.
    pub lenses: Vec<LensReference>,
    /// The test document, if one is attached.
    pub test: Option<WikilinkReference>,
}

/// A reference to a lens from a learning outcome or an uncategorized block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensReference {
    /// Resolved lens path, or why the link could not be resolved.
    pub source: Result<String, String>,
    /// Whether the lens is optional.
    pub optional: bool,
    /// Header line of the referencing section.
    pub line: usize,
}

/// Parse a `## Lens:` section into a reference.
///
/// Broken links are kept so that every module using the reference fails.
pub(crate) fn parse_lens_reference(
    section: &Section,
    file: &str,
    layout: &ContentLayout,
    diagnostics: &mut Diagnostics,
) -> LensReference {
    let source = source_reference(section, ContentKind::Lens, "Lens section", file, layout, diagnostics);
    LensReference {
        source,
        optional: optional_flag(&section.fields, section.line, file, diagnostics),
        line: section.line,
    }
}

/// Parse a learning outcome document.
///
/// The value is `None` when the header is unreadable or has no valid `id`.
pub fn parse_learning_outcome(text: &str, file: &str, layout: &ContentLayout) -> ParseOutcome<LearningOutcome> {
    let mut diagnostics = Diagnostics::new();
    let Some(header) = read_header(text, file, &mut diagnostics) else {
        return ParseOutcome::new(None, diagnostics);
    };
    let id = required_content_id(&header, "id", file, &mut diagnostics);

    let spec = SectionSpec::new(2, SECTION_TYPES).with_known_fields(KNOWN_FIELDS);
    let sections = split_sections(header.body(), header.body_line(), &spec, file, &mut diagnostics);

    let mut lenses = Vec::new();
    let mut test: Option<WikilinkReference> = None;
    for section in sections.iter().filter(|s| s.recognized) {
        if section.is("lens") {
            lenses.push(parse_lens_reference(section, file, layout, &mut diagnostics));
            continue;
        }

        if test.is_some() {
            diagnostics.push(
                ContentError::error(file, "Learning outcome has more than one test section")
                    .at_line(section.line)
                    .with_suggestion("Keep a single '## Test:' section"),
            );
            continue;
        }
        let Some(source) = required_field(section, "source", "Test section", file, &mut diagnostics) else {
            continue;
        };
        match parse_wikilink(source) {
            Some(link) => test = Some(resolve_wikilink(&link, file)),
            None => diagnostics.push(
                ContentError::error(file, format!("Expected a wikilink but found '{}'", source.trim()))
                    .at_line(section.line)
                    .with_suggestion("Write the reference as [[relative/path]]"),
            ),
        }
    }

    if lenses.is_empty() {
        diagnostics.push(
            ContentError::warning(file, "Learning outcome has no lenses")
                .at_line(header.body_line())
                .with_suggestion("Add a '## Lens:' section with a 'source::' field"),
        );
    }

    let outcome = id.map(|id| LearningOutcome { id, lenses, test });
    ParseOutcome::new(outcome, diagnostics)
}
