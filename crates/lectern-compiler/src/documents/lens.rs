//! Lens documents.
//!
//! A lens wraps exactly one article or video with framing segments:
//!
//! ```markdown
//! ---
//! id: 9c8b7a6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d
//! ---
//!
//! ### Article: Why alignment could be hard
//! source:: [[../articles/cold-takes-alignment]]
//!
//! #### Text
//! content:: Before reading, consider what "alignment" means to you.
//!
//! #### Article-excerpt
//! from:: "Modern AI systems"
//! to:: "with no guarantee."
//! ```

use std::fmt;

use lectern_content::{Section, SectionSpec, split_sections};
use lectern_core::{ContentError, ContentKind, ContentLayout, Diagnostics};

use super::segments::{ARTICLE_SEGMENTS, SEGMENT_TYPES, SegmentSource, VIDEO_SEGMENTS, parse_segments};
use super::{ParseOutcome, read_header, reference, required_content_id, required_field};

const SECTION_TYPES: &[&str] = &["article", "video"];
const KNOWN_FIELDS: &[&str] = &["source", "content", "instructions", "from", "to", "optional"];

/// The kind of source a lens section presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    /// A written article.
    Article,
    /// A video with a transcript.
    Video,
}

impl TerminalKind {
    /// Content kind of the referenced source document.
    pub fn source_kind(self) -> ContentKind {
        match self {
            Self::Article => ContentKind::Article,
            Self::Video => ContentKind::VideoTranscript,
        }
    }
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Article => write!(f, "article"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// A parsed lens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lens {
    /// Content id (UUID).
    pub id: String,
    /// Article and video sections. A well-formed lens has exactly one.
    pub sections: Vec<LensSection>,
}

impl Lens {
    /// The single article or video section, or the number found.
    pub fn terminal(&self) -> Result<&LensSection, usize> {
        match self.sections.as_slice() {
            [section] => Ok(section),
            sections => Err(sections.len()),
        }
    }
}

/// An article or video section of a lens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensSection {
    /// Article or video.
    pub kind: TerminalKind,
    /// Section title.
    pub title: String,
    /// Resolved source path; `None` when missing or unresolvable.
    pub source: Option<String>,
    /// Segments in order.
    pub segments: Vec<SegmentSource>,
    /// Header line.
    pub line: usize,
}

/// Parse a lens document.
///
/// The value is `None` when the header is unreadable or has no valid `id`.
/// A lens whose article/video section count is not exactly one is still
/// returned, with an error recorded.
pub fn parse_lens(text: &str, file: &str, layout: &ContentLayout) -> ParseOutcome<Lens> {
    let mut diagnostics = Diagnostics::new();
    let Some(header) = read_header(text, file, &mut diagnostics) else {
        return ParseOutcome::new(None, diagnostics);
    };
    let id = required_content_id(&header, "id", file, &mut diagnostics);

    let spec = SectionSpec::new(3, SECTION_TYPES)
        .with_structural(SEGMENT_TYPES)
        .with_known_fields(KNOWN_FIELDS);
    let sections: Vec<LensSection> = split_sections(header.body(), header.body_line(), &spec, file, &mut diagnostics)
        .iter()
        .filter(|s| s.recognized)
        .map(|s| parse_section(s, file, layout, &mut diagnostics))
        .collect();

    if sections.len() != 1 {
        let line = sections.get(1).map_or(header.body_line(), |s| s.line);
        diagnostics.push(
            ContentError::error(
                file,
                format!("Lens must contain exactly one article or video section, found {}", sections.len()),
            )
            .at_line(line)
            .with_suggestion("Split the lens so each file presents a single '### Article:' or '### Video:'"),
        );
    }

    let lens = id.map(|id| Lens { id, sections });
    ParseOutcome::new(lens, diagnostics)
}

fn parse_section(section: &Section, file: &str, layout: &ContentLayout, diagnostics: &mut Diagnostics) -> LensSection {
    let kind = if section.is("video") {
        TerminalKind::Video
    } else {
        TerminalKind::Article
    };
    let label = format!("{} section", capitalize(&kind.to_string()));

    let source = required_field(section, "source", &label, file, diagnostics)
        .and_then(|s| reference(s, kind.source_kind(), section.line, file, layout, diagnostics));
    let allowed = match kind {
        TerminalKind::Article => ARTICLE_SEGMENTS,
        TerminalKind::Video => VIDEO_SEGMENTS,
    };

    LensSection {
        kind,
        title: section.title.clone(),
        source,
        segments: parse_segments(section, 4, allowed, file, diagnostics),
        line: section.line,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
