//! Authored segments inside pages and lens sections.

use lectern_content::{Section, SectionSpec, split_sections};
use lectern_core::{ContentError, Diagnostics};

use super::{required_field, unquote};

/// Every segment type token.
pub const SEGMENT_TYPES: &[&str] = &["text", "chat", "article-excerpt", "video-excerpt"];

/// Segment types a module page may contain.
pub const PAGE_SEGMENTS: &[&str] = &["text", "chat"];

/// Segment types an article lens section may contain.
pub const ARTICLE_SEGMENTS: &[&str] = &["text", "chat", "article-excerpt"];

/// Segment types a video lens section may contain.
pub const VIDEO_SEGMENTS: &[&str] = &["text", "chat", "video-excerpt"];

const SEGMENT_FIELDS: &[&str] = &["content", "instructions", "from", "to"];

/// A segment as written, before excerpts are resolved against their source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentSource {
    /// Author prose.
    Text {
        /// Markdown content
        content: String,
    },
    /// Instructions for a discussion with the tutor.
    Chat {
        /// Prompt instructions
        instructions: String,
    },
    /// A span of the lens's article, delimited by anchor phrases.
    ArticleExcerpt {
        /// Start anchor; `None` means the start of the article.
        from: Option<String>,
        /// End anchor; `None` means the end of the article.
        to: Option<String>,
        /// Header line, for diagnostics.
        line: usize,
    },
    /// A span of the lens's video transcript.
    VideoExcerpt {
        /// Start timestamp as written.
        from: String,
        /// End timestamp as written; `None` means the end of the video.
        to: Option<String>,
        /// Header line, for diagnostics.
        line: usize,
    },
}

/// Split a section body into segments at `depth`, accepting `allowed` types.
///
/// Segments with an unknown type or missing required fields are dropped
/// after their diagnostic is recorded.
pub(crate) fn parse_segments(
    section: &Section,
    depth: usize,
    allowed: &[&str],
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<SegmentSource> {
    let spec = SectionSpec::new(depth, allowed).with_known_fields(SEGMENT_FIELDS);
    split_sections(&section.body, section.body_line(), &spec, file, diagnostics)
        .iter()
        .filter(|s| s.recognized)
        .filter_map(|s| parse_segment(s, file, diagnostics))
        .collect()
}

fn parse_segment(segment: &Section, file: &str, diagnostics: &mut Diagnostics) -> Option<SegmentSource> {
    match segment.kind.as_str() {
        "text" => required_field(segment, "content", "Text segment", file, diagnostics)
            .map(|content| SegmentSource::Text {
                content: content.to_string(),
            }),
        "chat" => required_field(segment, "instructions", "Chat segment", file, diagnostics)
            .map(|instructions| SegmentSource::Chat {
                instructions: instructions.to_string(),
            }),
        "article-excerpt" => Some(SegmentSource::ArticleExcerpt {
            from: anchor(segment, "from"),
            to: anchor(segment, "to"),
            line: segment.line,
        }),
        "video-excerpt" => {
            let from = required_field(segment, "from", "Video excerpt", file, diagnostics)?;
            Some(SegmentSource::VideoExcerpt {
                from: unquote(from).to_string(),
                to: anchor(segment, "to"),
                line: segment.line,
            })
        }
        other => {
            diagnostics.push(
                ContentError::error(file, format!("Unsupported segment type '{other}'"))
                    .at_line(segment.line),
            );
            None
        }
    }
}

fn anchor(segment: &Section, key: &str) -> Option<String> {
    segment
        .fields
        .get(key)
        .map(unquote)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
