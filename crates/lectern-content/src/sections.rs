//! Depth-parameterized section splitting.
//!
//! A document body is a sequence of sections introduced by heading lines of
//! one fixed depth:
//!
//! ```markdown
//! ### Article: Why AI Alignment Could Be Hard
//! source:: [[../articles/cold-takes-alignment]]
//!
//! #### Text
//! content::
//! Before reading, consider...
//! ```
//!
//! The same splitter serves every document type; callers pass the heading
//! depth, the whitelist of section types, the structural sub-header types
//! that end a section's own field scope, and the field names that should be
//! recognized when written with a single colon.

use lectern_core::{ContentError, Diagnostics};

use crate::fields::{Fields, extract_fields, opens_continuation};

/// What to split on and how to validate it.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec<'a> {
    /// Heading depth (number of `#`) that starts a section.
    pub depth: usize,
    /// Valid section type tokens (matched case-insensitively).
    pub types: &'a [&'a str],
    /// Sub-header types at `depth + 1` that end a section's own fields.
    pub structural: &'a [&'a str],
    /// Field names flagged when written with a single colon.
    pub known_fields: &'a [&'a str],
}

impl<'a> SectionSpec<'a> {
    /// Split at `depth`, accepting `types`.
    pub fn new(depth: usize, types: &'a [&'a str]) -> Self {
        Self {
            depth,
            types,
            structural: &[],
            known_fields: &[],
        }
    }

    /// Set the structural sub-header types.
    pub fn with_structural(mut self, structural: &'a [&'a str]) -> Self {
        self.structural = structural;
        self
    }

    /// Set the known field names.
    pub fn with_known_fields(mut self, known_fields: &'a [&'a str]) -> Self {
        self.known_fields = known_fields;
        self
    }

    fn accepts(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(kind))
    }
}

/// One section of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Type token, lowercased with internal whitespace collapsed.
    pub kind: String,
    /// Title after the first colon, verbatim apart from surrounding whitespace.
    pub title: String,
    /// Fields of the section's own scope (before any structural sub-header).
    pub fields: Fields,
    /// Raw lines after the header, up to the next section header.
    pub body: String,
    /// 1-indexed line of the header.
    pub line: usize,
    /// Whether `kind` is in the whitelist.
    pub recognized: bool,
}

impl Section {
    /// Case-insensitive type check.
    pub fn is(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    /// 1-indexed line of the first body line.
    pub fn body_line(&self) -> usize {
        self.line + 1
    }
}

/// Number of leading `#` when the line is heading-shaped (`#` to `######`
/// followed by whitespace or end of line).
///
/// # Example
///
/// ```rust
/// use lectern_content::heading_depth;
///
/// assert_eq!(heading_depth("### Article: Title"), Some(3));
/// assert_eq!(heading_depth("#hashtag"), None);
/// assert_eq!(heading_depth("plain"), None);
/// ```
pub fn heading_depth(line: &str) -> Option<usize> {
    let depth = line.bytes().take_while(|b| *b == b'#').count();
    if depth == 0 || depth > 6 {
        return None;
    }
    match line[depth..].chars().next() {
        None => Some(depth),
        Some(c) if c.is_whitespace() => Some(depth),
        Some(_) => None,
    }
}

/// Whether a line opens or closes a fenced code block.
pub(crate) fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

struct Header {
    depth: usize,
    kind: String,
    title: String,
    has_colon: bool,
}

fn parse_header(line: &str) -> Option<Header> {
    let depth = heading_depth(line)?;
    let rest = line[depth..].trim();
    if rest.is_empty() {
        return None;
    }

    let (kind, title) = match rest.find(':') {
        Some(pos) => (&rest[..pos], rest[pos + 1..].trim()),
        None => (rest, ""),
    };
    let kind = kind.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

    Some(Header {
        depth,
        kind,
        title: title.to_string(),
        has_colon: rest.contains(':'),
    })
}

/// Split `body` into sections at `spec.depth`.
///
/// `body_line` is the 1-indexed document line of the body's first line.
/// Unknown section types produce an error but the section is still
/// returned (with `recognized == false`). Text before the first section is
/// not part of any section.
///
/// A colon-less header of an unknown type inside an open multiline field
/// does not start a section: it stays in the body, where it ends the field
/// with a "looks like a Markdown heading" warning.
///
/// When no section is found at the requested depth but a whitelisted
/// header exists at another depth, a single "heading level" warning is
/// emitted and no section is returned.
pub fn split_sections(
    body: &str,
    body_line: usize,
    spec: &SectionSpec<'_>,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<Section> {
    let lines: Vec<&str> = body.split('\n').collect();
    let mut starts: Vec<(usize, Header)> = Vec::new();
    let mut in_fence = false;
    let mut continuing = false;

    for (idx, line) in lines.iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(header) = parse_header(line) {
            let stray = continuing && !header.has_colon && !spec.accepts(&header.kind);
            if header.depth == spec.depth && !stray {
                starts.push((idx, header));
            }
        }
        if heading_depth(line).is_some() {
            continuing = false;
        } else if let Some(opens) = opens_continuation(line) {
            continuing = opens;
        }
    }

    if starts.is_empty() {
        warn_wrong_depth(&lines, body_line, spec, file, diagnostics);
        return Vec::new();
    }

    if let Some((first, _)) = starts.first() {
        if lines[..*first].iter().any(|l| !l.trim().is_empty()) {
            log::debug!("{file}: ignoring text before the first section");
        }
    }

    let mut sections = Vec::with_capacity(starts.len());
    for (n, (start, header)) in starts.iter().enumerate() {
        let end = starts.get(n + 1).map_or(lines.len(), |(next, _)| *next);
        let line = body_line + start;
        let recognized = spec.accepts(&header.kind);

        if !recognized {
            diagnostics.push(
                ContentError::error(file, format!("Unknown section type '{}'", header.kind))
                    .at_line(line)
                    .with_suggestion(format!("Valid section types here: {}", spec.types.join(", "))),
            );
        }

        let own = &lines[start + 1..end];
        let scope_end = own_scope_end(own, spec);
        let fields = extract_fields(&own[..scope_end], line + 1, file, spec.known_fields, diagnostics);

        sections.push(Section {
            kind: header.kind.clone(),
            title: header.title.clone(),
            fields,
            body: own.join("\n"),
            line,
            recognized,
        });
    }

    sections
}

/// Index of the first structural sub-header in a section's lines.
fn own_scope_end(lines: &[&str], spec: &SectionSpec<'_>) -> usize {
    if spec.structural.is_empty() {
        return lines.len();
    }

    let mut in_fence = false;
    for (idx, line) in lines.iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(header) = parse_header(line) {
            if header.depth == spec.depth + 1
                && spec.structural.iter().any(|s| s.eq_ignore_ascii_case(&header.kind))
            {
                return idx;
            }
        }
    }
    lines.len()
}

fn warn_wrong_depth(
    lines: &[&str],
    body_line: usize,
    spec: &SectionSpec<'_>,
    file: &str,
    diagnostics: &mut Diagnostics,
) {
    let mut in_fence = false;
    for (idx, line) in lines.iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let Some(header) = parse_header(line) else {
            continue;
        };
        if header.depth != spec.depth && spec.accepts(&header.kind) {
            let markers = "#".repeat(spec.depth);
            let rest = line[header.depth..].trim();
            diagnostics.push(
                ContentError::warning(
                    file,
                    format!(
                        "Section header uses heading level {} but this document expects heading level {}",
                        header.depth, spec.depth
                    ),
                )
                .at_line(body_line + idx)
                .with_suggestion(format!("Write it as '{markers} {rest}'")),
            );
            return;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const LENS_TYPES: &[&str] = &["article", "video"];
    const SEGMENTS: &[&str] = &["text", "chat", "article-excerpt", "video-excerpt"];

    fn lens_spec() -> SectionSpec<'static> {
        SectionSpec::new(3, LENS_TYPES)
            .with_structural(SEGMENTS)
            .with_known_fields(&["source", "content"])
    }

    fn split(body: &str, spec: &SectionSpec<'_>) -> (Vec<Section>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let sections = split_sections(body, 5, spec, "Lenses/test.md", &mut diagnostics);
        (sections, diagnostics)
    }

    // ------------------------------------------------------------------------
    // Header parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_heading_depth_bounds() {
        assert_eq!(heading_depth("#"), Some(1));
        assert_eq!(heading_depth("###### Six"), Some(6));
        assert_eq!(heading_depth("####### Seven"), None);
        assert_eq!(heading_depth(" # indented"), None);
    }

    #[test]
    fn test_title_split_on_first_colon() {
        let header = parse_header("# Learning Outcome: AI: Risks & Rewards, Today's Edition").unwrap();
        assert_eq!(header.kind, "learning outcome");
        assert_eq!(header.title, "AI: Risks & Rewards, Today's Edition");
    }

    #[test]
    fn test_header_without_title() {
        let header = parse_header("#### Text").unwrap();
        assert_eq!(header.kind, "text");
        assert_eq!(header.title, "");
    }

    // ------------------------------------------------------------------------
    // Splitting
    // ------------------------------------------------------------------------

    #[test]
    fn test_split_basic_sections() {
        let body = "### Article: First\nsource:: [[a]]\n\n### VIDEO: Second\nsource:: [[b]]";
        let (sections, diagnostics) = split(body, &lens_spec());

        assert!(diagnostics.is_empty());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].kind, "article");
        assert_eq!(sections[0].title, "First");
        assert_eq!(sections[0].line, 5);
        assert_eq!(sections[0].fields.get("source"), Some("[[a]]"));
        assert!(sections[1].is("video"));
        assert_eq!(sections[1].line, 8);
    }

    #[test]
    fn test_unknown_type_still_captured() {
        let body = "### Podcast: Episode 1\nsource:: [[p]]\n### Article: A\nsource:: [[a]]";
        let (sections, diagnostics) = split(body, &lens_spec());

        assert_eq!(sections.len(), 2);
        assert!(!sections[0].recognized);
        assert!(sections[1].recognized);
        assert_eq!(diagnostics.len(), 1);
        let error = diagnostics.iter().next().unwrap();
        assert!(error.is_error());
        assert_eq!(error.message, "Unknown section type 'podcast'");
        assert_eq!(error.line, Some(5));
    }

    #[test]
    fn test_own_fields_stop_at_structural_subheader() {
        let body = "### Article: A\nsource:: [[a]]\n#### Text\ncontent:: hello";
        let (sections, diagnostics) = split(body, &lens_spec());

        assert!(diagnostics.is_empty());
        assert_eq!(sections[0].fields.get("source"), Some("[[a]]"));
        assert_eq!(sections[0].fields.get("content"), None);
        assert!(sections[0].body.contains("#### Text"));
    }

    #[test]
    fn test_unrecognized_subheader_ends_continuation_with_warning() {
        let body = "### Article: A\nsource::\n[[a]]\n#### Summary\nmore";
        let (sections, diagnostics) = split(body, &lens_spec());

        assert_eq!(sections[0].fields.get("source"), Some("[[a]]"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.iter().next().unwrap().message.contains("looks like a Markdown heading"));
    }

    #[test]
    fn test_colonless_heading_inside_continuation_stays_in_body() {
        let body = "#### Text\ncontent::\nIntro line\n#### Key points\nMore text";
        let spec = SectionSpec::new(4, SEGMENTS).with_known_fields(&["content"]);
        let (sections, diagnostics) = split(body, &spec);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].fields.get("content"), Some("Intro line"));
        assert!(sections[0].body.contains("#### Key points"));
        assert_eq!(diagnostics.len(), 1);
        let warning = diagnostics.iter().next().unwrap();
        assert!(!warning.is_error());
        assert!(warning.message.contains("looks like a Markdown heading"));
        assert_eq!(warning.line, Some(8));
    }

    #[test]
    fn test_unknown_heading_after_closed_field_still_splits() {
        let body = "#### Text\ncontent:: Intro line\n#### Key points\nMore text";
        let spec = SectionSpec::new(4, SEGMENTS).with_known_fields(&["content"]);
        let (sections, diagnostics) = split(body, &spec);

        assert_eq!(sections.len(), 2);
        assert!(!sections[1].recognized);
        assert!(diagnostics.iter().any(|d| d.message == "Unknown section type 'key points'"));
    }

    #[test]
    fn test_typed_header_inside_continuation_still_splits() {
        let body = "#### Text\ncontent::\nIntro line\n#### Chat\ninstructions:: Discuss";
        let spec = SectionSpec::new(4, SEGMENTS).with_known_fields(&["content"]);
        let (sections, diagnostics) = split(body, &spec);

        assert!(diagnostics.is_empty());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].fields.get("content"), Some("Intro line"));
        assert!(sections[1].is("chat"));
    }

    #[test]
    fn test_headers_inside_code_fence_ignored() {
        let body = "### Article: A\nsource:: [[a]]\n```\n### Video: not real\n```";
        let (sections, _) = split(body, &lens_spec());
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_deeper_headers_belong_to_body() {
        let body = "# Page: Welcome\n## Text\ncontent:: Hi";
        let spec = SectionSpec::new(1, &["page"]);
        let (sections, diagnostics) = split(body, &spec);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "## Text\ncontent:: Hi");
        assert!(diagnostics.is_empty());
    }

    // ------------------------------------------------------------------------
    // Heading level diagnostics
    // ------------------------------------------------------------------------

    #[test]
    fn test_wrong_heading_depth() {
        let body = "## Article: Too Shallow\nsource:: [[a]]\n\n## Video: Also Shallow\n";
        let (sections, diagnostics) = split(body, &lens_spec());

        assert!(sections.is_empty());
        assert_eq!(diagnostics.len(), 1);
        let warning = diagnostics.iter().next().unwrap();
        assert!(!warning.is_error());
        assert!(warning.message.contains("heading level 2"));
        assert!(warning.message.contains("heading level 3"));
        assert_eq!(warning.line, Some(5));
        assert_eq!(warning.suggestion.as_deref(), Some("Write it as '### Article: Too Shallow'"));
    }

    #[test]
    fn test_empty_body_has_no_warning() {
        let (sections, diagnostics) = split("\n\n", &lens_spec());
        assert!(sections.is_empty());
        assert!(diagnostics.is_empty());
    }
}
