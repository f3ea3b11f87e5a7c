//! Wikilink parsing and resolution.
//!
//! References between documents are written as wikilinks, optionally as
//! embeds and optionally with display text:
//!
//! - `[[../Lenses/what-is-ai]]`
//! - `[[../Lenses/what-is-ai|What is AI?]]`
//! - `![[../articles/cold-takes]]`
//!
//! Paths are relative to the referencing document's directory. A path
//! without an extension refers to the `.md` file of that name.

use std::sync::LazyLock;

use lectern_core::{ContentError, ContentKind, ContentLayout, resolve_relative};
use regex::Regex;

static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(!?)\[\[([^\[\]|]+)(?:\|([^\[\]]*))?\]\]$").expect("Invalid wikilink regex")
});

/// A parsed wikilink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikilinkReference {
    /// Link target: as written after [`parse_wikilink`], resolved after
    /// [`resolve_wikilink`].
    pub path: String,
    /// Text after `|`, if any.
    pub display: Option<String>,
    /// Whether the link was written as `![[...]]`.
    pub is_embed: bool,
}

/// Why a reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WikilinkError {
    /// The text is not a wikilink at all.
    #[error("Expected a wikilink but found '{text}'")]
    NotAWikilink {
        /// Offending text
        text: String,
    },

    /// The resolved path is outside every content directory.
    #[error("Link '{path}' does not point into a known content directory")]
    UnknownBucket {
        /// Resolved path
        path: String,
    },

    /// The link points at the wrong kind of document.
    #[error("Link '{path}' points to {found} content, expected {expected} content")]
    WrongKind {
        /// Resolved path
        path: String,
        /// Kind the path belongs to
        found: ContentKind,
        /// Kind the caller needed
        expected: ContentKind,
    },
}

impl WikilinkError {
    /// Convert into a diagnostic for `file` at `line`.
    pub fn to_content_error(&self, file: &str, line: usize, layout: &ContentLayout) -> ContentError {
        let suggestion = match self {
            Self::NotAWikilink { .. } => "Write the reference as [[relative/path]]".to_string(),
            Self::UnknownBucket { .. } => {
                "Check the number of '../' segments in the link".to_string()
            }
            Self::WrongKind { expected, .. } => format!(
                "Link to a file in the '{}' directory",
                layout.directory(*expected)
            ),
        };
        ContentError::error(file, self.to_string())
            .at_line(line)
            .with_suggestion(suggestion)
    }
}

/// Parse wikilink syntax.
///
/// Returns `None` for anything that is not exactly one wikilink, so callers
/// can tell structured references from prose.
///
/// # Example
///
/// ```rust
/// use lectern_content::parse_wikilink;
///
/// let link = parse_wikilink("![[../Lenses/intro|Intro]]").unwrap();
/// assert_eq!(link.path, "../Lenses/intro");
/// assert_eq!(link.display.as_deref(), Some("Intro"));
/// assert!(link.is_embed);
///
/// assert!(parse_wikilink("just some text").is_none());
/// ```
pub fn parse_wikilink(text: &str) -> Option<WikilinkReference> {
    let caps = WIKILINK_RE.captures(text.trim())?;
    let path = caps.get(2)?.as_str().trim();
    if path.is_empty() {
        return None;
    }

    let display = caps
        .get(3)
        .map(|m| m.as_str().trim())
        .filter(|d| !d.is_empty())
        .map(String::from);

    Some(WikilinkReference {
        path: path.to_string(),
        display,
        is_embed: !caps[1].is_empty(),
    })
}

/// Resolve a parsed link against the referencing document's path.
///
/// # Example
///
/// ```rust
/// use lectern_content::{parse_wikilink, resolve_wikilink};
///
/// let link = parse_wikilink("[[../Lenses/intro]]").unwrap();
/// let resolved = resolve_wikilink(&link, "Learning Outcomes/basics.md");
/// assert_eq!(resolved.path, "Lenses/intro.md");
/// ```
pub fn resolve_wikilink(link: &WikilinkReference, source_file: &str) -> WikilinkReference {
    let mut path = resolve_relative(source_file, &link.path);
    if !has_extension(&path) {
        path.push_str(".md");
    }
    WikilinkReference {
        path,
        display: link.display.clone(),
        is_embed: link.is_embed,
    }
}

/// Parse, resolve, and check the kind of a reference in one step.
///
/// The returned path spells its top-level directory the way the layout
/// does, whatever case the link used.
///
/// # Example
///
/// ```rust
/// use lectern_content::wikilink::resolve_reference;
/// use lectern_core::{ContentKind, ContentLayout};
///
/// let layout = ContentLayout::default();
/// let link = resolve_reference("[[../lenses/intro]]", "modules/m.md", &layout, ContentKind::Lens).unwrap();
/// assert_eq!(link.path, "Lenses/intro.md");
/// ```
pub fn resolve_reference(
    text: &str,
    source_file: &str,
    layout: &ContentLayout,
    expected: ContentKind,
) -> Result<WikilinkReference, WikilinkError> {
    let link = parse_wikilink(text).ok_or_else(|| WikilinkError::NotAWikilink {
        text: text.trim().to_string(),
    })?;
    let resolved = resolve_wikilink(&link, source_file);

    match layout.classify(&resolved.path) {
        None => Err(WikilinkError::UnknownBucket {
            path: resolved.path,
        }),
        Some(found) if found != expected => Err(WikilinkError::WrongKind {
            path: resolved.path,
            found,
            expected,
        }),
        Some(_) => Ok(WikilinkReference {
            path: layout.canonicalize(&resolved.path),
            ..resolved
        }),
    }
}

fn has_extension(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    matches!(name.rfind('.'), Some(pos) if pos > 0)
}

// ============================================================================
// Tests
// ============================================================================
