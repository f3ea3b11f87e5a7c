//! Anchor search and article excerpts.
//!
//! An excerpt is delimited by two anchor phrases that must each occur
//! exactly once in the article (case-insensitively). The excerpt runs from
//! the start of the `from` match to the end of the `to` match, verbatim.

use std::fmt;
use std::ops::Range;

/// Which end of an excerpt an anchor delimits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRole {
    /// The `from::` anchor.
    From,
    /// The `to::` anchor.
    To,
}

impl fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "from"),
            Self::To => write!(f, "to"),
        }
    }
}

/// Why an article excerpt could not be located.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnchorError {
    /// The anchor does not occur in the article.
    #[error("Excerpt '{role}' anchor \"{anchor}\" not found in article")]
    NotFound {
        /// Which anchor
        role: AnchorRole,
        /// The phrase searched for
        anchor: String,
    },

    /// The anchor occurs more than once.
    #[error("Excerpt '{role}' anchor \"{anchor}\" matches multiple places in article ({count} occurrences)")]
    Ambiguous {
        /// Which anchor
        role: AnchorRole,
        /// The phrase searched for
        anchor: String,
        /// Number of occurrences
        count: usize,
    },

    /// The `to` anchor does not come after the `from` anchor.
    #[error("Excerpt 'to' anchor \"{to}\" does not come after 'from' anchor \"{from}\" (wrong order)")]
    WrongOrder {
        /// Start phrase
        from: String,
        /// End phrase
        to: String,
    },
}

impl AnchorError {
    /// Suggested fix for the author.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Copy the phrase exactly from the article text",
            Self::Ambiguous { .. } => "Use a longer or more specific phrase that occurs only once",
            Self::WrongOrder { .. } => "Swap the anchors or choose a 'to::' phrase later in the article",
        }
    }
}

/// Byte ranges of every case-insensitive occurrence of `needle`.
///
/// Matches start on character boundaries and may overlap.
///
/// # Example
///
/// ```rust
/// use lectern_compiler::bundle::article::find_all;
///
/// assert_eq!(find_all("Risk, RISK, risk", "risk"), vec![0..4, 6..10, 12..16]);
/// assert!(find_all("text", "").is_empty());
/// ```
pub fn find_all(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    haystack
        .char_indices()
        .filter_map(|(start, _)| match_len(&haystack[start..], &needle).map(|len| start..start + len))
        .collect()
}

fn match_len(rest: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in rest.char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}

/// Locate an excerpt of `text`.
///
/// A missing `from` starts at the beginning of the text and a missing `to`
/// ends at its end. Anchors are checked for presence first, then for
/// uniqueness, then for order.
pub fn locate_excerpt(text: &str, from: Option<&str>, to: Option<&str>) -> Result<Range<usize>, AnchorError> {
    let from_matches = from.map(|a| (a, find_all(text, a)));
    let to_matches = to.map(|a| (a, find_all(text, a)));

    for (role, found) in [(AnchorRole::From, &from_matches), (AnchorRole::To, &to_matches)] {
        if let Some((anchor, matches)) = found {
            if matches.is_empty() {
                return Err(AnchorError::NotFound {
                    role,
                    anchor: anchor.to_string(),
                });
            }
        }
    }
    for (role, found) in [(AnchorRole::From, &from_matches), (AnchorRole::To, &to_matches)] {
        if let Some((anchor, matches)) = found {
            if matches.len() > 1 {
                return Err(AnchorError::Ambiguous {
                    role,
                    anchor: anchor.to_string(),
                    count: matches.len(),
                });
            }
        }
    }

    let start = from_matches.as_ref().map(|(_, m)| m[0].clone());
    let end = to_matches.as_ref().map(|(_, m)| m[0].clone());
    if let (Some((from, _)), Some((to, _)), Some(start), Some(end)) = (&from_matches, &to_matches, &start, &end) {
        if end.start <= start.start {
            return Err(AnchorError::WrongOrder {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
    }

    Ok(start.map_or(0, |r| r.start)..end.map_or(text.len(), |r| r.end))
}

/// Article text around a run of excerpts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedContext {
    /// Text between the previous excerpt and this one.
    pub before: Option<String>,
    /// Text after this excerpt, set on the last excerpt only.
    pub after: Option<String>,
}

/// Compute the skipped text around each excerpt range, in order.
///
/// The first excerpt never gets `before`; empty or whitespace-only gaps
/// are omitted.
pub fn collapsed_context(text: &str, ranges: &[Range<usize>]) -> Vec<CollapsedContext> {
    let gap = |range: Range<usize>| -> Option<String> {
        text.get(range).map(str::trim).filter(|g| !g.is_empty()).map(String::from)
    };

    let last = ranges.len().saturating_sub(1);
    ranges
        .iter()
        .enumerate()
        .map(|(i, range)| CollapsedContext {
            before: (i > 0)
                .then(|| ranges[i - 1].end)
                .filter(|prev_end| *prev_end < range.start)
                .and_then(|prev_end| gap(prev_end..range.start)),
            after: (i == last).then(|| gap(range.end..text.len())).flatten(),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
