//! Content ID and slug utilities.
//!
//! Content IDs are UUIDs authored in frontmatter. Slugs are lowercase
//! kebab-case identifiers, derived from a file name when the author did not
//! provide one.

use uuid::Uuid;

use crate::util::paths::file_stem;

/// Check that a content ID is a well-formed UUID.
///
/// # Examples
///
/// ```
/// use lectern_core::util::ids::is_valid_content_id;
///
/// assert!(is_valid_content_id("0b1f3a2e-6c4d-4e8f-9a1b-2c3d4e5f6a7b"));
/// assert!(!is_valid_content_id("intro-lens"));
/// assert!(!is_valid_content_id(""));
/// ```
pub fn is_valid_content_id(id: &str) -> bool {
    Uuid::parse_str(id.trim()).is_ok()
}

/// Normalize an identifier to lowercase kebab-case.
///
/// # Examples
///
/// ```
/// use lectern_core::util::ids::normalize_slug;
///
/// assert_eq!(normalize_slug("Intro to AI"), "intro-to-ai");
/// assert_eq!(normalize_slug("risks_from_ai"), "risks-from-ai");
/// assert_eq!(normalize_slug("  Mixed   Case  "), "mixed-case");
/// ```
pub fn normalize_slug(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Derive a slug from a path's file stem.
///
/// # Examples
///
/// ```
/// use lectern_core::util::ids::slug_from_path;
///
/// assert_eq!(slug_from_path("modules/Intro To AI.md"), "intro-to-ai");
/// ```
pub fn slug_from_path(path: &str) -> String {
    normalize_slug(file_stem(path))
}
