//! Slash-separated relative path arithmetic.
//!
//! Content paths are keys in an in-memory file map, not filesystem paths, so
//! these helpers work on `/`-separated strings and never touch the disk.
//! Backslashes are treated as separators so maps built on Windows resolve the
//! same way.

/// Normalize a relative path: unify separators, drop `.` and empty segments,
/// and fold `..` into the preceding segment.
///
/// Leading `..` segments that would climb above the root are kept, so the
/// result never silently points at a different file.
///
/// # Examples
///
/// ```
/// use lectern_core::normalize_path;
///
/// assert_eq!(normalize_path("modules/../Lenses/./intro.md"), "Lenses/intro.md");
/// assert_eq!(normalize_path("./modules//intro.md"), "modules/intro.md");
/// assert_eq!(normalize_path("../outside.md"), "../outside.md");
/// ```
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Directory part of a path (empty for root-level files).
///
/// # Examples
///
/// ```
/// use lectern_core::parent_dir;
///
/// assert_eq!(parent_dir("modules/week1/intro.md"), "modules/week1");
/// assert_eq!(parent_dir("intro.md"), "");
/// ```
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Resolve `target` relative to the directory of `base_file`.
///
/// A target starting with `/` is taken relative to the content root.
///
/// # Examples
///
/// ```
/// use lectern_core::resolve_relative;
///
/// assert_eq!(
///     resolve_relative("modules/intro.md", "../Lenses/what-is-ai.md"),
///     "Lenses/what-is-ai.md"
/// );
/// assert_eq!(resolve_relative("modules/intro.md", "/articles/a.md"), "articles/a.md");
/// ```
pub fn resolve_relative(base_file: &str, target: &str) -> String {
    let target = target.trim();
    if let Some(rooted) = target.strip_prefix('/') {
        return normalize_path(rooted);
    }

    let dir = parent_dir(base_file);
    if dir.is_empty() {
        normalize_path(target)
    } else {
        normalize_path(&format!("{dir}/{target}"))
    }
}

/// File name without its final extension.
///
/// # Examples
///
/// ```
/// use lectern_core::file_stem;
///
/// assert_eq!(file_stem("Lenses/what-is-ai.md"), "what-is-ai");
/// assert_eq!(file_stem("articles/.hidden"), ".hidden");
/// ```
pub fn file_stem(path: &str) -> &str {
    let name = match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match name.rfind('.') {
        Some(0) | None => name,
        Some(pos) => &name[..pos],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize_path("modules\\week1\\intro.md"), "modules/week1/intro.md");
    }

    #[test]
    fn test_normalize_multiple_parent_segments() {
        assert_eq!(normalize_path("a/b/c/../../d.md"), "a/d.md");
        assert_eq!(normalize_path("a/../../b.md"), "../b.md");
    }

    #[test]
    fn test_resolve_sibling_directory() {
        assert_eq!(
            resolve_relative("Learning Outcomes/risks.md", "../Lenses/Orthogonality.md"),
            "Lenses/Orthogonality.md"
        );
    }

    #[test]
    fn test_resolve_same_directory() {
        assert_eq!(resolve_relative("Lenses/a.md", "b.md"), "Lenses/b.md");
        assert_eq!(resolve_relative("Lenses/a.md", "./b.md"), "Lenses/b.md");
    }

    #[test]
    fn test_resolve_from_root_file() {
        assert_eq!(resolve_relative("index.md", "modules/a.md"), "modules/a.md");
    }

    #[test]
    fn test_file_stem_without_extension() {
        assert_eq!(file_stem("modules/intro"), "intro");
        assert_eq!(file_stem("intro.tar.md"), "intro.tar");
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(path in "[a-z./]{0,24}") {
            let once = normalize_path(&path);
            prop_assert_eq!(normalize_path(&once), once);
        }

        #[test]
        fn test_normalized_has_no_dot_segments(path in "[a-z./]{0,24}") {
            let normalized = normalize_path(&path);
            prop_assert!(normalized.split('/').all(|s| s != "." && !s.is_empty() || normalized.is_empty()));
        }
    }
}
