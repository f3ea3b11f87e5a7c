//! Reading content into the path → text map the compiler consumes.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use lectern_core::{Error, Result};

/// Where to read content files from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Every markdown file below a root directory.
    Directory(PathBuf),
    /// A JSON object on stdin.
    Stdin,
}

/// Read content from `source`.
pub fn load(source: &Source) -> Result<BTreeMap<String, String>> {
    match source {
        Source::Directory(root) => load_directory(root),
        Source::Stdin => load_json(std::io::stdin().lock()),
    }
}

/// Collect every `*.md` file below `root`, keyed by its `/`-separated path
/// relative to `root`.
///
/// Hidden files and directories are skipped.
pub fn load_directory(root: &Path) -> Result<BTreeMap<String, String>> {
    if !root.is_dir() {
        return Err(Error::config(format!(
            "Content root '{}' is not a directory",
            root.display()
        )));
    }

    let pattern = format!(
        "{}/**/*.md",
        glob::Pattern::escape(&root.to_string_lossy())
    );
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    let paths = glob::glob_with(&pattern, options)
        .map_err(|e| Error::config(format!("Invalid content root pattern: {e}")))?;

    let mut files = BTreeMap::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io_with_path(e.into_error(), path)
        })?;
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let text = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        files.insert(key, text);
    }

    tracing::debug!("Read {} files from {}", files.len(), root.display());
    Ok(files)
}

/// Parse a JSON object mapping relative paths to file contents.
pub fn load_json(reader: impl Read) -> Result<BTreeMap<String, String>> {
    serde_json::from_reader(reader).map_err(|e| {
        Error::parse(format!(
            "Expected a JSON object mapping paths to file contents: {e}"
        ))
    })
}
