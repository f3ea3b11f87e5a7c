//! The compilation entry point.

use std::collections::{BTreeMap, HashSet};

use lectern_core::{ContentError, ContentKind, ContentLayout, Diagnostics, normalize_path};

use crate::documents::{ModuleIdentity, parse_course, parse_module};
use crate::flatten::flatten_module;
use crate::lookup::ContentStore;
use crate::model::{FlatModule, ProcessResult};

/// Compile a set of content files.
///
/// `files` maps paths (relative to the content root) to file text. Only
/// `.md` files are considered; paths are normalized and line endings
/// unified before anything else. Modules and courses are produced in path
/// order, and the error list holds module problems, then course problems,
/// then problems in any other document, without duplicates.
///
/// The function never fails: every problem becomes a [`ContentError`] and
/// as much content as possible is still produced.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use lectern_compiler::process_content;
/// use lectern_core::ContentLayout;
///
/// let mut files = BTreeMap::new();
/// files.insert(
///     "modules/intro.md".to_string(),
///     "---\nslug: intro\ntitle: Intro\ncontentId: 7a1e2f0c-3b4d-4c5e-8f90-a1b2c3d4e5f6\n---\n# Page: Hello\n## Text\ncontent:: Hi\n".to_string(),
/// );
///
/// let result = process_content(&files, &ContentLayout::default());
/// assert_eq!(result.modules.len(), 1);
/// assert_eq!(result.modules[0].slug, "intro");
/// assert!(result.errors.is_empty());
/// ```
pub fn process_content(files: &BTreeMap<String, String>, layout: &ContentLayout) -> ProcessResult {
    let files = prepare(files);

    let mut modules = Vec::new();
    let mut courses = Vec::new();
    let mut store = ContentStore::new(layout);
    for (path, text) in &files {
        match layout.classify(path) {
            Some(ContentKind::Module) => modules.push((path.as_str(), text.as_str())),
            Some(ContentKind::Course) => courses.push((path.as_str(), text.as_str())),
            Some(kind) => {
                store.insert(path, kind, text);
            }
            None => log::debug!("Skipping '{path}': not in a content directory"),
        }
    }
    log::info!(
        "Compiling {} module(s), {} course(s), {} referenced document(s)",
        modules.len(),
        courses.len(),
        store.len()
    );

    let mut diagnostics = Diagnostics::new();
    let mut module_slugs: BTreeMap<String, String> = BTreeMap::new();
    let mut flat_modules = Vec::with_capacity(modules.len());

    for (path, text) in modules {
        let parsed = parse_module(text, path, layout);
        let first_error = parsed.diagnostics.first_error().map(|e| e.message.clone());
        diagnostics.extend(parsed.diagnostics);

        let flat = match parsed.value {
            Some(module) => {
                let outcome = flatten_module(&module, path, &store);
                diagnostics.extend(outcome.diagnostics);
                FlatModule {
                    slug: module.slug,
                    title: module.title,
                    content_id: Some(module.content_id),
                    sections: outcome.sections,
                    error: outcome.error,
                }
            }
            None => {
                let identity = ModuleIdentity::recover(text, path);
                let error = first_error.unwrap_or_else(|| "Module could not be parsed".to_string());
                FlatModule::failed(identity.slug, identity.title, identity.content_id, error)
            }
        };
        module_slugs.insert(layout.canonicalize(path), flat.slug.clone());
        flat_modules.push(flat);
    }

    let mut parsed_courses = Vec::with_capacity(courses.len());
    for (path, text) in courses {
        let parsed = parse_course(text, path, layout, |target| module_slugs.get(target).cloned());
        diagnostics.extend(parsed.diagnostics);
        parsed_courses.extend(parsed.value);
    }

    diagnostics.extend(store.diagnostics());
    let errors = dedupe(diagnostics);
    log::info!(
        "Compiled {} module(s) with {} diagnostic(s)",
        flat_modules.len(),
        errors.len()
    );

    ProcessResult {
        modules: flat_modules,
        courses: parsed_courses,
        errors,
    }
}

/// Normalize paths and line endings; drop non-Markdown files.
fn prepare(files: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    files
        .iter()
        .filter_map(|(path, text)| {
            let path = normalize_path(path);
            let is_markdown = path
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("md"));
            if !is_markdown {
                log::trace!("Ignoring non-Markdown file '{path}'");
                return None;
            }
            Some((path, text.replace("\r\n", "\n")))
        })
        .collect()
}

/// Remove repeated diagnostics, keeping the first occurrence.
fn dedupe(diagnostics: Diagnostics) -> Vec<ContentError> {
    let mut seen = HashSet::new();
    diagnostics
        .into_iter()
        .filter(|d| seen.insert(d.clone()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_normalizes() {
        let mut files = BTreeMap::new();
        files.insert("./modules\\a.md".to_string(), "a\r\nb".to_string());
        files.insert("modules/notes.txt".to_string(), "x".to_string());
        files.insert("modules/B.MD".to_string(), "y".to_string());

        let prepared = prepare(&files);
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared.get("modules/a.md").unwrap(), "a\nb");
        assert!(prepared.contains_key("modules/B.MD"));
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(ContentError::error("a.md", "one"));
        diagnostics.push(ContentError::warning("a.md", "two"));
        diagnostics.push(ContentError::error("a.md", "one"));

        let errors = dedupe(diagnostics);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "one");
        assert_eq!(errors[1].message, "two");
    }

    #[test]
    fn test_empty_input() {
        let result = process_content(&BTreeMap::new(), &ContentLayout::default());
        assert_eq!(result, ProcessResult::default());
    }
}
