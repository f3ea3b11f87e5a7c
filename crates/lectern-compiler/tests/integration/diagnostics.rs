//! Integration tests for diagnostics produced by broken content.

use lectern_core::Severity;

use crate::common::{ContentFixture, LO_ID, OTHER_MODULE_ID, messages};

#[test]
fn test_wrong_heading_depth_warns_once() {
    let result = ContentFixture::new()
        .learning_outcome(
            "shallow",
            LO_ID,
            "# Lens: One\nsource:: [[../Lenses/one]]\n\n# Lens: Two\nsource:: [[../Lenses/two]]\n",
        )
        .process();

    let heading: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.message.contains("heading level"))
        .collect();
    assert_eq!(heading.len(), 1, "{:#?}", messages(&result));
    assert_eq!(heading[0].severity, Severity::Warning);
    assert_eq!(heading[0].line, Some(5));
    assert_eq!(heading[0].suggestion.as_deref(), Some("Write it as '## Lens: One'"));
}

#[test]
fn test_duplicate_fields_only_within_one_scope() {
    let siblings = "\
### Article: A
source:: [[../articles/a]]

#### Text
content:: First.

#### Text
content:: Second.
";
    let same_scope = "\
### Article: A
source:: [[../articles/a]]

#### Text
content:: First.
content:: Again.
";
    let duplicates = |lens: &str| {
        let result = ContentFixture::new()
            .lens("l", LO_ID, lens)
            .article("a", "title: A", "Body.")
            .process();
        result
            .errors
            .iter()
            .filter(|e| e.message.contains("Duplicate field"))
            .count()
    };

    assert_eq!(duplicates(siblings), 0);
    assert_eq!(duplicates(same_scope), 1);
}

#[test]
fn test_orphan_documents_are_validated() {
    let result = ContentFixture::standard()
        .lens("orphan", "bad-id", "### Article: A\nsource:: [[../articles/alignment]]\n")
        .process();

    assert!(result.modules.iter().all(|m| m.error.is_none()));
    let orphan: Vec<_> = result.errors.iter().filter(|e| e.file == "Lenses/orphan.md").collect();
    assert_eq!(orphan.len(), 1, "{:#?}", messages(&result));
    assert!(orphan[0].message.contains("must be a UUID"));
}

#[test]
fn test_shared_lens_errors_reported_once() {
    let result = ContentFixture::standard()
        .file(
            "Lenses/alignment-talk.md",
            "---\nid: 2d3e4f5a-6b7c-4d8e-9f0a-1b2c3d4e5f6a\n---\n### Video: T\nsource:: [[../video_transcripts/safety-talk]]\n#### Video-excerpt\nfrom:: 9:00\n",
        )
        .module(
            "second",
            OTHER_MODULE_ID,
            "# Uncategorized: Again\n## Lens: Talk\nsource:: [[../Lenses/alignment-talk]]\n",
        )
        .process();

    let not_found: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.message.contains("not found in transcript"))
        .collect();
    assert_eq!(not_found.len(), 1, "{:#?}", messages(&result));
    assert_eq!(not_found[0].file, "Lenses/alignment-talk.md");
}

#[test]
fn test_invalid_timestamp_reported_with_example() {
    let result = ContentFixture::standard()
        .file(
            "Lenses/alignment-talk.md",
            "---\nid: 2d3e4f5a-6b7c-4d8e-9f0a-1b2c3d4e5f6a\n---\n### Video: T\nsource:: [[../video_transcripts/safety-talk]]\n#### Video-excerpt\nfrom:: 90\n",
        )
        .process();

    let error = result.errors.iter().find(|e| e.is_error()).unwrap();
    assert_eq!(error.message, "Invalid timestamp '90'");
    assert!(error.suggestion.as_deref().unwrap().contains("1:30"));
}

#[test]
fn test_wikilink_to_unknown_directory() {
    let result = ContentFixture::standard()
        .module(
            "stray",
            OTHER_MODULE_ID,
            "# Learning Outcome: Stray\nsource:: [[../outcomes/alignment]]\n",
        )
        .process();

    let error = result.errors.iter().find(|e| e.file == "modules/stray.md").unwrap();
    assert!(error.message.contains("does not point into a known content directory"));
    assert_eq!(error.line, Some(7));

    let stray = result.modules.iter().find(|m| m.slug == "stray").unwrap();
    assert!(stray.sections.is_empty());
    assert!(stray.error.as_deref().unwrap().contains("[[../outcomes/alignment]]"));
    assert!(result.errors.iter().all(|e| e.message != "Module has no sections"));

    let intro = result.modules.iter().find(|m| m.slug == "intro").unwrap();
    assert_eq!(intro.error, None);
}

#[test]
fn test_diagnostic_display_format() {
    let result = ContentFixture::new()
        .file("modules/x.md", "---\nslug: x\n")
        .process();
    assert_eq!(
        messages(&result),
        ["modules/x.md:1: error: Unclosed frontmatter (hint: Add a closing '---' line after the header fields)"]
    );
}
