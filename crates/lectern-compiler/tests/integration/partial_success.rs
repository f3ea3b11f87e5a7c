//! Integration tests for partial-success semantics: failures stay inside
//! the module or section they belong to.

use lectern_compiler::FlatSection;
use proptest::prelude::*;

use crate::common::{ContentFixture, LO_ID, OTHER_MODULE_ID, messages};

fn with_second_module(fixture: ContentFixture) -> ContentFixture {
    fixture.module(
        "second",
        OTHER_MODULE_ID,
        "# Page: Standalone\n## Text\ncontent:: Still here.\n",
    )
}

#[test]
fn test_missing_learning_outcome_fails_only_its_module() {
    let result = with_second_module(ContentFixture::standard())
        .without("Learning Outcomes/alignment.md")
        .process();

    let intro = result.modules.iter().find(|m| m.slug == "intro").unwrap();
    assert!(intro.sections.is_empty());
    assert!(intro.error.as_deref().unwrap().contains("Learning Outcomes/alignment.md"));

    let second = result.modules.iter().find(|m| m.slug == "second").unwrap();
    assert_eq!(second.error, None);
    assert_eq!(second.sections.len(), 1);

    let error = result.errors.iter().find(|e| e.is_error()).unwrap();
    assert_eq!(error.file, "modules/intro.md");
    assert_eq!(error.line, Some(12));
}

#[test]
fn test_outcome_link_to_wrong_directory_fails_module() {
    let result = ContentFixture::standard()
        .module(
            "stray",
            OTHER_MODULE_ID,
            "# Page: Kept\n## Text\ncontent:: Hello.\n\n# Learning Outcome: Wrong\nsource:: [[../Lenses/alignment-article]]\n",
        )
        .process();

    let stray = result.modules.iter().find(|m| m.slug == "stray").unwrap();
    assert!(stray.sections.is_empty(), "{:#?}", stray.sections);
    assert!(stray.error.as_deref().unwrap().contains("'Wrong'"));

    let errors: Vec<_> = result.errors.iter().filter(|e| e.file == "modules/stray.md").collect();
    assert!(errors.iter().all(|e| e.is_error() && e.line == Some(11)), "{:#?}", messages(&result));
    assert!(errors[0].message.contains("expected learning outcome content"));
}

#[test]
fn test_broken_lens_link_in_outcome_fails_every_user() {
    let result = with_second_module(ContentFixture::standard())
        .learning_outcome(
            "alignment",
            LO_ID,
            "## Lens: Reading\nsource:: [[../Lenses/alignment-article]]\n\n## Lens: Talk\nsource:: [[../../Lenses/alignment-talk]]\noptional:: true\n",
        )
        .module(
            "reuse",
            "5a6b7c8d-9e0f-4a1b-8c2d-3e4f5a6b7c8d",
            "# Learning Outcome: Again\nsource:: [[../Learning Outcomes/alignment]]\n",
        )
        .process();

    for slug in ["intro", "reuse"] {
        let module = result.modules.iter().find(|m| m.slug == slug).unwrap();
        assert!(module.sections.is_empty(), "{slug}: {:#?}", module.sections);
        let error = module.error.as_deref().unwrap();
        assert!(error.contains("Lens section 'Talk'"), "{slug}: {error}");
        assert!(error.contains("Learning Outcomes/alignment.md"), "{slug}: {error}");
    }

    // The link itself is reported once, against the learning outcome.
    let link_errors: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.file == "Learning Outcomes/alignment.md")
        .collect();
    assert_eq!(link_errors.len(), 1, "{:#?}", messages(&result));
    assert_eq!(link_errors[0].line, Some(8));

    let second = result.modules.iter().find(|m| m.slug == "second").unwrap();
    assert_eq!(second.error, None);
}

#[test]
fn test_invalid_lens_fails_module() {
    let result = ContentFixture::standard()
        .file("Lenses/alignment-talk.md", "---\nid: not-a-uuid\n---\n### Video: T\nsource:: [[../video_transcripts/safety-talk]]\n")
        .process();

    let module = &result.modules[0];
    assert!(module.sections.is_empty());
    assert!(module.error.as_deref().unwrap().contains("Lenses/alignment-talk.md"));

    // The lens's own problem is reported against the lens file.
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.file == "Lenses/alignment-talk.md" && e.message.contains("must be a UUID")),
        "{:#?}",
        messages(&result)
    );
}

#[test]
fn test_module_with_broken_header_reports_identity() {
    let result = with_second_module(ContentFixture::standard())
        .file("modules/broken.md", "# Page: No header\n")
        .process();

    let broken = result.modules.iter().find(|m| m.slug == "broken").unwrap();
    assert_eq!(broken.error.as_deref(), Some("Missing frontmatter"));
    assert_eq!(broken.title, "");
    assert!(broken.sections.is_empty());
    assert_eq!(result.modules.len(), 3);
}

#[test]
fn test_ambiguous_anchor_drops_only_that_section() {
    let result = ContentFixture::standard()
        .file(
            "Lenses/alignment-article.md",
            "---\nid: 9c8b7a6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d\n---\n\n### Article: Hard\nsource:: [[../articles/alignment]]\n\n#### Article-excerpt\nfrom:: \"the goals\"\n",
        )
        .module(
            "second",
            OTHER_MODULE_ID,
            "# Learning Outcome: Same outcome\nsource:: [[../Learning Outcomes/alignment]]\n",
        )
        .process();

    let errors: Vec<_> = result.errors.iter().filter(|e| e.is_error()).collect();
    assert_eq!(errors.len(), 1, "{:#?}", messages(&result));
    assert!(errors[0].message.contains("multiple"));
    assert_eq!(errors[0].file, "Lenses/alignment-article.md");
    assert_eq!(errors[0].line, Some(8));

    for module in &result.modules {
        assert_eq!(module.error, None);
        let kinds: Vec<_> = module
            .sections
            .iter()
            .filter(|s| matches!(s, FlatSection::LensArticle(_)))
            .collect();
        assert!(kinds.is_empty());
        assert!(module.sections.iter().any(|s| matches!(s, FlatSection::LensVideo(_))));
    }
}

#[test]
fn test_no_errors_means_every_module_succeeds() {
    let result = with_second_module(ContentFixture::standard()).process();
    assert!(!result.has_errors());
    assert!(result.modules.iter().all(|m| m.error.is_none() && !m.sections.is_empty()));
}

#[test]
fn test_output_is_deterministic() {
    let fixture = with_second_module(ContentFixture::standard()).without("articles/alignment.md");
    let first = serde_json::to_string(&fixture.process()).unwrap();
    let second = serde_json::to_string(&fixture.process()).unwrap();
    assert_eq!(first, second);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_deterministic_for_arbitrary_page_text(text in "[A-Za-z0-9 .,!?]{1,80}") {
        let fixture = ContentFixture::new().module(
            "generated",
            OTHER_MODULE_ID,
            &format!("# Page: Generated\n## Text\ncontent:: {text}\n"),
        );
        let first = serde_json::to_string(&fixture.process()).unwrap();
        let second = serde_json::to_string(&fixture.process()).unwrap();
        prop_assert_eq!(first, second);
    }
}
