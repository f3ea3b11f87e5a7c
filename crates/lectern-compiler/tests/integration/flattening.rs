//! Integration tests for module flattening and bundling.

use lectern_compiler::{FlatSection, Segment};
use serde_json::Value;

use crate::common::{ARTICLE_BODY, ARTICLE_LENS_ID, ContentFixture, LO_ID, MODULE_ID, VIDEO_LENS_ID, messages};

#[test]
fn test_standard_curriculum_compiles_cleanly() {
    let result = ContentFixture::standard().process();

    assert!(result.errors.is_empty(), "{:#?}", messages(&result));
    assert_eq!(result.modules.len(), 1);

    let module = &result.modules[0];
    assert_eq!(module.slug, "intro");
    assert_eq!(module.content_id.as_deref(), Some(MODULE_ID));
    assert_eq!(module.error, None);
    assert_eq!(module.sections.len(), 3);
    assert_eq!(module.sections[0].title(), "Welcome");
}

#[test]
fn test_learning_outcome_with_two_lenses_one_optional() {
    let result = ContentFixture::standard().process();
    let sections = &result.modules[0].sections;

    let FlatSection::LensArticle(article) = &sections[1] else {
        panic!("expected an article section, got {:?}", sections[1]);
    };
    let FlatSection::LensVideo(video) = &sections[2] else {
        panic!("expected a video section, got {:?}", sections[2]);
    };

    assert_eq!(article.learning_outcome_id.as_deref(), Some(LO_ID));
    assert_eq!(video.learning_outcome_id.as_deref(), Some(LO_ID));
    assert_eq!(article.content_id.as_deref(), Some(ARTICLE_LENS_ID));
    assert_eq!(video.content_id.as_deref(), Some(VIDEO_LENS_ID));
    assert!(!article.optional);
    assert!(video.optional);
}

#[test]
fn test_lens_metadata_follows_source_documents() {
    let result = ContentFixture::standard().process();
    let sections = &result.modules[0].sections;

    let FlatSection::LensArticle(article) = &sections[1] else {
        panic!("expected an article section");
    };
    assert_eq!(article.author.as_deref(), Some("Holden Karnofsky"));
    assert_eq!(
        article.source_url.as_deref(),
        Some("https://www.cold-takes.com/why-ai-alignment-could-be-hard/")
    );

    let FlatSection::LensVideo(video) = &sections[2] else {
        panic!("expected a video section");
    };
    assert_eq!(video.video_id, "pYXy-A4siMw");
    assert_eq!(video.channel.as_deref(), Some("Rob Miles"));
}

#[test]
fn test_article_excerpt_is_literal_substring() {
    let result = ContentFixture::standard().process();
    let segments = result.modules[0].sections[1].segments();

    assert!(matches!(&segments[0], Segment::Text { content } if content.starts_with("Before reading")));
    let Segment::ArticleExcerpt {
        content,
        collapsed_before,
        collapsed_after,
    } = &segments[1]
    else {
        panic!("expected an excerpt, got {:?}", segments[1]);
    };

    assert!(ARTICLE_BODY.contains(content.as_str()));
    assert!(content.starts_with("Modern AI systems"));
    assert!(content.ends_with("emerge from training."));
    assert_eq!(collapsed_before, &None);
    assert_eq!(
        collapsed_after.as_deref(),
        Some("This is why alignment is hard: we cannot read the goals back out.\n\nFurther reading follows.")
    );
    assert!(matches!(&segments[2], Segment::Chat { .. }));
}

#[test]
fn test_video_excerpt_transcript() {
    let result = ContentFixture::standard().process();
    let segments = result.modules[0].sections[2].segments();

    assert_eq!(
        segments,
        [Segment::VideoExcerpt {
            from: 10,
            to: Some(60),
            transcript: "Today we talk about safety. Why does it matter?".to_string(),
        }]
    );
}

#[test]
fn test_uncategorized_lenses_have_no_outcome() {
    let result = ContentFixture::standard()
        .module(
            "extras",
            "0e1f2a3b-4c5d-4e6f-8a7b-9c0d1e2f3a4b",
            "# Uncategorized: Extras\n## Lens: Talk\nsource:: [[../Lenses/alignment-talk]]\n",
        )
        .process();

    assert!(result.errors.is_empty(), "{:#?}", messages(&result));
    let extras = result.modules.iter().find(|m| m.slug == "extras").unwrap();
    let FlatSection::LensVideo(video) = &extras.sections[0] else {
        panic!("expected a video section");
    };
    assert_eq!(video.learning_outcome_id, None);
    assert!(!video.optional);
}

#[test]
fn test_output_json_shape() {
    let result = ContentFixture::standard().process();
    let json: Value = serde_json::to_value(&result).unwrap();

    let module = &json["modules"][0];
    assert_eq!(module["contentId"], MODULE_ID);
    assert!(module.get("error").is_none());
    assert_eq!(module["sections"][0]["type"], "page");
    assert_eq!(module["sections"][0]["learningOutcomeId"], Value::Null);
    assert_eq!(module["sections"][1]["type"], "lens-article");
    assert_eq!(module["sections"][1]["segments"][1]["type"], "article-excerpt");
    assert_eq!(module["sections"][2]["type"], "lens-video");
    assert_eq!(module["sections"][2]["videoId"], "pYXy-A4siMw");
    assert_eq!(json["errors"], Value::Array(Vec::new()));
}

#[test]
fn test_windows_paths_and_line_endings() {
    let fixture = ContentFixture::standard();
    let mut files = std::collections::BTreeMap::new();
    for (path, text) in fixture.files() {
        files.insert(path.replace('/', "\\"), text.replace('\n', "\r\n"));
    }

    let result = lectern_compiler::process_content(&files, &lectern_core::ContentLayout::default());
    assert_eq!(result, fixture.process());
}

#[test]
fn test_links_ignore_directory_case() {
    let fixture = ContentFixture::standard();
    let mut files = std::collections::BTreeMap::new();
    for (path, text) in fixture.files() {
        let path = path
            .replace("Lenses/", "lenses/")
            .replace("Learning Outcomes/", "learning outcomes/");
        files.insert(path, text.clone());
    }
    files.insert(
        "Modules/extra.md".to_string(),
        "---\nslug: extra\ntitle: Extra\ncontentId: 0e1f2a3b-4c5d-4e6f-8a7b-9c0d1e2f3a4b\n---\n# Uncategorized: Talks\n## Lens: Talk\nsource:: [[../LENSES/alignment-talk]]\n".to_string(),
    );
    files.insert(
        "courses/second.md".to_string(),
        "---\nslug: second\ntitle: Second\n---\n# Module: [[../modules/extra]]\n".to_string(),
    );

    let result = lectern_compiler::process_content(&files, &lectern_core::ContentLayout::default());
    assert!(result.errors.is_empty(), "{:#?}", messages(&result));
    assert!(result.modules.iter().all(|m| m.error.is_none() && !m.sections.is_empty()));

    let second = result.courses.iter().find(|c| c.slug == "second").unwrap();
    assert_eq!(
        second.progression,
        vec![lectern_compiler::ProgressionItem::Module {
            slug: "extra".to_string(),
            optional: false
        }]
    );
}
