//! Integration tests for course progressions.

use lectern_compiler::ProgressionItem;

use crate::common::{ContentFixture, OTHER_MODULE_ID, messages};

#[test]
fn test_course_progression_uses_module_slugs() {
    let result = ContentFixture::standard()
        .file(
            "modules/feedback.md",
            &format!("---\nslug: feedback-loops\ntitle: Feedback\ncontentId: {OTHER_MODULE_ID}\n---\n# Page: P\n## Text\ncontent:: x\n"),
        )
        .course(
            "full",
            "# Module: [[../modules/intro]]\n# Meeting: 1\n# Module: [[../modules/feedback|Feedback loops]]\noptional:: true\n# Meeting: 2\n",
        )
        .process();

    assert!(result.errors.is_empty(), "{:#?}", messages(&result));
    let course = result.courses.iter().find(|c| c.slug == "full").unwrap();
    assert_eq!(
        course.progression,
        vec![
            ProgressionItem::Module {
                slug: "intro".to_string(),
                optional: false
            },
            ProgressionItem::Meeting { number: 1 },
            ProgressionItem::Module {
                slug: "feedback-loops".to_string(),
                optional: true
            },
            ProgressionItem::Meeting { number: 2 },
        ]
    );
}

#[test]
fn test_courses_in_path_order() {
    let result = ContentFixture::standard().course("alpha", "# Meeting: 1\n").process();
    let slugs: Vec<_> = result.courses.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, ["alpha", "default"]);
}

#[test]
fn test_course_referencing_failed_module_still_links() {
    let result = ContentFixture::standard().without("Learning Outcomes/alignment.md").process();
    let course = &result.courses[0];
    assert_eq!(
        course.progression[0],
        ProgressionItem::Module {
            slug: "intro".to_string(),
            optional: false
        }
    );
}

#[test]
fn test_course_with_missing_module() {
    let result = ContentFixture::standard()
        .course("broken", "# Module: [[../modules/nowhere]]\n# Meeting: 1\n")
        .process();

    let course = result.courses.iter().find(|c| c.slug == "broken").unwrap();
    assert_eq!(course.progression, vec![ProgressionItem::Meeting { number: 1 }]);

    let error = result.errors.iter().find(|e| e.file == "courses/broken.md").unwrap();
    assert_eq!(error.message, "Module 'modules/nowhere.md' not found");
    assert_eq!(error.line, Some(6));
}
