//! Common fixtures for Lectern compiler integration tests.

use std::collections::BTreeMap;

use lectern_compiler::{ProcessResult, process_content};
use lectern_core::ContentLayout;

pub const MODULE_ID: &str = "7a1e2f0c-3b4d-4c5e-8f90-a1b2c3d4e5f6";
pub const OTHER_MODULE_ID: &str = "1b2c3d4e-5f6a-4b7c-8d9e-0f1a2b3c4d5e";
pub const LO_ID: &str = "3f2a9c1e-8b7d-4e6f-a5c4-1d2e3f4a5b6c";
pub const ARTICLE_LENS_ID: &str = "9c8b7a6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d";
pub const VIDEO_LENS_ID: &str = "2d3e4f5a-6b7c-4d8e-9f0a-1b2c3d4e5f6a";

/// Article text used by the standard curriculum.
pub const ARTICLE_BODY: &str = "\
Most people assume AI will do what it is told.

Modern AI systems are trained, not programmed. Nobody writes their goals
down; the goals emerge from training.

This is why alignment is hard: we cannot read the goals back out.

Further reading follows.
";

/// Builder for an in-memory content map.
#[derive(Debug, Clone, Default)]
pub struct ContentFixture {
    files: BTreeMap<String, String>,
}

impl ContentFixture {
    /// An empty content map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A small but complete curriculum: one module with a page and a
    /// learning outcome holding an article lens and an optional video lens,
    /// plus a course.
    pub fn standard() -> Self {
        Self::new()
            .module(
                "intro",
                MODULE_ID,
                "\
# Page: Welcome
## Text
content::
Welcome to the course.

# Learning Outcome: Why alignment is hard
source:: [[../Learning Outcomes/alignment]]
",
            )
            .learning_outcome(
                "alignment",
                LO_ID,
                "\
## Lens: Reading
source:: [[../Lenses/alignment-article]]

## Lens: Talk
source:: [[../Lenses/alignment-talk]]
optional:: true
",
            )
            .lens(
                "alignment-article",
                ARTICLE_LENS_ID,
                "\
### Article: Why alignment could be hard
source:: [[../articles/alignment]]

#### Text
content:: Before reading, think about what \"goals\" means for a program.

#### Article-excerpt
from:: \"Modern AI systems\"
to:: \"emerge from training.\"

#### Chat
instructions:: Ask the student to explain the argument in their own words.
",
            )
            .lens(
                "alignment-talk",
                VIDEO_LENS_ID,
                "\
### Video: Intro to AI Safety
source:: [[../video_transcripts/safety-talk]]

#### Video-excerpt
from:: 0:10
to:: 1:00
",
            )
            .article("alignment", "title: Why AI alignment could be hard\nauthor: Holden Karnofsky\nsource_url: https://www.cold-takes.com/why-ai-alignment-could-be-hard/", ARTICLE_BODY)
            .video(
                "safety-talk",
                "title: Intro to AI Safety\nchannel: Rob Miles\nurl: https://www.youtube.com/watch?v=pYXy-A4siMw",
                "0:00 Hi.\n0:10 Today we talk about safety.\n0:30 Why does it matter?\n1:00 Let's begin.\n",
            )
            .course(
                "default",
                "\
# Module: [[../modules/intro]]

# Meeting: 1
",
            )
    }

    /// Add or replace a raw file.
    pub fn file(mut self, path: &str, text: &str) -> Self {
        self.files.insert(path.to_string(), text.to_string());
        self
    }

    /// Remove a file.
    pub fn without(mut self, path: &str) -> Self {
        self.files.remove(path);
        self
    }

    /// Add a module document.
    pub fn module(self, slug: &str, content_id: &str, body: &str) -> Self {
        let title = slug.replace('-', " ");
        self.file(
            &format!("modules/{slug}.md"),
            &format!("---\nslug: {slug}\ntitle: {title}\ncontentId: {content_id}\n---\n\n{body}"),
        )
    }

    /// Add a learning outcome document.
    pub fn learning_outcome(self, name: &str, id: &str, body: &str) -> Self {
        self.file(&format!("Learning Outcomes/{name}.md"), &format!("---\nid: {id}\n---\n\n{body}"))
    }

    /// Add a lens document.
    pub fn lens(self, name: &str, id: &str, body: &str) -> Self {
        self.file(&format!("Lenses/{name}.md"), &format!("---\nid: {id}\n---\n\n{body}"))
    }

    /// Add an article with the given header lines.
    pub fn article(self, name: &str, header: &str, body: &str) -> Self {
        self.file(&format!("articles/{name}.md"), &format!("---\n{header}\n---\n{body}"))
    }

    /// Add a video transcript with the given header lines.
    pub fn video(self, name: &str, header: &str, transcript: &str) -> Self {
        self.file(&format!("video_transcripts/{name}.md"), &format!("---\n{header}\n---\n{transcript}"))
    }

    /// Add a course document.
    pub fn course(self, slug: &str, body: &str) -> Self {
        self.file(
            &format!("courses/{slug}.md"),
            &format!("---\nslug: {slug}\ntitle: Course {slug}\n---\n\n{body}"),
        )
    }

    /// The raw file map.
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    /// Compile with the default layout.
    pub fn process(&self) -> ProcessResult {
        process_content(&self.files, &ContentLayout::default())
    }
}

/// Messages of every diagnostic, for readable assertion failures.
pub fn messages(result: &ProcessResult) -> Vec<String> {
    result.errors.iter().map(ToString::to_string).collect()
}
