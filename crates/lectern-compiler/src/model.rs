//! Output model.
//!
//! These types are the compiler's product: flattened modules ready for
//! delivery and course progressions. They serialize to camelCase JSON with
//! a `type` tag on every section, segment, and progression item.

use lectern_core::{ContentError, Severity};
use serde::{Deserialize, Serialize};

/// A module with every reference expanded into concrete sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatModule {
    /// URL slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Module content id.
    pub content_id: Option<String>,
    /// Flattened sections in order. Empty when `error` is set.
    pub sections: Vec<FlatSection>,
    /// Why the module could not be flattened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FlatModule {
    /// A module that failed as a whole.
    pub fn failed(slug: impl Into<String>, title: impl Into<String>, content_id: Option<String>, error: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            content_id,
            sections: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Whether the module failed as a whole.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// One delivered section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FlatSection {
    /// An authored page.
    Page(PageSection),
    /// A lens presenting a video.
    LensVideo(LensVideoSection),
    /// A lens presenting an article.
    LensArticle(LensArticleSection),
}

impl FlatSection {
    /// Section title.
    pub fn title(&self) -> &str {
        match self {
            Self::Page(s) => &s.title,
            Self::LensVideo(s) => &s.title,
            Self::LensArticle(s) => &s.title,
        }
    }

    /// Whether the student may skip the section.
    pub fn optional(&self) -> bool {
        match self {
            Self::Page(s) => s.optional,
            Self::LensVideo(s) => s.optional,
            Self::LensArticle(s) => s.optional,
        }
    }

    /// Segments in order.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::Page(s) => &s.segments,
            Self::LensVideo(s) => &s.segments,
            Self::LensArticle(s) => &s.segments,
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSection {
    pub content_id: Option<String>,
    pub learning_outcome_id: Option<String>,
    pub title: String,
    pub optional: bool,
    pub segments: Vec<Segment>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensVideoSection {
    pub content_id: Option<String>,
    pub learning_outcome_id: Option<String>,
    pub title: String,
    pub optional: bool,
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub segments: Vec<Segment>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensArticleSection {
    pub content_id: Option<String>,
    pub learning_outcome_id: Option<String>,
    pub title: String,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub segments: Vec<Segment>,
}

/// One delivered segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Segment {
    /// Author prose.
    Text {
        /// Markdown content
        content: String,
    },
    /// Tutor discussion prompt.
    Chat {
        /// Prompt instructions
        instructions: String,
    },
    /// Verbatim span of an article.
    #[serde(rename_all = "camelCase")]
    ArticleExcerpt {
        /// The excerpt text
        content: String,
        /// Article text skipped since the previous excerpt.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collapsed_before: Option<String>,
        /// Article text after the final excerpt.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collapsed_after: Option<String>,
    },
    /// Span of a video, with its transcript.
    VideoExcerpt {
        /// Start, in seconds
        from: u32,
        /// End, in seconds; `None` plays to the end
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<u32>,
        /// Transcript text of the span
        transcript: String,
    },
}

/// A course: an ordered progression of modules and meetings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// URL slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Items in order.
    pub progression: Vec<ProgressionItem>,
}

/// One step of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProgressionItem {
    /// Work through a module.
    Module {
        /// Slug of the module
        slug: String,
        /// Whether the module is optional
        optional: bool,
    },
    /// A live group meeting.
    Meeting {
        /// Meeting number
        number: u32,
    },
}

/// Everything a compilation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    /// Flattened modules, by source path.
    pub modules: Vec<FlatModule>,
    /// Parsed courses, by source path.
    pub courses: Vec<Course>,
    /// Errors and warnings across all files.
    pub errors: Vec<ContentError>,
}

impl ProcessResult {
    /// Whether any error-severity diagnostic was produced.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ContentError::is_error)
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors.iter().filter(|e| e.severity == Severity::Error).count()
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.errors.iter().filter(|e| e.severity == Severity::Warning).count()
    }
}
