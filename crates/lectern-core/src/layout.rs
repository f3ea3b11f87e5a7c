//! Content-type buckets and the directory layout that maps paths to them.
//!
//! A content repository keeps each document type in its own top-level
//! directory. The directory names are configuration: [`ContentLayout`]
//! defaults to the conventional names and can be overridden from a config
//! file. Directory matching is case-insensitive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of document a path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    /// Module entry point.
    Module,
    /// Course entry point.
    Course,
    /// Learning outcome (ordered list of lens references).
    LearningOutcome,
    /// Lens wrapping one terminal article or video section.
    Lens,
    /// Source article text.
    Article,
    /// Timestamped video transcript.
    VideoTranscript,
}

impl ContentKind {
    /// Every kind, in classification order.
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Module,
        ContentKind::Course,
        ContentKind::LearningOutcome,
        ContentKind::Lens,
        ContentKind::Article,
        ContentKind::VideoTranscript,
    ];

    /// Human-readable name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Course => "course",
            Self::LearningOutcome => "learning outcome",
            Self::Lens => "lens",
            Self::Article => "article",
            Self::VideoTranscript => "video transcript",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Directory name for each content bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLayout {
    /// Directory holding module documents.
    #[serde(default = "default_modules")]
    pub modules: String,

    /// Directory holding course documents.
    #[serde(default = "default_courses")]
    pub courses: String,

    /// Directory holding learning outcome documents.
    #[serde(default = "default_learning_outcomes")]
    pub learning_outcomes: String,

    /// Directory holding lens documents.
    #[serde(default = "default_lenses")]
    pub lenses: String,

    /// Directory holding article sources.
    #[serde(default = "default_articles")]
    pub articles: String,

    /// Directory holding video transcripts.
    #[serde(default = "default_video_transcripts")]
    pub video_transcripts: String,
}

fn default_modules() -> String {
    "modules".to_string()
}

fn default_courses() -> String {
    "courses".to_string()
}

fn default_learning_outcomes() -> String {
    "Learning Outcomes".to_string()
}

fn default_lenses() -> String {
    "Lenses".to_string()
}

fn default_articles() -> String {
    "articles".to_string()
}

fn default_video_transcripts() -> String {
    "video_transcripts".to_string()
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self {
            modules: default_modules(),
            courses: default_courses(),
            learning_outcomes: default_learning_outcomes(),
            lenses: default_lenses(),
            articles: default_articles(),
            video_transcripts: default_video_transcripts(),
        }
    }
}

impl ContentLayout {
    /// Directory name configured for a kind.
    pub fn directory(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Module => &self.modules,
            ContentKind::Course => &self.courses,
            ContentKind::LearningOutcome => &self.learning_outcomes,
            ContentKind::Lens => &self.lenses,
            ContentKind::Article => &self.articles,
            ContentKind::VideoTranscript => &self.video_transcripts,
        }
    }

    /// Classify a normalized relative path by its top-level directory.
    ///
    /// Returns `None` for paths outside every configured bucket.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lectern_core::{ContentKind, ContentLayout};
    ///
    /// let layout = ContentLayout::default();
    /// assert_eq!(layout.classify("Lenses/intro.md"), Some(ContentKind::Lens));
    /// assert_eq!(layout.classify("learning outcomes/a.md"), Some(ContentKind::LearningOutcome));
    /// assert_eq!(layout.classify("notes/todo.md"), None);
    /// ```
    pub fn classify(&self, path: &str) -> Option<ContentKind> {
        let (top, rest) = path.split_once('/')?;
        if rest.is_empty() {
            return None;
        }
        ContentKind::ALL
            .into_iter()
            .find(|kind| self.directory(*kind).eq_ignore_ascii_case(top))
    }
}

impl ContentLayout {
    /// Respell the top-level directory of a bucketed path as configured.
    ///
    /// Classification ignores case, so `lenses/a.md` and `Lenses/a.md` name
    /// the same document; this gives both the same key. Paths outside every
    /// bucket are returned unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lectern_core::ContentLayout;
    ///
    /// let layout = ContentLayout::default();
    /// assert_eq!(layout.canonicalize("lenses/intro.md"), "Lenses/intro.md");
    /// assert_eq!(layout.canonicalize("notes/todo.md"), "notes/todo.md");
    /// ```
    pub fn canonicalize(&self, path: &str) -> String {
        match (self.classify(path), path.split_once('/')) {
            (Some(kind), Some((_, rest))) => format!("{}/{rest}", self.directory(kind)),
            _ => path.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
