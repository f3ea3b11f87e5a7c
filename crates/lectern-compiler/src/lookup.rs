//! Access to referenced documents during flattening.
//!
//! The flattener asks for learning outcomes, lenses, articles, and video
//! transcripts by resolved path through [`ContentLookup`]. The default
//! implementation, [`ContentStore`], parses each document the first time
//! it is asked for and keeps the result, so a lens shared by several
//! modules is parsed once and its diagnostics are reported once.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use lectern_core::{ContentError, ContentKind, ContentLayout, Diagnostics};

use crate::documents::{
    Article, LearningOutcome, Lens, ParseOutcome, VideoTranscript, parse_article, parse_learning_outcome,
    parse_lens, parse_video_transcript,
};

/// Resolve referenced documents by path.
///
/// Implementations return `None` both for paths that do not exist and for
/// documents that exist but could not be parsed.
pub trait ContentLookup {
    /// A learning outcome by path.
    fn learning_outcome(&self, path: &str) -> Option<&LearningOutcome>;

    /// A lens by path.
    fn lens(&self, path: &str) -> Option<&Lens>;

    /// An article by path.
    fn article(&self, path: &str) -> Option<&Article>;

    /// A video transcript by path.
    fn video(&self, path: &str) -> Option<&VideoTranscript>;
}

#[derive(Debug)]
enum Parsed {
    LearningOutcome(ParseOutcome<LearningOutcome>),
    Lens(ParseOutcome<Lens>),
    Article(ParseOutcome<Article>),
    Video(ParseOutcome<VideoTranscript>),
}

impl Parsed {
    fn diagnostics(&self) -> &Diagnostics {
        match self {
            Self::LearningOutcome(o) => &o.diagnostics,
            Self::Lens(o) => &o.diagnostics,
            Self::Article(o) => &o.diagnostics,
            Self::Video(o) => &o.diagnostics,
        }
    }
}

#[derive(Debug)]
struct Entry<'a> {
    path: &'a str,
    kind: ContentKind,
    text: &'a str,
    parsed: OnceLock<Parsed>,
}

/// Lazily parsed, memoized referenced documents.
///
/// Documents are keyed by their path with the bucket directory spelled as
/// the layout configures it, so `lenses/a.md` and `Lenses/a.md` find the
/// same file. Diagnostics keep the path the file was registered under.
#[derive(Debug)]
pub struct ContentStore<'a> {
    layout: &'a ContentLayout,
    entries: BTreeMap<String, Entry<'a>>,
}

impl<'a> ContentStore<'a> {
    /// Create an empty store.
    pub fn new(layout: &'a ContentLayout) -> Self {
        Self {
            layout,
            entries: BTreeMap::new(),
        }
    }

    /// Register a document. Modules and courses are not looked up and are
    /// ignored; returns whether the document was registered.
    pub fn insert(&mut self, path: &'a str, kind: ContentKind, text: &'a str) -> bool {
        match kind {
            ContentKind::Module | ContentKind::Course => {
                log::debug!("Not registering {kind} '{path}' for lookup");
                false
            }
            _ => {
                let entry = Entry {
                    path,
                    kind,
                    text,
                    parsed: OnceLock::new(),
                };
                if let Some(previous) = self.entries.insert(self.layout.canonicalize(path), entry) {
                    log::warn!("'{path}' replaces '{}': the paths differ only in directory case", previous.path);
                }
                true
            }
        }
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse every registered document and return all diagnostics, ordered
    /// by path.
    ///
    /// This also validates documents no module references.
    pub fn diagnostics(&self) -> Vec<ContentError> {
        self.entries
            .values()
            .flat_map(|entry| self.parsed(entry).diagnostics().iter().cloned())
            .collect()
    }

    fn parsed<'s>(&'s self, entry: &'s Entry<'a>) -> &'s Parsed {
        let path = entry.path;
        entry.parsed.get_or_init(|| {
            log::trace!("Parsing {} '{path}'", entry.kind);
            match entry.kind {
                ContentKind::LearningOutcome => Parsed::LearningOutcome(parse_learning_outcome(entry.text, path, self.layout)),
                ContentKind::Lens => Parsed::Lens(parse_lens(entry.text, path, self.layout)),
                ContentKind::VideoTranscript => Parsed::Video(parse_video_transcript(entry.text, path)),
                _ => Parsed::Article(parse_article(entry.text, path)),
            }
        })
    }

    fn get(&self, path: &str) -> Option<&Parsed> {
        let entry = self.entries.get(&self.layout.canonicalize(path))?;
        Some(self.parsed(entry))
    }
}

impl ContentLookup for ContentStore<'_> {
    fn learning_outcome(&self, path: &str) -> Option<&LearningOutcome> {
        match self.get(path)? {
            Parsed::LearningOutcome(outcome) => outcome.value.as_ref(),
            _ => None,
        }
    }

    fn lens(&self, path: &str) -> Option<&Lens> {
        match self.get(path)? {
            Parsed::Lens(outcome) => outcome.value.as_ref(),
            _ => None,
        }
    }

    fn article(&self, path: &str) -> Option<&Article> {
        match self.get(path)? {
            Parsed::Article(outcome) => outcome.value.as_ref(),
            _ => None,
        }
    }

    fn video(&self, path: &str) -> Option<&VideoTranscript> {
        match self.get(path)? {
            Parsed::Video(outcome) => outcome.value.as_ref(),
            _ => None,
        }
    }
}
