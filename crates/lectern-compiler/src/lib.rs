//! Curriculum compiler for Lectern content.
//!
//! Turns a directory of Markdown documents (modules, learning outcomes,
//! lenses, articles, video transcripts, and courses) into flattened,
//! self-contained module records and course progressions.
//!
//! # Pipeline
//!
//! 1. [`documents`]: per-type parsers built on `lectern-content`
//! 2. [`lookup`]: lazily parsed store of referenced documents
//! 3. [`flatten`]: expand modules into delivery sections
//! 4. [`bundle`]: resolve article anchors and video timestamps
//! 5. [`process`]: the [`process_content`] entry point tying it together
//!
//! Content problems never abort compilation. They are collected as
//! [`ContentError`](lectern_core::ContentError)s in
//! [`ProcessResult::errors`] and the rest of the content is still produced.

#![forbid(unsafe_code)]

pub mod bundle;
pub mod documents;
pub mod flatten;
pub mod lookup;
pub mod model;
pub mod process;

pub use flatten::{FlattenOutcome, flatten_module};
pub use lookup::{ContentLookup, ContentStore};
pub use model::{
    Course, FlatModule, FlatSection, LensArticleSection, LensVideoSection, PageSection, ProcessResult,
    ProgressionItem, Segment,
};
pub use process::process_content;
