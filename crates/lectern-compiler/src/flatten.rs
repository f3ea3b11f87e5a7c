//! Module flattening.
//!
//! Expands a parsed module into delivery sections: pages pass through,
//! learning outcome references expand into one section per lens, and
//! uncategorized blocks expand their lenses directly.
//!
//! Failure is graded. A learning outcome or lens that cannot be resolved,
//! a lens without exactly one article or video section, or a missing
//! article or transcript fails the whole module. An excerpt that cannot be
//! located only drops the section that contains it.

use lectern_core::{ContentError, Diagnostics};

use crate::bundle::{bundle_article, bundle_video};
use crate::documents::{LensReference, Module, ModuleSection, SegmentSource, TerminalKind};
use crate::lookup::ContentLookup;
use crate::model::{FlatSection, LensArticleSection, LensVideoSection, PageSection, Segment};

/// Result of flattening one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenOutcome {
    /// Flattened sections; empty when `error` is set.
    pub sections: Vec<FlatSection>,
    /// Why the module failed as a whole.
    pub error: Option<String>,
    /// Every problem found, including dropped sections.
    pub diagnostics: Diagnostics,
}

struct ModuleFailure {
    message: String,
    line: usize,
    suggestion: &'static str,
}

/// Flatten `module` (parsed from `file`), resolving references through
/// `lookup`.
pub fn flatten_module<L>(module: &Module, file: &str, lookup: &L) -> FlattenOutcome
where
    L: ContentLookup + ?Sized,
{
    let mut flattener = Flattener {
        file,
        lookup,
        diagnostics: Diagnostics::new(),
    };

    match flattener.run(module) {
        Ok(sections) => FlattenOutcome {
            sections,
            error: None,
            diagnostics: flattener.diagnostics,
        },
        Err(failure) => {
            log::debug!("{file}: module failed: {}", failure.message);
            let mut diagnostics = flattener.diagnostics;
            diagnostics.push(
                ContentError::error(file, failure.message.clone())
                    .at_line(failure.line)
                    .with_suggestion(failure.suggestion),
            );
            FlattenOutcome {
                sections: Vec::new(),
                error: Some(failure.message),
                diagnostics,
            }
        }
    }
}

struct Flattener<'a, L: ?Sized> {
    file: &'a str,
    lookup: &'a L,
    diagnostics: Diagnostics,
}

impl<L: ContentLookup + ?Sized> Flattener<'_, L> {
    fn run(&mut self, module: &Module) -> Result<Vec<FlatSection>, ModuleFailure> {
        let lookup = self.lookup;
        let mut sections = Vec::new();

        for section in &module.sections {
            match section {
                ModuleSection::Page {
                    title,
                    content_id,
                    segments,
                    ..
                } => sections.push(FlatSection::Page(PageSection {
                    content_id: content_id.clone(),
                    learning_outcome_id: None,
                    title: title.clone(),
                    optional: false,
                    segments: segments.iter().filter_map(page_segment).collect(),
                })),
                ModuleSection::LearningOutcome {
                    source,
                    optional,
                    line,
                    ..
                } => {
                    let source = source.as_deref().map_err(|reason| ModuleFailure {
                        message: reason.clone(),
                        line: *line,
                        suggestion: "Point 'source::' at a file in the learning outcomes directory",
                    })?;
                    let outcome = lookup.learning_outcome(source).ok_or_else(|| ModuleFailure {
                        message: format!("Learning outcome '{source}' not found or invalid"),
                        line: *line,
                        suggestion: "Check the 'source::' link and fix any errors reported for that file",
                    })?;
                    for lens in &outcome.lenses {
                        sections.extend(self.expand_lens(lens, Some(outcome.id.as_str()), *optional, *line)?);
                    }
                }
                ModuleSection::Uncategorized { lenses, line, .. } => {
                    for lens in lenses {
                        sections.extend(self.expand_lens(lens, None, false, *line)?);
                    }
                }
            }
        }

        Ok(sections)
    }

    /// Expand one lens reference. `Ok(None)` means the section was dropped
    /// because its excerpts could not be bundled.
    fn expand_lens(
        &mut self,
        reference: &LensReference,
        learning_outcome_id: Option<&str>,
        inherited_optional: bool,
        module_line: usize,
    ) -> Result<Option<FlatSection>, ModuleFailure> {
        let lookup = self.lookup;
        let fail = |message: String| ModuleFailure {
            message,
            line: module_line,
            suggestion: "Check the referenced files and fix any errors reported for them",
        };
        let path = reference.source.as_deref().map_err(|reason| fail(reason.clone()))?;

        let lens = lookup
            .lens(path)
            .ok_or_else(|| fail(format!("Lens '{path}' not found or invalid")))?;
        let section = lens.terminal().map_err(|count| {
            fail(format!(
                "Lens '{path}' must contain exactly one article or video section, found {count}"
            ))
        })?;
        let source = section
            .source
            .as_deref()
            .ok_or_else(|| fail(format!("Lens '{path}' has no valid {} source", section.kind)))?;

        let optional = inherited_optional || reference.optional;
        let content_id = Some(lens.id.clone());
        let learning_outcome_id = learning_outcome_id.map(String::from);

        let flat = match section.kind {
            TerminalKind::Article => {
                let article = lookup
                    .article(source)
                    .ok_or_else(|| fail(format!("Article '{source}' not found or invalid")))?;
                let segments = match bundle_article(&section.segments, article, path) {
                    Ok(segments) => segments,
                    Err(diagnostics) => return Ok(self.drop_section(path, diagnostics)),
                };
                FlatSection::LensArticle(LensArticleSection {
                    content_id,
                    learning_outcome_id,
                    title: title_or(&section.title, article.title.as_deref()),
                    optional,
                    author: article.author.clone(),
                    source_url: article.source_url.clone(),
                    segments,
                })
            }
            TerminalKind::Video => {
                let video = lookup
                    .video(source)
                    .ok_or_else(|| fail(format!("Video transcript '{source}' not found or invalid")))?;
                let segments = match bundle_video(&section.segments, video, path) {
                    Ok(segments) => segments,
                    Err(diagnostics) => return Ok(self.drop_section(path, diagnostics)),
                };
                FlatSection::LensVideo(LensVideoSection {
                    content_id,
                    learning_outcome_id,
                    title: title_or(&section.title, video.title.as_deref()),
                    optional,
                    video_id: video.video_id.clone(),
                    channel: video.channel.clone(),
                    segments,
                })
            }
        };
        Ok(Some(flat))
    }

    fn drop_section(&mut self, lens: &str, diagnostics: Diagnostics) -> Option<FlatSection> {
        log::debug!(
            "{}: dropping section for '{lens}' after {} excerpt error(s)",
            self.file,
            diagnostics.error_count()
        );
        self.diagnostics.extend(diagnostics);
        None
    }
}

fn page_segment(segment: &SegmentSource) -> Option<Segment> {
    match segment {
        SegmentSource::Text { content } => Some(Segment::Text {
            content: content.clone(),
        }),
        SegmentSource::Chat { instructions } => Some(Segment::Chat {
            instructions: instructions.clone(),
        }),
        SegmentSource::ArticleExcerpt { .. } | SegmentSource::VideoExcerpt { .. } => None,
    }
}

fn title_or(title: &str, fallback: Option<&str>) -> String {
    if title.is_empty() {
        fallback.unwrap_or_default().to_string()
    } else {
        title.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
