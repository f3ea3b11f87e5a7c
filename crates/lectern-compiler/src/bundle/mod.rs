//! Resolve a lens section's segments against its source document.
//!
//! Text and chat segments pass through unchanged. Article excerpts are cut
//! from the article by anchor phrase and annotated with the text they skip;
//! video excerpts are mapped to seconds and paired with their transcript.
//!
//! Every excerpt of a section is checked before any is produced, so one
//! call reports all of a section's problems at once.

pub mod article;
pub mod video;

use lectern_core::{ContentError, Diagnostics};

use crate::documents::{Article, SegmentSource, VideoTranscript};
use crate::model::Segment;

use self::article::{collapsed_context, locate_excerpt};
use self::video::{parse_timestamp, slice_transcript};

/// Bundle the segments of an article lens section.
///
/// Diagnostics point at `lens_file`, the document that holds the anchors.
pub fn bundle_article(
    segments: &[SegmentSource],
    article: &Article,
    lens_file: &str,
) -> Result<Vec<Segment>, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let mut ranges = Vec::new();

    for segment in segments {
        if let SegmentSource::ArticleExcerpt { from, to, line } = segment {
            match locate_excerpt(&article.body, from.as_deref(), to.as_deref()) {
                Ok(range) => ranges.push(range),
                Err(e) => diagnostics.push(
                    ContentError::error(lens_file, e.to_string())
                        .at_line(*line)
                        .with_suggestion(e.suggestion()),
                ),
            }
        }
    }
    if diagnostics.has_errors() {
        return Err(diagnostics);
    }

    let mut context = collapsed_context(&article.body, &ranges).into_iter();
    let mut ranges = ranges.into_iter();
    let bundled = segments
        .iter()
        .filter_map(|segment| match segment {
            SegmentSource::ArticleExcerpt { .. } => {
                let range = ranges.next()?;
                let context = context.next().unwrap_or_default();
                Some(Segment::ArticleExcerpt {
                    content: article.body[range].to_string(),
                    collapsed_before: context.before,
                    collapsed_after: context.after,
                })
            }
            other => passthrough(other),
        })
        .collect();
    Ok(bundled)
}

/// Bundle the segments of a video lens section.
pub fn bundle_video(
    segments: &[SegmentSource],
    video: &VideoTranscript,
    lens_file: &str,
) -> Result<Vec<Segment>, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let mut bundled = Vec::with_capacity(segments.len());

    for segment in segments {
        let SegmentSource::VideoExcerpt { from, to, line } = segment else {
            bundled.extend(passthrough(segment));
            continue;
        };

        let resolved = parse_timestamp(from).and_then(|start| {
            let end = to.as_deref().map(parse_timestamp).transpose()?;
            let transcript = slice_transcript(&video.cues, start, end)?;
            Ok(Segment::VideoExcerpt {
                from: start,
                to: end,
                transcript,
            })
        });
        match resolved {
            Ok(segment) => bundled.push(segment),
            Err(e) => diagnostics.push(
                ContentError::error(lens_file, e.to_string())
                    .at_line(*line)
                    .with_suggestion(e.suggestion()),
            ),
        }
    }

    if diagnostics.has_errors() {
        Err(diagnostics)
    } else {
        Ok(bundled)
    }
}

fn passthrough(segment: &SegmentSource) -> Option<Segment> {
    match segment {
        SegmentSource::Text { content } => Some(Segment::Text {
            content: content.clone(),
        }),
        SegmentSource::Chat { instructions } => Some(Segment::Chat {
            instructions: instructions.clone(),
        }),
        SegmentSource::ArticleExcerpt { line, .. } | SegmentSource::VideoExcerpt { line, .. } => {
            log::warn!("Skipping excerpt at line {line}: it does not match the section's source");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
