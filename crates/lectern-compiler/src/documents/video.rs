//! Video transcript documents.
//!
//! The header identifies the video; the body is a timestamped transcript,
//! one cue per line:
//!
//! ```markdown
//! ---
//! title: Intro to AI Safety
//! channel: Rob Miles
//! url: https://www.youtube.com/watch?v=pYXy-A4siMw
//! ---
//!
//! 0:00 Hi.
//! 0:04 Today we talk about safety.
//! [1:02:03] Much later.
//! ```
//!
//! Lines without a timestamp continue the previous cue.

use std::sync::LazyLock;

use lectern_core::{ContentError, Diagnostics};
use regex::Regex;

use super::{ParseOutcome, read_header};
use crate::bundle::video::parse_timestamp;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|youtu\.be/|embed/|shorts/)([A-Za-z0-9_-]{11})").expect("Invalid video id regex")
});

static CUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?(\d{1,2}:\d{2}(?::\d{2})?)\]?\s*(?:-\s*)?(.*)$").expect("Invalid cue regex")
});

/// A parsed video transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTranscript {
    /// Video title, if given.
    pub title: Option<String>,
    /// Channel, if given.
    pub channel: Option<String>,
    /// Video id, from `video_id` or extracted from `url`.
    pub video_id: String,
    /// Cues in transcript order.
    pub cues: Vec<Cue>,
}

/// One timestamped transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start time in seconds.
    pub start: u32,
    /// Spoken text.
    pub text: String,
}

/// Parse a video transcript document.
///
/// The value is `None` when the header is unreadable or the video id
/// cannot be determined.
pub fn parse_video_transcript(text: &str, file: &str) -> ParseOutcome<VideoTranscript> {
    let mut diagnostics = Diagnostics::new();
    let Some(header) = read_header(text, file, &mut diagnostics) else {
        return ParseOutcome::new(None, diagnostics);
    };

    let video_id = header.get_string("video_id").or_else(|| {
        header
            .get_string("url")
            .and_then(|url| VIDEO_ID_RE.captures(&url).map(|c| c[1].to_string()))
    });
    if video_id.is_none() {
        diagnostics.push(
            ContentError::error(file, "Video transcript has no video id")
                .at_line(1)
                .with_suggestion("Add 'video_id: ...' or a YouTube 'url: ...' to the header"),
        );
    }

    let cues = parse_cues(header.body(), header.body_line(), file, &mut diagnostics);
    if cues.is_empty() {
        diagnostics.push(
            ContentError::warning(file, "Video transcript has no timestamped lines")
                .at_line(header.body_line())
                .with_suggestion("Start transcript lines with a timestamp such as '0:00'"),
        );
    }

    let transcript = video_id.map(|video_id| VideoTranscript {
        title: header.get_string("title"),
        channel: header.get_string("channel"),
        video_id,
        cues,
    });
    ParseOutcome::new(transcript, diagnostics)
}

fn parse_cues(body: &str, body_line: usize, file: &str, diagnostics: &mut Diagnostics) -> Vec<Cue> {
    let mut cues: Vec<Cue> = Vec::new();

    for (offset, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(caps) = CUE_RE.captures(line) else {
            match cues.last_mut() {
                Some(cue) => {
                    if !cue.text.is_empty() {
                        cue.text.push(' ');
                    }
                    cue.text.push_str(line);
                }
                None => log::debug!("{file}: ignoring transcript text before the first timestamp"),
            }
            continue;
        };

        match parse_timestamp(&caps[1]) {
            Ok(start) => {
                if cues.last().is_some_and(|prev| start < prev.start) {
                    diagnostics.push(
                        ContentError::warning(file, format!("Timestamp {} is earlier than the previous line", &caps[1]))
                            .at_line(body_line + offset),
                    );
                }
                cues.push(Cue {
                    start,
                    text: caps[2].trim().to_string(),
                });
            }
            Err(e) => diagnostics.push(ContentError::error(file, e.to_string()).at_line(body_line + offset)),
        }
    }

    cues
}
