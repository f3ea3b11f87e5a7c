//! Timestamps and transcript slicing.

use crate::documents::Cue;

/// Why a video excerpt could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// The token is not `M:SS`, `MM:SS` or `H:MM:SS`.
    #[error("Invalid timestamp '{token}'")]
    Invalid {
        /// Offending token
        token: String,
    },

    /// No transcript cue starts inside the requested span.
    #[error("Timestamp {from} not found in transcript")]
    NotFound {
        /// Start of the span, as written
        from: String,
    },

    /// The end of the span is not after its start.
    #[error("Video excerpt ends at {to}, before it starts at {from} (wrong order)")]
    WrongOrder {
        /// Start, as written
        from: String,
        /// End, as written
        to: String,
    },
}

impl TimestampError {
    /// Suggested fix for the author.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "Write timestamps as M:SS, MM:SS or H:MM:SS, for example 1:30 or 1:05:30",
            Self::NotFound { .. } => "Pick a 'from::' timestamp that lies within the transcript",
            Self::WrongOrder { .. } => "Make 'to::' later than 'from::' or remove it",
        }
    }
}

/// Parse a timestamp into seconds.
///
/// Accepts `M:SS`, `MM:SS`, and `H:MM:SS`; minutes and seconds after the
/// leading component must be below 60.
///
/// # Example
///
/// ```rust
/// use lectern_compiler::bundle::video::parse_timestamp;
///
/// assert_eq!(parse_timestamp("1:30").unwrap(), 90);
/// assert_eq!(parse_timestamp("1:30:00").unwrap(), 5400);
/// assert!(parse_timestamp("90").is_err());
/// ```
pub fn parse_timestamp(token: &str) -> Result<u32, TimestampError> {
    let invalid = || TimestampError::Invalid {
        token: token.to_string(),
    };
    let parts: Vec<&str> = token.trim().split(':').collect();

    let number = |part: &str, max_len: usize| -> Option<u32> {
        if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };
    let sixty = |part: &str| number(part, 2).filter(|n| part.len() == 2 && *n < 60);

    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes = number(minutes, 2).ok_or_else(invalid)?;
            let seconds = sixty(seconds).ok_or_else(invalid)?;
            Ok(minutes * 60 + seconds)
        }
        [hours, minutes, seconds] => {
            let hours = number(hours, 2).ok_or_else(invalid)?;
            let minutes = sixty(minutes).ok_or_else(invalid)?;
            let seconds = sixty(seconds).ok_or_else(invalid)?;
            Ok(hours * 3600 + minutes * 60 + seconds)
        }
        _ => Err(invalid()),
    }
}

/// Render seconds as `M:SS` or `H:MM:SS`.
pub fn format_timestamp(seconds: u32) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Join the text of cues starting in `[from, to)`.
///
/// `to == None` runs to the end of the transcript.
pub fn slice_transcript(cues: &[Cue], from: u32, to: Option<u32>) -> Result<String, TimestampError> {
    if let Some(to) = to {
        if to <= from {
            return Err(TimestampError::WrongOrder {
                from: format_timestamp(from),
                to: format_timestamp(to),
            });
        }
    }

    let texts: Vec<&str> = cues
        .iter()
        .filter(|cue| cue.start >= from && to.is_none_or(|to| cue.start < to))
        .map(|cue| cue.text.as_str())
        .filter(|text| !text.is_empty())
        .collect();

    if texts.is_empty() {
        return Err(TimestampError::NotFound {
            from: format_timestamp(from),
        });
    }
    Ok(texts.join(" "))
}

// ============================================================================
// Tests
// ============================================================================
