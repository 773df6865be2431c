//! Caption cues

use crate::error::SkipReason;
use crate::timestamp::Timestamp;

/// Outcome of parsing one SRT block or one ASS dialogue row
pub type CueOutcome = std::result::Result<Cue, SkipReason>;

/// A single caption with timing and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start of the cue
    pub start: Timestamp,
    /// End of the cue
    pub end: Timestamp,
    /// Cue settings following the end timestamp on the timing line
    pub settings: Option<String>,
    /// Source timing line, emitted in place of the rendered one
    pub timing_text: Option<String>,
    /// Text lines, in display order (never empty)
    pub lines: Vec<String>,
}

impl Cue {
    /// Create a new cue without settings
    pub fn new(start: Timestamp, end: Timestamp, lines: Vec<String>) -> Self {
        Self {
            start,
            end,
            settings: None,
            timing_text: None,
            lines,
        }
    }

    /// Attach cue settings (e.g. `align:start`)
    pub fn with_settings(mut self, settings: impl Into<String>) -> Self {
        let settings = settings.into();
        self.settings = (!settings.is_empty()).then_some(settings);
        self
    }

    /// Keep the source timing line byte for byte
    pub fn with_timing_text(mut self, timing: impl Into<String>) -> Self {
        self.timing_text = Some(timing.into());
        self
    }

    /// The `start --> end` line of the cue
    pub fn timing_line(&self) -> String {
        if let Some(timing) = &self.timing_text {
            return timing.clone();
        }
        match &self.settings {
            Some(settings) => format!("{} --> {} {}", self.start, self.end, settings),
            None => format!("{} --> {}", self.start, self.end),
        }
    }

    /// Duration in milliseconds, when both ends are exact
    pub fn duration_ms(&self) -> Option<i64> {
        let start = self.start.as_millis()? as i64;
        let end = self.end.as_millis()? as i64;
        Some(end - start)
    }
}
