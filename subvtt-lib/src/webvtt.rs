//! WebVTT output
//!
//! The document is assembled once from a flat list of fragments (header,
//! blank line, then timing line, text lines and a blank line per cue)
//! joined with newlines. It is never patched afterwards.

use serde::Serialize;
use std::fmt;

use crate::cue::Cue;

/// Required first line of every WebVTT document
pub const WEBVTT_HEADER: &str = "WEBVTT";

/// A complete WebVTT document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebVttDocument {
    text: String,
    cue_count: usize,
}

impl WebVttDocument {
    /// The minimal valid document: header and a blank line, no cues
    pub fn empty() -> Self {
        Self {
            text: format!("{}\n\n", WEBVTT_HEADER),
            cue_count: 0,
        }
    }

    /// Emit cues in iteration order
    pub fn from_cues<'a, I>(cues: I) -> Self
    where
        I: IntoIterator<Item = &'a Cue>,
    {
        let mut fragments = vec![WEBVTT_HEADER.to_string(), String::new()];
        let mut cue_count = 0;

        for cue in cues {
            fragments.push(cue.timing_line());
            fragments.extend(cue.lines.iter().cloned());
            fragments.push(String::new());
            cue_count += 1;
        }

        if cue_count == 0 {
            return Self::empty();
        }

        Self {
            text: fragments.join("\n"),
            cue_count,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of cues in the document
    pub fn cue_count(&self) -> usize {
        self.cue_count
    }

    /// True when the document carries no cues
    pub fn is_header_only(&self) -> bool {
        self.cue_count == 0
    }

    /// Size of the document in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for WebVttDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for WebVttDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for WebVttDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<WebVttDocument> for String {
    fn from(doc: WebVttDocument) -> Self {
        doc.text
    }
}

/// Summary of the cues in a document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CueStats {
    /// Number of cues
    pub cue_count: usize,
    /// Start of the first cue in seconds, when it is an exact timestamp
    pub first_cue_start: Option<f64>,
    /// End of the last cue in seconds, when it is an exact timestamp
    pub last_cue_end: Option<f64>,
}

impl CueStats {
    pub fn from_cues(cues: &[Cue]) -> Self {
        Self {
            cue_count: cues.len(),
            first_cue_start: cues.first().and_then(|cue| cue.start.as_seconds()),
            last_cue_end: cues.last().and_then(|cue| cue.end.as_seconds()),
        }
    }
}
