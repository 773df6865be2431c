//! Subtitle format detection
//!
//! Detection is a cheap substring scan, not a grammar check: any of the
//! ASS section markers routes the document to the ASS parser, everything
//! else is treated as SRT.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SubtitleError;

/// Section headers that only occur in ASS/SSA scripts
const ASS_MARKERS: [&str; 3] = ["[Script Info]", "[V4+ Styles]", "[Events]"];

/// Source subtitle format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// SubRip
    Srt,
    /// Advanced SubStation Alpha / SubStation Alpha
    Ass,
    /// Not declared; sniffed from the content
    #[default]
    Unknown,
}

impl SubtitleFormat {
    /// Short lowercase name, as used in hints and response headers
    pub fn name(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Ass => "ass",
            SubtitleFormat::Unknown => "unknown",
        }
    }

    /// Resolve a declared format against the document text.
    ///
    /// A declared SRT or ASS format wins; `Unknown` falls back to detection.
    /// The result is never `Unknown`.
    pub fn resolve(self, text: &str) -> SubtitleFormat {
        match self {
            SubtitleFormat::Unknown => detect_format(text),
            declared => declared,
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srt" | "subrip" => Ok(SubtitleFormat::Srt),
            "ass" | "ssa" => Ok(SubtitleFormat::Ass),
            "" | "auto" | "unknown" => Ok(SubtitleFormat::Unknown),
            _ => Err(SubtitleError::UnknownFormat(s.to_string())),
        }
    }
}

/// Classify raw subtitle text as ASS or SRT. Never returns `Unknown`.
pub fn detect_format(text: &str) -> SubtitleFormat {
    if ASS_MARKERS.iter().any(|marker| text.contains(marker)) {
        SubtitleFormat::Ass
    } else {
        SubtitleFormat::Srt
    }
}
