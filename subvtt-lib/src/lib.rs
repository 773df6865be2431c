//! Subtitle conversion library
//!
//! Turns SubRip (SRT) and Advanced SubStation Alpha (ASS/SSA) documents into
//! WebVTT for browser-based players:
//! - Format detection (ASS section markers, SRT fallback)
//! - SRT block parsing with comma-to-period timestamp rewriting
//! - ASS `[Events]` parsing through the declared `Format:` schema
//! - Override tag stripping and `\N` line-break expansion
//! - Single-pass WebVTT emission
//!
//! Conversion never fails. Malformed blocks and rows are skipped, and the
//! reason for each skip is available through [`ConversionReport`].

pub mod ass;
pub(crate) mod convert;
pub(crate) mod cue;
pub(crate) mod error;
pub(crate) mod format;
pub mod srt;
pub(crate) mod timestamp;
pub(crate) mod webvtt;

#[cfg(test)]
pub(crate) mod tests;

pub use convert::{convert, convert_as, ConversionReport, SkippedItem, SubtitleDocument};
pub use cue::{Cue, CueOutcome};
pub use error::{Result, SkipReason, SubtitleError};
pub use format::{detect_format, SubtitleFormat};
pub use timestamp::Timestamp;
pub use webvtt::{CueStats, WebVttDocument, WEBVTT_HEADER};

// helper.
macro_rules! lazy_regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<::regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| ::regex::Regex::new($re).unwrap())
    }};
}
pub(crate) use lazy_regex;
