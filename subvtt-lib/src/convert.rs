//! Conversion entry points
//!
//! Detects the source format, dispatches to the SRT or ASS parser and emits
//! the WebVTT document. Conversion is pure and synchronous: no I/O, no shared
//! state, safe to call from any number of threads at once.

use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

use crate::cue::CueOutcome;
use crate::error::SkipReason;
use crate::format::SubtitleFormat;
use crate::webvtt::{CueStats, WebVttDocument};
use crate::{ass, srt};

/// UTF-8 byte order mark
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Convert subtitle text to WebVTT, detecting the format from the content
pub fn convert(raw: &str) -> WebVttDocument {
    SubtitleDocument::new(raw).to_webvtt()
}

/// Convert subtitle text to WebVTT using a declared format.
///
/// `SubtitleFormat::Unknown` behaves like [`convert`].
pub fn convert_as(raw: &str, format: SubtitleFormat) -> WebVttDocument {
    SubtitleDocument::new(raw).with_format(format).to_webvtt()
}

/// Raw subtitle text plus its declared format
#[derive(Debug, Clone)]
pub struct SubtitleDocument<'a> {
    text: Cow<'a, str>,
    format: SubtitleFormat,
}

impl<'a> SubtitleDocument<'a> {
    /// Wrap subtitle text whose format is not declared
    pub fn new(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            format: SubtitleFormat::Unknown,
        }
    }

    /// Decode subtitle bytes as UTF-8.
    ///
    /// A leading byte order mark is dropped and invalid sequences become
    /// U+FFFD, so decoding never fails.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        Self::new(String::from_utf8_lossy(bytes))
    }

    /// Declare the source format instead of detecting it
    pub fn with_format(mut self, format: SubtitleFormat) -> Self {
        self.format = format;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The format as declared, possibly `Unknown`
    pub fn declared_format(&self) -> SubtitleFormat {
        self.format
    }

    /// The format the document will be parsed as
    pub fn format(&self) -> SubtitleFormat {
        self.format.resolve(&self.text)
    }

    /// Convert to WebVTT
    pub fn to_webvtt(&self) -> WebVttDocument {
        self.convert_with_report().0
    }

    /// Convert to WebVTT and describe what was kept and skipped
    pub fn convert_with_report(&self) -> (WebVttDocument, ConversionReport) {
        let format = self.format();

        if self.text.trim().is_empty() {
            return (WebVttDocument::empty(), ConversionReport::empty(format));
        }

        let outcomes: Vec<(usize, CueOutcome)> = match format {
            SubtitleFormat::Ass => ass::parse_cues(&self.text),
            _ => srt::parse_cues(&self.text)
                .into_iter()
                .enumerate()
                .map(|(index, outcome)| (index + 1, outcome))
                .collect(),
        };

        let mut cues = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for (location, outcome) in outcomes {
            match outcome {
                Ok(cue) => cues.push(cue),
                Err(reason) => {
                    debug!("Skipping {} item at {}: {}", format, location, reason);
                    skipped.push(SkippedItem { location, reason });
                }
            }
        }

        let document = WebVttDocument::from_cues(&cues);
        let report = ConversionReport {
            format,
            stats: CueStats::from_cues(&cues),
            skipped,
        };

        debug!(
            "Converted {} document: {} cues, {} skipped, {} bytes",
            format,
            report.cue_count(),
            report.skipped_count(),
            document.len()
        );

        (document, report)
    }
}

/// A block or row that did not become a cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    /// 1-based block number (SRT) or line number (ASS)
    pub location: usize,
    pub reason: SkipReason,
}

/// What a conversion produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Format the document was parsed as
    pub format: SubtitleFormat,
    #[serde(flatten)]
    pub stats: CueStats,
    pub skipped: Vec<SkippedItem>,
}

impl ConversionReport {
    fn empty(format: SubtitleFormat) -> Self {
        Self {
            format,
            stats: CueStats::default(),
            skipped: Vec::new(),
        }
    }

    pub fn cue_count(&self) -> usize {
        self.stats.cue_count
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
