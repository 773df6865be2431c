//! Cue timestamps
//!
//! WebVTT timestamps are `HH:MM:SS.mmm`. Source timestamps that normalize to
//! exactly that form are held as a millisecond offset; anything else is kept
//! verbatim so it is re-emitted byte for byte.

use std::fmt;

use crate::lazy_regex;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Offset into the media at which a cue starts or ends
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// Canonical timestamp, in milliseconds
    Exact(u64),
    /// Text that does not normalize to the canonical form
    Verbatim(String),
}

impl Timestamp {
    /// Create an exact timestamp from a millisecond offset
    pub fn from_millis(ms: u64) -> Self {
        Timestamp::Exact(ms)
    }

    /// Interpret text already in WebVTT notation.
    ///
    /// Only text that would be rendered back identically becomes `Exact`, so
    /// odd digit counts or out-of-range minutes survive untouched.
    pub fn from_webvtt(text: &str) -> Self {
        let exact = lazy_regex!(r"^([0-9]{2,}):([0-9]{2}):([0-9]{2})\.([0-9]{3})$")
            .captures(text)
            .and_then(|caps| {
                let hours: u64 = caps[1].parse().ok()?;
                let minutes: u64 = caps[2].parse().ok()?;
                let seconds: u64 = caps[3].parse().ok()?;
                let millis: u64 = caps[4].parse().ok()?;
                if minutes >= 60 || seconds >= 60 {
                    return None;
                }
                hours
                    .checked_mul(MS_PER_HOUR)?
                    .checked_add(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
            })
            .map(Timestamp::Exact)
            .filter(|ts| ts.to_string() == text);

        exact.unwrap_or_else(|| Timestamp::Verbatim(text.to_string()))
    }

    /// Convert an ASS timestamp (`H:MM:SS.cc`) to WebVTT notation.
    ///
    /// Hours are zero-padded to two digits and the centiseconds get a
    /// trailing `0`. The pattern is matched at the start of the field only;
    /// a field that does not match is passed through unchanged.
    pub fn from_ass(text: &str) -> Self {
        let Some(caps) = lazy_regex!(r"^([0-9]+):([0-9]{2}):([0-9]{2})\.([0-9]{2})").captures(text)
        else {
            return Timestamp::Verbatim(text.to_string());
        };
        match caps[1].parse::<u64>() {
            Ok(hours) => Self::from_webvtt(&format!(
                "{:02}:{}:{}.{}0",
                hours, &caps[2], &caps[3], &caps[4]
            )),
            Err(_) => Timestamp::Verbatim(text.to_string()),
        }
    }

    /// Offset in milliseconds, if the timestamp is exact
    pub fn as_millis(&self) -> Option<u64> {
        match self {
            Timestamp::Exact(ms) => Some(*ms),
            Timestamp::Verbatim(_) => None,
        }
    }

    /// Offset in seconds, if the timestamp is exact
    pub fn as_seconds(&self) -> Option<f64> {
        self.as_millis().map(|ms| ms as f64 / 1000.0)
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Timestamp::Exact(_))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Exact(ms) => write!(
                f,
                "{:02}:{:02}:{:02}.{:03}",
                ms / MS_PER_HOUR,
                (ms % MS_PER_HOUR) / MS_PER_MINUTE,
                (ms % MS_PER_MINUTE) / MS_PER_SECOND,
                ms % MS_PER_SECOND
            ),
            Timestamp::Verbatim(text) => f.write_str(text),
        }
    }
}
