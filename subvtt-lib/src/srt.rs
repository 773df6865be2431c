//! SubRip (SRT) parsing
//!
//! An SRT document is a sequence of blocks separated by blank lines:
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:02,500
//! Hello
//! ```
//!
//! The index line is never needed: the first line holding both `-->` and a
//! comma is the timing line, and everything after it is cue text. The timing
//! line is emitted as written, with every comma turned into a period.

use crate::cue::{Cue, CueOutcome};
use crate::error::SkipReason;
use crate::timestamp::Timestamp;

/// Parse every block of an SRT document, in source order.
///
/// One outcome is returned per block; blocks that cannot form a cue yield
/// the reason they were skipped.
pub fn parse_cues(text: &str) -> Vec<CueOutcome> {
    let normalized = normalize_line_endings(text);
    blocks(&normalized).iter().map(|block| parse_block(block)).collect()
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Group lines into blocks separated by one or more blank lines
fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Turn one block into a cue
fn parse_block(lines: &[&str]) -> CueOutcome {
    if lines.len() < 2 {
        return Err(SkipReason::TooFewLines);
    }

    let timing_index = lines
        .iter()
        .position(|line| line.contains("-->") && line.contains(','))
        .ok_or(SkipReason::MissingTimingLine)?;

    let text: Vec<String> = lines[timing_index + 1..]
        .iter()
        .map(|line| line.to_string())
        .collect();
    if text.is_empty() {
        return Err(SkipReason::EmptyText);
    }

    Ok(parse_timing_line(&lines[timing_index].replace(',', "."), text))
}

/// Split a rewritten timing line into start, end and trailing settings.
///
/// The parsed parts only feed cue statistics; output uses the line itself.
fn parse_timing_line(timing: &str, lines: Vec<String>) -> Cue {
    let (left, right) = timing.split_once("-->").unwrap_or((timing, ""));
    let right = right.trim();
    let (end, settings) = match right.split_once(char::is_whitespace) {
        Some((end, settings)) => (end, settings.trim_start()),
        None => (right, ""),
    };

    Cue::new(
        Timestamp::from_webvtt(left.trim()),
        Timestamp::from_webvtt(end),
        lines,
    )
    .with_settings(settings)
    .with_timing_text(timing)
}
