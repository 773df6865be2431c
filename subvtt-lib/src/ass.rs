//! Advanced SubStation Alpha (ASS/SSA) parsing
//!
//! Only the first `[Events]` section is consulted. Its `Format:` line
//! declares the column layout of the `Dialogue:` rows that follow:
//!
//! ```text
//! [Events]
//! Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
//! Dialogue: 0,0:00:01.50,0:00:02.75,Default,,0,0,0,,Hello {\i1}world{\i0}
//! ```
//!
//! Styling and positioning are dropped; only timing and text survive.

use std::ops::ControlFlow;

use crate::cue::{Cue, CueOutcome};
use crate::error::SkipReason;
use crate::lazy_regex;
use crate::timestamp::Timestamp;

/// Column layout declared by the `Format:` line of an `[Events]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssEventSchema {
    /// Lowercased column names, in declaration order
    columns: Vec<String>,
}

impl AssEventSchema {
    /// Parse the part of a `Format:` line after the prefix
    pub fn parse(spec: &str) -> Self {
        Self {
            columns: spec
                .trim()
                .split(',')
                .map(|column| column.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Map the part of a `Dialogue:` line after the prefix onto this schema.
    ///
    /// The row is split into at most `len()` fields, so the last column
    /// (normally `Text`) keeps any commas of its own.
    pub fn map_row(&self, row: &str) -> CueOutcome {
        let fields: Vec<&str> = row.splitn(self.len().max(1), ',').collect();
        if fields.len() < self.len() {
            return Err(SkipReason::TooFewFields {
                expected: self.len(),
                found: fields.len(),
            });
        }

        // Later duplicates of a column name win. Values are trimmed, so a
        // padded timestamp such as ` 0:00:01.50` still converts.
        let field = |name: &'static str| {
            self.columns
                .iter()
                .rposition(|column| column == name)
                .map(|i| fields[i].trim())
                .filter(|value| !value.is_empty())
                .ok_or(SkipReason::MissingField { field: name })
        };

        let start = field("start")?;
        let end = field("end")?;
        let lines = clean_text(field("text")?);
        if lines.is_empty() {
            return Err(SkipReason::EmptyText);
        }

        Ok(Cue::new(Timestamp::from_ass(start), Timestamp::from_ass(end), lines))
    }
}

/// Parse the dialogue rows of an ASS/SSA script.
///
/// Returns one outcome per `Dialogue:` row in the first `[Events]` section,
/// paired with its 1-based line number.
pub fn parse_cues(text: &str) -> Vec<(usize, CueOutcome)> {
    let folded = text
        .split('\n')
        .enumerate()
        .try_fold(EventsFold::default(), |fold, (index, line)| {
            fold.step(index + 1, line.trim())
        });

    match folded {
        ControlFlow::Continue(fold) | ControlFlow::Break(fold) => fold.outcomes,
    }
}

/// Accumulator for the line-by-line scan
#[derive(Debug, Default)]
struct EventsFold {
    in_events: bool,
    schema: Option<AssEventSchema>,
    outcomes: Vec<(usize, CueOutcome)>,
}

impl EventsFold {
    fn step(mut self, line_no: usize, line: &str) -> ControlFlow<Self, Self> {
        if is_section_header(line) {
            self.schema = None;
            if line.eq_ignore_ascii_case("[events]") {
                self.in_events = true;
            } else if self.in_events {
                return ControlFlow::Break(self);
            }
            return ControlFlow::Continue(self);
        }

        if !self.in_events {
            return ControlFlow::Continue(self);
        }

        if let Some(spec) = strip_prefix_ignore_case(line, "format:") {
            self.schema = Some(AssEventSchema::parse(spec));
        } else if let Some(row) = strip_prefix_ignore_case(line, "dialogue:") {
            let outcome = match &self.schema {
                Some(schema) => schema.map_row(row),
                None => Err(SkipReason::MissingSchema),
            };
            self.outcomes.push((line_no, outcome));
        }

        ControlFlow::Continue(self)
    }
}

/// A line opening with `[` starts a section, closing bracket or not
fn is_section_header(line: &str) -> bool {
    line.starts_with('[')
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &line[prefix.len()..])
}

/// Strip override tags and expand line-break escapes.
///
/// `{...}` spans are removed without nesting support; an unmatched brace is
/// left as text. Blank lines are dropped since they would end the cue.
fn clean_text(text: &str) -> Vec<String> {
    let stripped = lazy_regex!(r"\{[^}]*\}").replace_all(text, "");
    let expanded = stripped
        .replace("\\N", "\n")
        .replace("\\n", "\n")
        .replace("\\h", "\u{a0}");

    expanded
        .trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_FORMAT: &str =
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

    fn cues(text: &str) -> Vec<Cue> {
        parse_cues(text)
            .into_iter()
            .filter_map(|(_, outcome)| outcome.ok())
            .collect()
    }

    #[test]
    fn test_schema_parse() {
        let schema = AssEventSchema::parse(" Layer, Start ,END,  Text ");
        assert_eq!(schema.columns(), &["layer", "start", "end", "text"]);
        assert_eq!(schema.len(), 4);
    }

    #[test]
    fn test_basic_dialogue() {
        let text = "[Events]\nFormat: Layer, Start, End, Text\nDialogue: 0,0:00:01.50,0:00:02.75,Hello {\\pos(0,0)}world";
        let cues = cues(text);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].timing_line(), "00:00:01.500 --> 00:00:02.750");
        assert_eq!(cues[0].lines, vec!["Hello world"]);
    }

    #[test]
    fn test_full_format_line() {
        let text = format!(
            "[Events]\n{}\nDialogue: 0,0:00:03.05,0:00:04.00,Default,,0,0,0,,{{\\an8}}Top, with commas, too",
            FULL_FORMAT
        );
        let cues = cues(&text);
        assert_eq!(cues[0].timing_line(), "00:00:03.050 --> 00:00:04.000");
        assert_eq!(cues[0].lines, vec!["Top, with commas, too"]);
    }

    #[test]
    fn test_line_break_escapes() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,Line1\\NLine2\\nLine3";
        assert_eq!(cues(text)[0].lines, vec!["Line1", "Line2", "Line3"]);
    }

    #[test]
    fn test_consecutive_breaks_do_not_leave_blank_lines() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,A\\N\\NB\\N";
        assert_eq!(cues(text)[0].lines, vec!["A", "B"]);
    }

    #[test]
    fn test_hard_space() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,a\\hb";
        assert_eq!(cues(text)[0].lines, vec!["a\u{a0}b"]);
    }

    #[test]
    fn test_unmatched_braces_kept() {
        assert_eq!(clean_text("a } b"), vec!["a } b"]);
        assert_eq!(clean_text("a { b"), vec!["a { b"]);
        assert_eq!(clean_text("x{\\b1}y{z"), vec!["xy{z"]);
    }

    #[test]
    fn test_tag_span_is_not_nested() {
        assert_eq!(clean_text("a{b{c}d}e"), vec!["ad}e"]);
    }

    #[test]
    fn test_tag_only_text_is_skipped() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,{\\an8}{\\i1}";
        let outcomes = parse_cues(text);
        assert_eq!(outcomes, vec![(3, Err(SkipReason::EmptyText))]);
    }

    #[test]
    fn test_dialogue_before_format_is_skipped() {
        let text = "[Events]\nDialogue: 0:00:01.00,0:00:02.00,Early\nFormat: Start, End, Text\nDialogue: 0:00:03.00,0:00:04.00,Late";
        let outcomes = parse_cues(text);
        assert_eq!(outcomes[0], (2, Err(SkipReason::MissingSchema)));
        assert_eq!(outcomes[1].1.as_ref().unwrap().lines, vec!["Late"]);
    }

    #[test]
    fn test_too_few_fields() {
        let text = "[Events]\nFormat: Layer, Start, End, Text\nDialogue: 0,0:00:01.00";
        assert_eq!(
            parse_cues(text),
            vec![(
                3,
                Err(SkipReason::TooFewFields {
                    expected: 4,
                    found: 2
                })
            )]
        );
    }

    #[test]
    fn test_missing_required_column() {
        let text = "[Events]\nFormat: Start, Text\nDialogue: 0:00:01.00,Hi";
        assert_eq!(
            parse_cues(text)[0].1,
            Err(SkipReason::MissingField { field: "end" })
        );
    }

    #[test]
    fn test_empty_required_field() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: ,0:00:02.00,Hi";
        assert_eq!(
            parse_cues(text)[0].1,
            Err(SkipReason::MissingField { field: "start" })
        );
    }

    #[test]
    fn test_stops_at_next_section() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,First\n[Fonts]\n[Events]\nFormat: Start, End, Text\nDialogue: 0:00:03.00,0:00:04.00,Never";
        let cues = cues(text);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].lines, vec!["First"]);
    }

    #[test]
    fn test_unclosed_header_ends_events() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,First\n[Fonts\nDialogue: 0:00:03.00,0:00:04.00,Never";
        let cues = cues(text);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].lines, vec!["First"]);
    }

    #[test]
    fn test_padded_fields_are_trimmed() {
        let text = "[Events]\nFormat: Layer, Start, End, Text\nDialogue: 0, 0:00:01.50 , 0:00:02.75,  Padded  ";
        let cues = cues(text);
        assert_eq!(cues[0].timing_line(), "00:00:01.500 --> 00:00:02.750");
        assert!(cues[0].start.is_exact());
        assert_eq!(cues[0].lines, vec!["Padded"]);
    }

    #[test]
    fn test_lines_outside_events_ignored() {
        let text = "[Script Info]\nDialogue: 0:00:01.00,0:00:02.00,Nope\nFormat: Start, End, Text\n[V4+ Styles]\nFormat: Name, Fontname\n[Events]\nDialogue: 0:00:01.00,0:00:02.00,No schema yet";
        assert_eq!(parse_cues(text), vec![(7, Err(SkipReason::MissingSchema))]);
    }

    #[test]
    fn test_case_insensitive_prefixes_and_header() {
        let text = "[EVENTS]\nformat: start, end, text\nDIALOGUE: 0:00:01.00,0:00:02.00,Shout";
        assert_eq!(cues(text)[0].lines, vec!["Shout"]);
    }

    #[test]
    fn test_comment_rows_ignored() {
        let text = "[Events]\nFormat: Start, End, Text\nComment: 0:00:01.00,0:00:02.00,hidden\nDialogue: 0:00:01.00,0:00:02.00,shown";
        let outcomes = parse_cues(text);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, 4);
    }

    #[test]
    fn test_crlf_input() {
        let text = "[Events]\r\nFormat: Start, End, Text\r\nDialogue: 0:00:01.00,0:00:02.00,Windows\r\n";
        assert_eq!(cues(text)[0].lines, vec!["Windows"]);
    }

    #[test]
    fn test_unparseable_timestamp_passes_through() {
        let text = "[Events]\nFormat: Start, End, Text\nDialogue: soon,later,Text";
        assert_eq!(cues(text)[0].timing_line(), "soon --> later");
    }
}
