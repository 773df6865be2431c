//! Test fixtures for integration tests
//!
//! Subtitle documents shaped like the ones providers actually serve.

/// A subtitle document with what converting it should yield
#[derive(Debug, Clone)]
pub struct SubtitleFixture {
    pub name: &'static str,
    pub content: &'static str,
    pub expected_cues: usize,
}

impl SubtitleFixture {
    /// Plain SRT with index lines, markup and a multi-line cue
    pub fn srt_basic() -> Self {
        Self {
            name: "srt_basic",
            content: "1\n\
                      00:00:01,000 --> 00:00:03,200\n\
                      Where are you going?\n\
                      \n\
                      2\n\
                      00:00:03,400 --> 00:00:06,050\n\
                      <i>Out.</i>\n\
                      - Out where?\n\
                      \n\
                      3\n\
                      00:01:10,000 --> 00:01:12,999\n\
                      Anywhere, really.\n",
            expected_cues: 3,
        }
    }

    /// SRT saved on Windows, with a UTF-8 BOM and a broken block in the middle
    pub fn srt_windows_with_garbage() -> Self {
        Self {
            name: "srt_windows_with_garbage",
            content: "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nFirst\r\n\r\n\
                      2\r\nthis block lost its timing\r\n\r\n\
                      3\r\n00:00:05,000 --> 00:00:06,000\r\nThird\r\n\r\n",
            expected_cues: 2,
        }
    }

    /// A full ASS script with styles, comments and override tags
    pub fn ass_full() -> Self {
        Self {
            name: "ass_full",
            content: "[Script Info]\n\
                      Title: Sample\n\
                      ScriptType: v4.00+\n\
                      PlayResX: 1920\n\
                      PlayResY: 1080\n\
                      \n\
                      [V4+ Styles]\n\
                      Format: Name, Fontname, Fontsize, PrimaryColour, Bold, Italic, Alignment\n\
                      Style: Default,Arial,48,&H00FFFFFF,0,0,2\n\
                      \n\
                      [Events]\n\
                      Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
                      Comment: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,timing note\n\
                      Dialogue: 0,0:00:01.50,0:00:02.75,Default,,0,0,0,,Hello {\\pos(960,540)}world\n\
                      Dialogue: 0,0:00:03.05,0:00:05.00,Default,Kei,0,0,0,,{\\i1}Wait,{\\i0} what?\\NNo way.\n\
                      Dialogue: 0,0:00:06.00,0:00:07.00,Default,,0,0,0,,{\\p1}{\\p0}\n\
                      Dialogue: 1,1:02:03.40,1:02:05.00,Default,,0,0,0,fade,{\\fad(200,200)}Later\n\
                      \n\
                      [Fonts]\n\
                      fontname: custom.ttf\n",
            expected_cues: 3,
        }
    }

    /// Legacy SSA v4 script
    pub fn ssa_legacy() -> Self {
        Self {
            name: "ssa_legacy",
            content: "[Script Info]\n\
                      ScriptType: v4.00\n\
                      \n\
                      [V4 Styles]\n\
                      Format: Name, Fontname, Fontsize\n\
                      Style: Default,Tahoma,24\n\
                      \n\
                      [Events]\n\
                      Format: Marked, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
                      Dialogue: Marked=0,0:00:10.00,0:00:12.00,Default,NTP,0000,0000,0000,,Old school\n",
            expected_cues: 1,
        }
    }

    /// Nothing but whitespace
    pub fn blank() -> Self {
        Self {
            name: "blank",
            content: " \n\n\t\n",
            expected_cues: 0,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::srt_basic(),
            Self::srt_windows_with_garbage(),
            Self::ass_full(),
            Self::ssa_legacy(),
            Self::blank(),
        ]
    }
}
