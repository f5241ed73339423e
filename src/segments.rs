/*!
 * Splitting of entry values into translatable text and protected tokens.
 *
 * Protected tokens are placeholders (`%player%`), short color codes (`&4`),
 * markup tags (`<gradient>`, `<click:...>`, any `<...>`) and literal
 * newlines. They must reach the output exactly as they appeared in the
 * source, so only the text between them is ever sent to a provider.
 *
 * Matching is done by an explicit priority list of matchers tried at each
 * scan position; the first matcher that accepts the position wins, which
 * keeps the tie-break order auditable per token class.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%[\w_]+%").expect("Invalid placeholder regex"));

static COLOR_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^&[0-9a-fr]").expect("Invalid color code regex"));

static PAIRED_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^</?(?:gradient|rainbow)>").expect("Invalid paired tag regex"));

static CLICK_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:<click:[^>]+>|</click>)").expect("Invalid click tag regex"));

static NEWLINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\n").expect("Invalid newline regex"));

static GENERIC_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<[^>]+>").expect("Invalid generic tag regex"));

/// Class of a protected token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// `%identifier%`
    Placeholder,
    /// `&` followed by a hex digit or `r`
    ColorCode,
    /// `<gradient>`, `</gradient>`, `<rainbow>`, `</rainbow>`
    PairedTag,
    /// `<click:...>` or `</click>`
    ClickTag,
    /// A literal `\n` inside the value
    Newline,
    /// Any other `<...>` tag
    GenericTag,
}

impl TokenClass {
    /// Matchers in the order they are tried at each position
    pub const PRIORITY: [TokenClass; 6] = [
        TokenClass::Placeholder,
        TokenClass::ColorCode,
        TokenClass::PairedTag,
        TokenClass::ClickTag,
        TokenClass::Newline,
        TokenClass::GenericTag,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Placeholder => &PLACEHOLDER_REGEX,
            Self::ColorCode => &COLOR_CODE_REGEX,
            Self::PairedTag => &PAIRED_TAG_REGEX,
            Self::ClickTag => &CLICK_TAG_REGEX,
            Self::Newline => &NEWLINE_REGEX,
            Self::GenericTag => &GENERIC_TAG_REGEX,
        }
    }

    /// Try this matcher at byte offset `pos`; returns the end offset of the token
    pub fn match_at(self, value: &str, pos: usize) -> Option<usize> {
        let rest = value.get(pos..)?;
        self.pattern().find(rest).map(|m| pos + m.end())
    }

    /// Color codes are tracked separately for reporting only
    pub fn is_color(self) -> bool {
        matches!(self, Self::ColorCode)
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Placeholder => "placeholder",
            Self::ColorCode => "color",
            Self::PairedTag => "paired-tag",
            Self::ClickTag => "click-tag",
            Self::Newline => "newline",
            Self::GenericTag => "tag",
        };
        write!(f, "{}", name)
    }
}

/// Kind of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Translatable text
    Text,
    /// Must pass through translation unchanged
    Protected(TokenClass),
}

/// A contiguous span of a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Text, content: content.into() }
    }

    pub fn protected(class: TokenClass, content: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Protected(class), content: content.into() }
    }

    /// Whether this segment goes to the translation provider
    pub fn is_translatable(&self) -> bool {
        self.kind == SegmentKind::Text
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SegmentKind::Text => write!(f, "[text:{:?}]", self.content),
            SegmentKind::Protected(class) => write!(f, "[{}:{:?}]", class, self.content),
        }
    }
}

/// Find the highest-priority token starting exactly at `pos`
pub fn match_token_at(value: &str, pos: usize) -> Option<(TokenClass, usize)> {
    // Every token class starts with one of these bytes
    match value.as_bytes().get(pos).copied()? {
        b'%' | b'&' | b'<' | b'\n' => {}
        _ => return None,
    }

    TokenClass::PRIORITY
        .iter()
        .find_map(|class| class.match_at(value, pos).map(|end| (*class, end)))
}

/// Split a value into segments that cover it completely and in order
pub fn split_segments(value: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < value.len() {
        if let Some((class, end)) = match_token_at(value, pos) {
            if pos > text_start {
                segments.push(Segment::text(&value[text_start..pos]));
            }
            segments.push(Segment::protected(class, &value[pos..end]));
            pos = end;
            text_start = end;
        } else {
            // Advance by one full character to stay on a UTF-8 boundary
            pos += value[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }

    if text_start < value.len() {
        segments.push(Segment::text(&value[text_start..]));
    }

    segments
}

/// Concatenate segment contents in order
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.content.as_str()).collect()
}
