/*!
 * Line classification for translation files.
 *
 * Only one narrow line shape is recognized as translatable:
 * `<indent><key>: "<value>"` or `<indent><key>: '<value>'`.
 * Everything else (comments, blank lines, nested maps, lists) is
 * passthrough and must be copied byte-for-byte.
 */

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Entry line pattern; the closing quote is the last one followed only by whitespace
static ENTRY_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\s*)(\w+):\s*(?:"(.*)"|'(.*)')\s*$"#).expect("Invalid entry line regex")
});

/// Quote style used to delimit an entry value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `'value'`, embedded quotes are doubled
    Single,
    /// `"value"`, embedded quotes are backslash-escaped
    Double,
}

impl QuoteStyle {
    /// The delimiter character
    pub fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }

    /// Escape a plain value for insertion between delimiters of this style
    pub fn escape(self, value: &str) -> String {
        match self {
            Self::Single => value.replace('\'', "''"),
            Self::Double => value.replace('"', "\\\""),
        }
    }

    /// Reverse of [`QuoteStyle::escape`]
    pub fn unescape(self, raw: &str) -> Cow<'_, str> {
        match self {
            Self::Single if raw.contains("''") => Cow::Owned(raw.replace("''", "'")),
            Self::Double if raw.contains("\\\"") => Cow::Owned(raw.replace("\\\"", "\"")),
            _ => Cow::Borrowed(raw),
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A translatable `key: "value"` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Leading whitespace, echoed back on output
    pub indent: String,
    /// Identifier key
    pub key: String,
    /// Delimiter style of the value
    pub quote: QuoteStyle,
    /// Exact text between the delimiters, still escaped
    pub raw_value: String,
}

impl ParsedEntry {
    /// The value with quote escapes removed
    pub fn value(&self) -> Cow<'_, str> {
        self.quote.unescape(&self.raw_value)
    }

    /// Render an output line for this key carrying a new (unescaped) value
    pub fn render(&self, value: &str) -> String {
        format!(
            "{}{}: {}{}{}\n",
            self.indent,
            self.key,
            self.quote,
            self.quote.escape(value),
            self.quote
        )
    }
}

/// Classify a raw line; `None` means the line is passthrough
pub fn parse_line(line: &str) -> Option<ParsedEntry> {
    let caps = ENTRY_LINE_REGEX.captures(line)?;

    let (quote, raw_value) = match (caps.get(3), caps.get(4)) {
        (Some(m), _) => (QuoteStyle::Double, m.as_str()),
        (None, Some(m)) => (QuoteStyle::Single, m.as_str()),
        (None, None) => return None,
    };

    Some(ParsedEntry {
        indent: caps[1].to_string(),
        key: caps[2].to_string(),
        quote,
        raw_value: raw_value.to_string(),
    })
}
