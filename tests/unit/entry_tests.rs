/*!
 * Tests for line classification and quote escaping
 */

use yamler::entry::{QuoteStyle, parse_line};

/// Test that only quoted key/value lines are entries
#[test]
fn test_parseLine_withMixedLines_shouldClassify() {
    let passthrough = [
        "# comment\n",
        "\n",
        "   \n",
        "nested:\n",
        "- 'list item'\n",
        "key: unquoted value\n",
        "key: \"unterminated\n",
        "my-key: \"dash in key\"\n",
        "key: 'mixed\"\n",
    ];
    for line in passthrough {
        assert!(parse_line(line).is_none(), "expected passthrough: {:?}", line);
    }

    let entry = parse_line("    deep_key: 'value'  \r\n").unwrap();
    assert_eq!(entry.indent, "    ");
    assert_eq!(entry.key, "deep_key");
    assert_eq!(entry.quote, QuoteStyle::Single);
    assert_eq!(entry.raw_value, "value");
}

/// Test that an empty value is still an entry
#[test]
fn test_parseLine_withEmptyValue_shouldBeEntry() {
    let entry = parse_line("empty: \"\"\n").unwrap();
    assert_eq!(entry.raw_value, "");
    assert_eq!(entry.render(""), "empty: \"\"\n");
}

/// Test that Unicode word characters are accepted in keys
#[test]
fn test_parseLine_withUnicodeKey_shouldBeEntry() {
    let entry = parse_line("привет_1: 'x'\n").unwrap();
    assert_eq!(entry.key, "привет_1");
}

/// Test quote escaping round trip through the classifier
#[test]
fn test_render_thenParse_shouldRecoverValue() {
    let values = [
        "It's",
        "''",
        "say \"hi\"",
        "back\\slash",
        "trailing\\",
        "\\\"already\\\"",
        "both ' and \"",
        "",
    ];

    for line in ["k: 'x'\n", "k: \"x\"\n"] {
        let entry = parse_line(line).unwrap();
        for value in values {
            let rendered = entry.render(value);
            let reparsed = parse_line(&rendered)
                .unwrap_or_else(|| panic!("rendered line not recognized: {:?}", rendered));
            assert_eq!(reparsed.value(), value, "style {} line {:?}", entry.quote, rendered);
        }
    }
}

/// Test the concrete escaping forms
#[test]
fn test_escape_shouldUseStyleSpecificForm() {
    assert_eq!(QuoteStyle::Single.escape("Don't"), "Don''t");
    assert_eq!(QuoteStyle::Double.escape("a \"b\""), "a \\\"b\\\"");
    assert_eq!(QuoteStyle::Double.escape("Don't"), "Don't");
}
