/*!
 * Tests for segment splitting
 */

use yamler::segments::{Segment, SegmentKind, TokenClass, join_segments, match_token_at, split_segments};

/// Test the worked example: only the text around the placeholder is translatable
#[test]
fn test_splitSegments_withGreeting_shouldMatchExample() {
    let segments = split_segments("Hello %name%!");
    assert_eq!(
        segments,
        vec![
            Segment::text("Hello "),
            Segment::protected(TokenClass::Placeholder, "%name%"),
            Segment::text("!"),
        ]
    );

    let translatable: Vec<&str> = segments
        .iter()
        .filter(|s| s.is_translatable())
        .map(|s| s.content.as_str())
        .collect();
    assert_eq!(translatable, vec!["Hello ", "!"]);
}

/// Test that splitting is lossless for a variety of values
#[test]
fn test_joinSegments_afterSplit_shouldReproduceValue() {
    let values = [
        "",
        "plain text",
        "%a%%b%",
        "&&4&x&R",
        "<gradient:#fff:#000>G</gradient> <RAINBOW>r</rainbow>",
        "<click:open_url:https://x.y/?q=<1>go</click>",
        "line\nbreak\n",
        "100% sure & <unclosed",
        "Привет, %игрок%! ✨ <b>жирный</b>",
        "%not closed <",
        "<>",
    ];

    for value in values {
        assert_eq!(join_segments(&split_segments(value)), value, "value {:?}", value);
    }
}

/// Test that adjacent text is never split into two text segments
#[test]
fn test_splitSegments_shouldAlternateTextAndTokens() {
    let segments = split_segments("a & b 50% <x> c");
    for pair in segments.windows(2) {
        assert!(
            !(pair[0].kind == SegmentKind::Text && pair[1].kind == SegmentKind::Text),
            "adjacent text segments: {:?}",
            segments
        );
    }
}

/// Test priority between overlapping matchers
#[test]
fn test_matchTokenAt_shouldFollowPriority() {
    assert_eq!(match_token_at("<rainbow>", 0), Some((TokenClass::PairedTag, 9)));
    assert_eq!(match_token_at("<rainbowish>", 0), Some((TokenClass::GenericTag, 12)));
    assert_eq!(match_token_at("</CLICK>", 0), Some((TokenClass::ClickTag, 8)));
    assert_eq!(match_token_at("&F", 0), Some((TokenClass::ColorCode, 2)));
    assert_eq!(match_token_at("&g", 0), None);
    assert_eq!(match_token_at("x\ny", 1), Some((TokenClass::Newline, 2)));
    assert_eq!(match_token_at("%%", 0), None);
}

/// Test that each matcher works on its own
#[test]
fn test_matchAt_perClass_shouldOnlyAcceptOwnTokens() {
    assert_eq!(TokenClass::Placeholder.match_at("x%p_1%", 1), Some(6));
    assert_eq!(TokenClass::Placeholder.match_at("<b>", 0), None);
    assert_eq!(TokenClass::GenericTag.match_at("<gradient>", 0), Some(10));
    assert_eq!(TokenClass::ClickTag.match_at("<click:>", 0), None);
    assert!(TokenClass::ColorCode.is_color());
    assert!(!TokenClass::GenericTag.is_color());
}

/// Test that color codes keep their own class
#[test]
fn test_splitSegments_withColorCodes_shouldTagColorClass() {
    let segments = split_segments("&6[Shop]&r ");
    let classes: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
    assert_eq!(
        classes,
        vec![
            SegmentKind::Protected(TokenClass::ColorCode),
            SegmentKind::Text,
            SegmentKind::Protected(TokenClass::ColorCode),
            SegmentKind::Text,
        ]
    );
}
