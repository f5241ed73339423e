/*!
 * Tests for ISO language code utilities
 */

use yamler::language_utils::{
    LanguageCodeType, get_language_name, normalize_to_part1_or_part2t, normalize_to_part2t,
    validate_language_code,
};

/// Test validation of codes in each ISO form
#[test]
fn test_validateLanguageCode_withVariousCodes_shouldClassify() {
    assert_eq!(validate_language_code("de").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("deu").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("q").is_err());
    assert!(validate_language_code("e1x").is_err());
}

/// Test normalization used for the target language
#[test]
fn test_normalize_withMixedForms_shouldAgree() {
    assert_eq!(normalize_to_part2t("RU").unwrap(), "rus");
    assert_eq!(normalize_to_part2t("chi").unwrap(), "zho");
    assert_eq!(normalize_to_part1_or_part2t("rus").unwrap(), "ru");
    assert_eq!(normalize_to_part1_or_part2t(" fre ").unwrap(), "fr");
}

/// Test human-readable names
#[test]
fn test_getLanguageName_withCodes_shouldReturnName() {
    assert_eq!(get_language_name("ru").unwrap(), "Russian");
    assert_eq!(get_language_name("ger").unwrap(), "German");
    assert!(get_language_name("xx").is_err());
}
