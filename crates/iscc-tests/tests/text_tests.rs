//! Text normalization scenarios spanning core and generators.

use iscc_core::{text_clean, text_collapse, text_remove_newlines, text_trim};

#[test]
fn clean_ligature_and_trim_scenario() {
    assert_eq!(text_clean("  Hel\u{FB01} World  "), "Helfi World");
}

#[test]
fn clean_newline_zoo() {
    // All seven newline code points normalize to LF.
    for nl in ['\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0085}', '\u{2028}', '\u{2029}']
    {
        let input = format!("a{nl}b");
        assert_eq!(text_clean(&input), "a\nb", "failed for U+{:04X}", nl as u32);
    }
    assert_eq!(text_clean("a\r\nb"), "a\nb");
}

#[test]
fn collapse_is_idempotent() {
    for input in [
        "",
        "Hello, World!",
        "Iñtërnâtiônàlizætiøn☃",
        "  spaced\tout\ntext  ",
        "MIXED case With Ümläuts",
    ] {
        let once = text_collapse(input);
        assert_eq!(text_collapse(&once), once, "input={input:?}");
    }
}

#[test]
fn collapse_feeds_identical_codes_for_equivalent_text() {
    let a = iscc_codes::gen_text_code_v0("The Quick Brown Fox!", 64).unwrap();
    let b = iscc_codes::gen_text_code_v0("the quick brown fox", 64).unwrap();
    assert_eq!(a.iscc, b.iscc);
    assert_eq!(a.characters, b.characters);
}

#[test]
fn trim_respects_utf8_boundaries() {
    assert_eq!(text_trim("hello world", 5), "hello");
    assert_eq!(text_trim("é", 1), "");
    assert_eq!(text_trim(&"é".repeat(100), 9), "éééé");
}

#[test]
fn remove_newlines_joins_with_single_spaces() {
    assert_eq!(text_remove_newlines("a\nb\r\nc  d"), "a b c d");
}

#[test]
fn meta_name_pipeline_composes_the_text_operations() {
    let result =
        iscc_codes::gen_meta_code_v0("  Die\nUnendliche   Geschichte  ", None, None, 64).unwrap();
    assert_eq!(result.name, "Die Unendliche Geschichte");
    assert_eq!(result.iscc, "ISCC:AAAZXZ6OU74YAZIM");
}
