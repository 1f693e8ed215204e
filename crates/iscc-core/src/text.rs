//! Unicode text normalization for metadata and text fingerprinting.
//!
//! Two normalization targets exist side by side: a display form
//! ([`text_clean`] / [`text_remove_newlines`] / [`text_trim`]) that keeps
//! text readable for metadata echo-back, and a hashing form
//! ([`text_collapse`]) that strips everything irrelevant to similarity.

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Code points treated as newlines; all normalize to `\n`.
const NEWLINES: [char; 7] = [
    '\u{000A}', // LINE FEED
    '\u{000B}', // VERTICAL TAB
    '\u{000C}', // FORM FEED
    '\u{000D}', // CARRIAGE RETURN
    '\u{0085}', // NEXT LINE
    '\u{2028}', // LINE SEPARATOR
    '\u{2029}', // PARAGRAPH SEPARATOR
];

/// True for the Unicode "C" (other) major category.
fn is_other_category(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Unassigned
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
    )
}

/// True for the Unicode "C", "M" (mark), or "P" (punctuation) categories.
fn is_cmp_category(c: char) -> bool {
    is_other_category(c)
        || matches!(
            get_general_category(c),
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
                | GeneralCategory::ConnectorPunctuation
                | GeneralCategory::DashPunctuation
                | GeneralCategory::OpenPunctuation
                | GeneralCategory::ClosePunctuation
                | GeneralCategory::InitialPunctuation
                | GeneralCategory::FinalPunctuation
                | GeneralCategory::OtherPunctuation
        )
}

/// Normalize text for display.
///
/// NFKC-normalizes, drops control characters except the seven newline code
/// points (which all become `\n`, with `\r\n` folded into one), collapses
/// runs of blank lines to at most one, and trims surrounding whitespace.
pub fn text_clean(text: &str) -> String {
    let text: String = text.nfkc().collect();

    let mut cleaned = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if NEWLINES.contains(&c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            cleaned.push('\n');
        } else if !is_other_category(c) {
            cleaned.push(c);
        }
    }

    let mut lines: Vec<&str> = Vec::new();
    let mut prev_blank = false;
    for line in cleaned.split('\n') {
        let blank = line.trim().is_empty();
        if blank && prev_blank {
            continue;
        }
        prev_blank = blank;
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}

/// Replace every whitespace run (including newlines) with a single space.
pub fn text_remove_newlines(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to the longest valid UTF-8 prefix of at most `nbytes` bytes,
/// then trim surrounding whitespace. A multi-byte character straddling the
/// limit is dropped entirely.
pub fn text_trim(text: &str, nbytes: usize) -> String {
    if text.len() <= nbytes {
        return text.trim().to_string();
    }
    let prefix = &text.as_bytes()[..nbytes];
    let valid = match std::str::from_utf8(prefix) {
        Ok(s) => s,
        Err(e) => &text[..e.valid_up_to()],
    };
    valid.trim().to_string()
}

/// Normalize text for similarity hashing.
///
/// NFD-normalizes and lowercases, drops whitespace and all characters in
/// the C, M, and P categories, then recomposes with NFKC. Idempotent.
pub fn text_collapse(text: &str) -> String {
    let decomposed: String = text.nfd().collect();
    decomposed
        .to_lowercase()
        .chars()
        .filter(|&c| !c.is_whitespace() && !is_cmp_category(c))
        .nfkc()
        .collect()
}
