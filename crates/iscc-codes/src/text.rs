//! Text-Code generation (Content-Code for plain text).

use iscc_core::{encode_unit, text_collapse, IsccResult, MainType, SubType, Version};

use crate::results::TextCode;
use crate::TEXT_NGRAM_SIZE;

/// MinHash digest over xxh32-hashed width-13 character n-grams.
fn soft_hash_text(collapsed: &str) -> IsccResult<Vec<u8>> {
    let ngrams = iscc_algo::sliding_window(collapsed, TEXT_NGRAM_SIZE)?;
    let features: Vec<u32> = ngrams
        .iter()
        .map(|ng| iscc_algo::xxh32(ng.as_bytes(), 0))
        .collect();
    Ok(iscc_algo::alg_minhash_256(&features))
}

/// Generate a Text-Code from plain text.
///
/// The text is collapsed before fingerprinting; the reported character
/// count refers to the collapsed form. Empty input is valid and produces
/// the fingerprint of a single empty n-gram.
pub fn gen_text_code_v0(text: &str, bits: u32) -> IsccResult<TextCode> {
    let collapsed = text_collapse(text);
    let characters = collapsed.chars().count();
    let digest = soft_hash_text(&collapsed)?;
    let code = encode_unit(MainType::Content, SubType::TEXT, Version::V0, bits, &digest)?;
    Ok(TextCode {
        iscc: format!("ISCC:{code}"),
        characters,
    })
}
