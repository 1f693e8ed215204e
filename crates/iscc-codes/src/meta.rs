//! Meta-Code generation from normalized metadata.
//!
//! The similarity digest is a SimHash over BLAKE3-hashed n-grams of the
//! collapsed name, optionally interleaved with a second SimHash over the
//! description text or raw metadata bytes. Metadata arrives either as a
//! JSON string (canonicalized to sorted-key compact form) or as a
//! `data:` URL whose base64 payload is used verbatim.

use iscc_core::hash::{blake3_hash, multihash_blake3};
use iscc_core::{
    encode_unit, text_clean, text_collapse, text_remove_newlines, text_trim, IsccError, IsccResult,
};
use iscc_core::{MainType, SubType, Version};

use crate::results::MetaCode;
use crate::{META_NGRAM_SIZE_BYTES, META_NGRAM_SIZE_TEXT, META_TRIM_DESCRIPTION, META_TRIM_NAME};

/// SimHash over BLAKE3-hashed width-3 n-grams of the collapsed text.
fn simhash_text_ngrams(text: &str) -> IsccResult<Vec<u8>> {
    let collapsed = text_collapse(text);
    let ngrams = iscc_algo::sliding_window(&collapsed, META_NGRAM_SIZE_TEXT)?;
    let hashes: Vec<[u8; 32]> = ngrams.iter().map(|ng| blake3_hash(ng.as_bytes())).collect();
    iscc_algo::alg_simhash(&hashes)
}

/// Interleave two 32-byte digests in 4-byte runs, 16 bytes from each.
///
/// Layout: `a[0..4] b[0..4] a[4..8] b[4..8] ...`
fn interleave_32(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    for run in 0..4 {
        let src = run * 4;
        out[run * 8..run * 8 + 4].copy_from_slice(&a[src..src + 4]);
        out[run * 8 + 4..run * 8 + 8].copy_from_slice(&b[src..src + 4]);
    }
    out
}

/// Decode the base64 payload of a `data:` URL.
fn decode_data_url(url: &str) -> IsccResult<Vec<u8>> {
    let payload = url
        .split_once(',')
        .map(|(_, b64)| b64)
        .ok_or_else(|| IsccError::InvalidInput("data-URL missing comma separator".into()))?;
    data_encoding::BASE64
        .decode(payload.as_bytes())
        .map_err(|e| IsccError::InvalidInput(format!("invalid base64 in data-URL: {e}")))
}

/// Parse a JSON string and re-serialize it to canonical bytes.
///
/// serde_json's object model keeps keys in a `BTreeMap`, so serialization
/// is sorted-key and compact, which covers the canonicalization subset the
/// conformance vectors exercise.
fn canonical_json(json: &str) -> IsccResult<(Vec<u8>, serde_json::Value)> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| IsccError::InvalidInput(format!("invalid JSON metadata: {e}")))?;
    let bytes = serde_json::to_vec(&value)
        .map_err(|e| IsccError::InvalidInput(format!("JSON serialization failed: {e}")))?;
    Ok((bytes, value))
}

/// Convert a JSON string into a canonicalized base64 `data:` URL.
///
/// The media type is `application/ld+json` when the canonical form has a
/// top-level `@context` key, else `application/json`.
pub fn json_to_data_url(json: &str) -> IsccResult<String> {
    let (bytes, value) = canonical_json(json)?;
    Ok(build_data_url(&bytes, &value))
}

fn build_data_url(canonical: &[u8], value: &serde_json::Value) -> String {
    let media_type = if value.get("@context").is_some() {
        "application/ld+json"
    } else {
        "application/json"
    };
    let b64 = data_encoding::BASE64.encode(canonical);
    format!("data:{media_type};base64,{b64}")
}

/// Similarity digest over the name alone or name + extra text.
fn soft_hash_meta(name: &str, extra: Option<&str>) -> IsccResult<Vec<u8>> {
    let name_digest = simhash_text_ngrams(name)?;
    match extra {
        None | Some("") => Ok(name_digest),
        Some(extra) => {
            let extra_digest = simhash_text_ngrams(extra)?;
            Ok(interleave_32(&name_digest, &extra_digest))
        }
    }
}

/// Similarity digest over the name interleaved with raw metadata bytes.
///
/// Byte metadata is windowed at width 4 without text collapsing.
fn soft_hash_meta_bytes(name: &str, payload: &[u8]) -> IsccResult<Vec<u8>> {
    let name_digest = simhash_text_ngrams(name)?;
    let windows = iscc_algo::sliding_window_bytes(payload, META_NGRAM_SIZE_BYTES)?;
    let hashes: Vec<[u8; 32]> = windows.iter().map(|w| blake3_hash(w)).collect();
    let payload_digest = iscc_algo::alg_simhash(&hashes)?;
    Ok(interleave_32(&name_digest, &payload_digest))
}

/// Generate a Meta-Code from a name and optional description / metadata.
///
/// The name is required and must survive normalization (clean, newline
/// removal, 128-byte trim). `meta` is either a JSON string or a `data:`
/// URL; when present its payload drives both the similarity digest and
/// the metahash. A data-URL with an empty payload counts as absent.
pub fn gen_meta_code_v0(
    name: &str,
    description: Option<&str>,
    meta: Option<&str>,
    bits: u32,
) -> IsccResult<MetaCode> {
    let name = text_trim(&text_remove_newlines(&text_clean(name)), META_TRIM_NAME);
    if name.is_empty() {
        return Err(IsccError::InvalidInput(
            "name is empty after normalization".into(),
        ));
    }

    let description = text_trim(&text_clean(description.unwrap_or("")), META_TRIM_DESCRIPTION);

    // Resolve the metadata payload; an empty data-URL payload is treated
    // as no metadata at all.
    let payload: Option<(Vec<u8>, String)> = match meta {
        Some(url) if url.starts_with("data:") => {
            let decoded = decode_data_url(url)?;
            if decoded.is_empty() {
                None
            } else {
                Some((decoded, url.to_string()))
            }
        }
        Some(json) => {
            let (bytes, value) = canonical_json(json)?;
            let url = build_data_url(&bytes, &value);
            Some((bytes, url))
        }
        None => None,
    };

    let (digest, metahash, meta_value) = match payload {
        Some((bytes, url)) => {
            let digest = soft_hash_meta_bytes(&name, &bytes)?;
            (digest, multihash_blake3(&bytes), Some(url))
        }
        None => {
            let text = if description.is_empty() {
                name.clone()
            } else {
                format!("{name} {description}")
            };
            let metahash = multihash_blake3(text.trim().as_bytes());
            let extra = (!description.is_empty()).then_some(description.as_str());
            (soft_hash_meta(&name, extra)?, metahash, None)
        }
    };

    let code = encode_unit(MainType::Meta, SubType::None, Version::V0, bits, &digest)?;

    Ok(MetaCode {
        iscc: format!("ISCC:{code}"),
        name,
        description: (!description.is_empty()).then_some(description),
        meta: meta_value,
        metahash,
    })
}
