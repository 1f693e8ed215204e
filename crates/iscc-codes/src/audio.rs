//! Audio-Code generation (Content-Code for Chromaprint features).
//!
//! The 32-byte digest concatenates three SimHash stages over the big-endian
//! feature words: the whole vector (4 bytes), four positional quarters
//! (16 bytes), and three thirds of the sorted vector (12 bytes).

use iscc_core::{encode_unit, IsccResult, MainType, SubType, Version};

use crate::results::AudioCode;

/// Split `slice` into `n` parts, front parts taking the remainder.
///
/// Mirrors numpy's `array_split`: every part gets `len / n` elements and
/// the first `len % n` parts one extra; surplus parts are empty.
fn array_split<T>(slice: &[T], n: usize) -> Vec<&[T]> {
    let base = slice.len() / n;
    let remainder = slice.len() % n;
    let mut parts = Vec::with_capacity(n);
    let mut offset = 0;
    for i in 0..n {
        let size = base + usize::from(i < remainder);
        parts.push(&slice[offset..offset + size]);
        offset += size;
    }
    parts
}

/// Multi-stage SimHash over the Chromaprint vector.
fn soft_hash_audio(cv: &[i32]) -> IsccResult<Vec<u8>> {
    let digests: Vec<[u8; 4]> = cv.iter().map(|&v| v.to_be_bytes()).collect();
    if digests.is_empty() {
        return Ok(vec![0u8; 32]);
    }

    let mut parts = iscc_algo::alg_simhash(&digests)?;

    for quarter in array_split(&digests, 4) {
        if quarter.is_empty() {
            parts.extend_from_slice(&[0u8; 4]);
        } else {
            parts.extend_from_slice(&iscc_algo::alg_simhash(quarter)?);
        }
    }

    let mut sorted = cv.to_vec();
    sorted.sort_unstable();
    let sorted_digests: Vec<[u8; 4]> = sorted.iter().map(|&v| v.to_be_bytes()).collect();
    for third in array_split(&sorted_digests, 3) {
        if third.is_empty() {
            parts.extend_from_slice(&[0u8; 4]);
        } else {
            parts.extend_from_slice(&iscc_algo::alg_simhash(third)?);
        }
    }

    Ok(parts)
}

/// Generate an Audio-Code from a Chromaprint feature vector.
pub fn gen_audio_code_v0(cv: &[i32], bits: u32) -> IsccResult<AudioCode> {
    let digest = soft_hash_audio(cv)?;
    let code = encode_unit(MainType::Content, SubType::Audio, Version::V0, bits, &digest)?;
    Ok(AudioCode {
        iscc: format!("ISCC:{code}"),
    })
}
