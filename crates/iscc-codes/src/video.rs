//! Video-Code generation (Content-Code for MPEG-7 frame signatures).

use std::collections::BTreeSet;

use iscc_core::{encode_unit, IsccError, IsccResult, MainType, SubType, Version};

use crate::results::VideoCode;

/// WTA-Hash over the column-wise sum of the deduplicated frame signatures.
fn soft_hash_video(frame_sigs: &[Vec<i32>], bits: u32) -> IsccResult<Vec<u8>> {
    if frame_sigs.is_empty() {
        return Err(IsccError::InvalidInput(
            "frame signatures must not be empty".into(),
        ));
    }
    let width = frame_sigs[0].len();
    if width < iscc_algo::WTA_VECTOR_LEN {
        return Err(IsccError::InvalidInput(format!(
            "frame signatures must have at least {} elements, got {width}",
            iscc_algo::WTA_VECTOR_LEN
        )));
    }
    if frame_sigs.iter().any(|sig| sig.len() != width) {
        return Err(IsccError::InvalidInput(
            "frame signatures must all have the same length".into(),
        ));
    }

    // Duplicate frames contribute once; order is irrelevant.
    let unique: BTreeSet<&Vec<i32>> = frame_sigs.iter().collect();

    let mut column_sums = vec![0i64; width];
    for sig in unique {
        for (column, &value) in sig.iter().enumerate() {
            column_sums[column] += value as i64;
        }
    }

    iscc_algo::alg_wtahash(&column_sums, bits)
}

/// Generate a Video-Code from a sequence of frame signatures.
///
/// Each signature is an MPEG-7 vector of at least 380 values; all
/// signatures must share one length.
pub fn gen_video_code_v0(frame_sigs: &[Vec<i32>], bits: u32) -> IsccResult<VideoCode> {
    let digest = soft_hash_video(frame_sigs, bits)?;
    let code = encode_unit(MainType::Content, SubType::Video, Version::V0, bits, &digest)?;
    Ok(VideoCode {
        iscc: format!("ISCC:{code}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(step: i32, offset: i32) -> Vec<i32> {
        (0..iscc_algo::WTA_VECTOR_LEN as i32)
            .map(|i| (i * step + offset) % 255)
            .collect()
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(
            gen_video_code_v0(&[], 64),
            Err(IsccError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_short_signatures() {
        let short = vec![vec![0i32; 100]];
        assert!(gen_video_code_v0(&short, 64).is_err());
    }

    #[test]
    fn test_rejects_ragged_signatures() {
        let ragged = vec![vec![0i32; 380], vec![0i32; 381]];
        assert!(gen_video_code_v0(&ragged, 64).is_err());
    }

    #[test]
    fn test_duplicate_frames_are_ignored() {
        let a = frame(7, 3);
        let b = frame(13, 11);
        let once = gen_video_code_v0(&[a.clone(), b.clone()], 64).unwrap();
        let duplicated = gen_video_code_v0(&[a.clone(), b.clone(), a, b], 64).unwrap();
        assert_eq!(once.iscc, duplicated.iscc);
    }

    #[test]
    fn test_frame_order_is_irrelevant() {
        let a = frame(7, 3);
        let b = frame(13, 11);
        let ab = gen_video_code_v0(&[a.clone(), b.clone()], 64).unwrap();
        let ba = gen_video_code_v0(&[b, a], 64).unwrap();
        assert_eq!(ab.iscc, ba.iscc);
    }

    #[test]
    fn test_zero_frames_produce_zero_digest() {
        let zero = vec![vec![0i32; 380]];
        let result = gen_video_code_v0(&zero, 64).unwrap();
        let digest = iscc_core::iscc_decode(&result.iscc).unwrap().4;
        assert_eq!(digest, vec![0u8; 8]);
    }
}
