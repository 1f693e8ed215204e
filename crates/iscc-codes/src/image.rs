//! Image-Code generation (Content-Code for 32x32 grayscale pixels).
//!
//! A 2D DCT concentrates the image energy into low-frequency coefficients;
//! four 8x8 blocks near the origin are thresholded against their medians
//! to produce up to 256 perceptual bits.

use iscc_core::{encode_unit, IsccError, IsccResult, MainType, SubType, Version};

use crate::results::ImageCode;

/// Pixel edge length of the normalized input image.
const IMAGE_SIDE: usize = 32;
/// Block origins (column, row) scanned for hash bits.
const BLOCK_ORIGINS: [(usize, usize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

fn transpose(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let rows = matrix.len();
    let cols = matrix[0].len();
    let mut out = vec![vec![0.0f64; rows]; cols];
    for (r, row) in matrix.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            out[c][r] = value;
        }
    }
    out
}

/// Median with even-length averaging of the two middle values.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("DCT outputs are never NaN"));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Flatten the 8x8 block whose top-left corner is `(col, row)`.
fn block_8x8(matrix: &[Vec<f64>], col: usize, row: usize) -> Vec<f64> {
    let mut flat = Vec::with_capacity(64);
    for matrix_row in matrix.iter().skip(row).take(8) {
        flat.extend(matrix_row.iter().skip(col).take(8));
    }
    flat
}

/// DCT-based perceptual hash of `bits` length over 1024 grayscale pixels.
fn soft_hash_image(pixels: &[u8], bits: u32) -> IsccResult<Vec<u8>> {
    if pixels.len() != IMAGE_SIDE * IMAGE_SIDE {
        return Err(IsccError::InvalidInput(format!(
            "expected {} pixels, got {}",
            IMAGE_SIDE * IMAGE_SIDE,
            pixels.len()
        )));
    }
    if bits > 256 {
        return Err(IsccError::InvalidInput(format!(
            "image hash supports at most 256 bits, got {bits}"
        )));
    }

    // Row-wise DCT, transpose, column-wise DCT, transpose back.
    let rows: Vec<Vec<f64>> = pixels
        .chunks(IMAGE_SIDE)
        .map(|row| {
            let row: Vec<f64> = row.iter().map(|&p| p as f64).collect();
            iscc_algo::alg_dct(&row)
        })
        .collect::<IsccResult<_>>()?;
    let cols: Vec<Vec<f64>> = transpose(&rows)
        .iter()
        .map(|col| iscc_algo::alg_dct(col))
        .collect::<IsccResult<_>>()?;
    let matrix = transpose(&cols);

    let mut hash_bits = Vec::with_capacity(256);
    for (col, row) in BLOCK_ORIGINS {
        let flat = block_8x8(&matrix, col, row);
        let threshold = median(&flat);
        hash_bits.extend(flat.iter().map(|&coef| coef > threshold));
        if hash_bits.len() >= bits as usize {
            break;
        }
    }

    let mut out = vec![0u8; (bits as usize).div_ceil(8)];
    for (i, &bit) in hash_bits[..bits as usize].iter().enumerate() {
        if bit {
            out[i / 8] |= 1 << (7 - i % 8);
        }
    }
    Ok(out)
}

/// Generate an Image-Code from 1024 grayscale pixels (32x32, row-major).
pub fn gen_image_code_v0(pixels: &[u8], bits: u32) -> IsccResult<ImageCode> {
    let digest = soft_hash_image(pixels, bits)?;
    let code = encode_unit(MainType::Content, SubType::Image, Version::V0, bits, &digest)?;
    Ok(ImageCode {
        iscc: format!("ISCC:{code}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_black_vector() {
        let result = gen_image_code_v0(&[0u8; 1024], 64).unwrap();
        assert_eq!(result.iscc, "ISCC:EEAQAAAAAAAAAAAA");
    }

    #[test]
    fn test_all_white_vector() {
        // Uniform input has zero AC energy; every block thresholds to zero.
        let result = gen_image_code_v0(&[255u8; 1024], 128).unwrap();
        assert_eq!(result.iscc, "ISCC:EEBYAAAAAAAAAAAAAAAAAAAAAAAAA");
    }

    #[test]
    fn test_rejects_wrong_pixel_count() {
        assert!(gen_image_code_v0(&[0u8; 100], 64).is_err());
        assert!(gen_image_code_v0(&[0u8; 1025], 64).is_err());
    }

    #[test]
    fn test_rejects_oversized_bits() {
        assert!(gen_image_code_v0(&[0u8; 1024], 288).is_err());
    }

    #[test]
    fn test_small_perturbation_preserves_most_bits() {
        let base: Vec<u8> = (0..1024).map(|i| (i % 251) as u8).collect();
        let mut tweaked = base.clone();
        tweaked[500] = tweaked[500].wrapping_add(3);

        let a = gen_image_code_v0(&base, 64).unwrap();
        let b = gen_image_code_v0(&tweaked, 64).unwrap();

        let da = iscc_core::iscc_decode(&a.iscc).unwrap().4;
        let db = iscc_core::iscc_decode(&b.iscc).unwrap().4;
        let distance: u32 = da
            .iter()
            .zip(db.iter())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum();
        assert!(distance <= 16, "hamming distance {distance} too large");
    }

    #[test]
    fn test_median_even_averages_middle_pair() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }
}
