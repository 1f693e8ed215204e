//! SimHash bit aggregation and sliding-window n-gram generation.
//!
//! SimHash takes equal-length digests and keeps, per bit position, the
//! majority vote (ties round up). The sliding windows produce the
//! overlapping n-grams that feed it.

use iscc_core::{IsccError, IsccResult};

/// Aggregates equal-length digests into a majority-vote SimHash.
///
/// The output is as wide as the inputs. An empty input yields 32 zero
/// bytes; mismatched digest lengths are an input error.
pub fn alg_simhash<T: AsRef<[u8]>>(digests: &[T]) -> IsccResult<Vec<u8>> {
    if let Some(first) = digests.first() {
        let width = first.as_ref().len();
        for (i, digest) in digests.iter().enumerate().skip(1) {
            let len = digest.as_ref().len();
            if len != width {
                return Err(IsccError::InvalidInput(format!(
                    "digest length mismatch: expected {width}, got {len} at index {i}"
                )));
            }
        }
    }
    if digests.is_empty() {
        return Ok(vec![0u8; 32]);
    }

    let n_bytes = digests[0].as_ref().len();
    let n_bits = n_bytes * 8;
    let mut counts = vec![0u32; n_bits];

    for digest in digests {
        let bytes = digest.as_ref();
        for (i, count) in counts.iter_mut().enumerate() {
            if (bytes[i / 8] >> (7 - i % 8)) & 1 == 1 {
                *count += 1;
            }
        }
    }

    // A bit survives when set in at least half of the digests.
    let n = digests.len() as u32;
    let mut out = vec![0u8; n_bytes];
    for (i, &count) in counts.iter().enumerate() {
        if count * 2 >= n {
            out[i / 8] |= 1 << (7 - i % 8);
        }
    }
    Ok(out)
}

/// Overlapping windows of `width` characters over `seq`, advancing one
/// character at a time. Inputs shorter than `width` yield the whole input
/// as a single window. Width must be at least 2.
pub fn sliding_window(seq: &str, width: usize) -> IsccResult<Vec<&str>> {
    if width < 2 {
        return Err(IsccError::InvalidInput(
            "sliding window width must be at least 2".into(),
        ));
    }
    let starts: Vec<usize> = seq.char_indices().map(|(i, _)| i).collect();
    let len = starts.len();
    if len <= width {
        return Ok(vec![seq]);
    }
    Ok((0..=len - width)
        .map(|i| {
            let start = starts[i];
            let end = if i + width < len {
                starts[i + width]
            } else {
                seq.len()
            };
            &seq[start..end]
        })
        .collect())
}

/// Overlapping windows of `width` bytes over `data`. Inputs shorter than
/// `width` yield the whole input as a single window. Width must be at
/// least 2.
pub fn sliding_window_bytes(data: &[u8], width: usize) -> IsccResult<Vec<&[u8]>> {
    if width < 2 {
        return Err(IsccError::InvalidInput(
            "sliding window width must be at least 2".into(),
        ));
    }
    if data.len() <= width {
        return Ok(vec![data]);
    }
    Ok(data.windows(width).collect())
}
