//! ISCC CDC - content-defined chunking for Data-Code generation.
//!
//! A FastCDC-style gear rolling hash splits byte streams at
//! content-dependent boundaries, so insertions and deletions only disturb
//! nearby chunks instead of shifting every boundary after the edit. The
//! Data-Code pipeline hashes these chunks into MinHash features; text
//! pipelines can request UTF-32 alignment so cut points never split a code
//! unit.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod chunker;
mod gear;

pub use chunker::ChunkIter;

/// Default target average chunk size in bytes.
pub const DEFAULT_AVG_CHUNK_SIZE: u32 = 1024;

/// Derived chunking parameters for a target average chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    /// Minimum chunk size; the rolling hash starts matching here.
    pub min_size: usize,
    /// Hard upper bound; a chunk is forced at this size.
    pub max_size: usize,
    /// Phase boundary between the strict and relaxed masks.
    pub center_size: usize,
    /// Strict mask used before `center_size`.
    pub mask_s: u32,
    /// Relaxed mask used from `center_size` on.
    pub mask_l: u32,
}

impl ChunkParams {
    /// Derives all parameters from the average-size knob.
    ///
    /// `min = avg/4`, `max = avg*8`, and the center sits below `avg` by
    /// one and a half minimum sizes. The strict mask carries two more
    /// one-bits than the average's bit width, the relaxed mask two fewer.
    /// For `avg = 1024` this yields `(256, 8192, 640, 2047, 511)`.
    pub fn derive(avg_size: u32) -> Self {
        let min_size = (avg_size / 4) as usize;
        let max_size = (avg_size * 8) as usize;
        let offset = min_size + min_size.div_ceil(2);
        let center_size = avg_size as usize - offset;
        let bits = (avg_size as f64).log2().round() as u32;
        Self {
            min_size,
            max_size,
            center_size,
            mask_s: (1u32 << (bits + 1)) - 1,
            mask_l: (1u32 << (bits - 1)) - 1,
        }
    }
}

/// Returns an iterator over the content-defined chunks of `data`.
///
/// Empty input yields exactly one empty chunk. With `utf32` set, cut
/// points are aligned down to 4-byte multiples (the final chunk may stay
/// unaligned).
pub fn chunk_iter(data: &[u8], utf32: bool, avg_size: u32) -> ChunkIter<'_> {
    ChunkIter::new(data, utf32, ChunkParams::derive(avg_size))
}

/// Collects the content-defined chunks of `data` into a vector.
pub fn chunks(data: &[u8], utf32: bool, avg_size: u32) -> Vec<&[u8]> {
    chunk_iter(data, utf32, avg_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_canonical_tuple() {
        let p = ChunkParams::derive(1024);
        assert_eq!(p.min_size, 256);
        assert_eq!(p.max_size, 8192);
        assert_eq!(p.center_size, 640);
        assert_eq!(p.mask_s, 2047);
        assert_eq!(p.mask_l, 511);
    }

    #[test]
    fn test_params_scale_with_average() {
        let p = ChunkParams::derive(4096);
        assert_eq!(p.min_size, 1024);
        assert_eq!(p.max_size, 32768);
        assert_eq!(p.mask_s, (1 << 13) - 1);
        assert_eq!(p.mask_l, (1 << 11) - 1);
    }
}
