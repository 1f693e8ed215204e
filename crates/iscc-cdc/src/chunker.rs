//! Cut-point search and the chunk iterator.

use crate::gear::GEAR;
use crate::ChunkParams;

/// Finds the cut point for the next chunk within `buffer`.
///
/// The rolling state advances as `h = (h >> 1) + gear[byte]`. Before
/// `center_size` the strict mask must match; between `center_size` and
/// `max_size` the relaxed mask suffices. With no match by `max_size` the
/// chunk is cut there. Buffers at or below `min_size` come back whole.
pub(crate) fn cut_point(buffer: &[u8], params: &ChunkParams) -> usize {
    let size = buffer.len();
    let mut hash: u32 = 0;
    let mut i = params.min_size.min(size);

    let mut barrier = params.center_size.min(size);
    while i < barrier {
        hash = (hash >> 1).wrapping_add(GEAR[buffer[i] as usize]);
        if hash & params.mask_s == 0 {
            return i + 1;
        }
        i += 1;
    }

    barrier = params.max_size.min(size);
    while i < barrier {
        hash = (hash >> 1).wrapping_add(GEAR[buffer[i] as usize]);
        if hash & params.mask_l == 0 {
            return i + 1;
        }
        i += 1;
    }

    i
}

/// Iterator over content-defined chunks of `data`.
///
/// Yields exactly one empty chunk for empty input; otherwise yields
/// non-empty chunks whose concatenation equals `data`. In UTF-32 mode all
/// chunks except the last are 4-byte aligned.
pub struct ChunkIter<'a> {
    data: &'a [u8],
    params: ChunkParams,
    utf32: bool,
    pos: usize,
    done: bool,
}

impl<'a> ChunkIter<'a> {
    pub(crate) fn new(data: &'a [u8], utf32: bool, params: ChunkParams) -> Self {
        Self {
            data,
            params,
            utf32,
            pos: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;
        if self.done {
            return None;
        }
        if data.is_empty() {
            self.done = true;
            return Some(data);
        }
        if self.pos >= data.len() {
            self.done = true;
            return None;
        }

        let remaining = &data[self.pos..];
        let mut cut = cut_point(remaining, &self.params);

        if self.utf32 {
            cut -= cut % 4;
            if cut == 0 {
                // Short or unaligned head: never stall below min(4, len).
                cut = remaining.len().min(4);
            }
        }

        self.pos += cut;
        Some(&remaining[..cut])
    }
}
