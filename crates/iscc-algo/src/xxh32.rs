//! Canonical XXH32 implementation.
//!
//! The 32-bit xxHash variant with seed support, implemented in-repo because
//! its exact output feeds the Text-Code and Data-Code fingerprints.
//! Reference: <https://github.com/Cyan4973/xxHash/blob/dev/doc/xxhash_spec.md>

const PRIME1: u32 = 0x9E3779B1;
const PRIME2: u32 = 0x85EBCA77;
const PRIME3: u32 = 0xC2B2AE3D;
const PRIME4: u32 = 0x27D4EB2F;
const PRIME5: u32 = 0x165667B1;

/// One accumulation round over a 32-bit little-endian lane.
#[inline]
fn round(acc: u32, lane: u32) -> u32 {
    acc.wrapping_add(lane.wrapping_mul(PRIME2))
        .rotate_left(13)
        .wrapping_mul(PRIME1)
}

/// Reads a little-endian u32 from the first four bytes of `b`.
#[inline]
fn read_u32_le(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Computes the 32-bit xxHash of `data` with the given `seed`.
///
/// Processes 16-byte stripes through four accumulators, folds the tail in
/// 4-byte and single-byte steps, and applies the final avalanche. Matches
/// the reference test vector `xxh32(&[], 0) == 0x02CC5D05`.
pub fn xxh32(data: &[u8], seed: u32) -> u32 {
    let len = data.len() as u32;
    let mut rest = data;

    let mut h = if rest.len() >= 16 {
        let mut v1 = seed.wrapping_add(PRIME1).wrapping_add(PRIME2);
        let mut v2 = seed.wrapping_add(PRIME2);
        let mut v3 = seed;
        let mut v4 = seed.wrapping_sub(PRIME1);

        while rest.len() >= 16 {
            v1 = round(v1, read_u32_le(&rest[0..4]));
            v2 = round(v2, read_u32_le(&rest[4..8]));
            v3 = round(v3, read_u32_le(&rest[8..12]));
            v4 = round(v4, read_u32_le(&rest[12..16]));
            rest = &rest[16..];
        }

        v1.rotate_left(1)
            .wrapping_add(v2.rotate_left(7))
            .wrapping_add(v3.rotate_left(12))
            .wrapping_add(v4.rotate_left(18))
    } else {
        seed.wrapping_add(PRIME5)
    };

    h = h.wrapping_add(len);

    while rest.len() >= 4 {
        h = h
            .wrapping_add(read_u32_le(rest).wrapping_mul(PRIME3))
            .rotate_left(17)
            .wrapping_mul(PRIME4);
        rest = &rest[4..];
    }

    for &byte in rest {
        h = h
            .wrapping_add(u32::from(byte).wrapping_mul(PRIME5))
            .rotate_left(11)
            .wrapping_mul(PRIME1);
    }

    h ^= h >> 15;
    h = h.wrapping_mul(PRIME2);
    h ^= h >> 13;
    h = h.wrapping_mul(PRIME3);
    h ^= h >> 16;
    h
}
