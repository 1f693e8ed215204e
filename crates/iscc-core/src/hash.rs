//! BLAKE3 wrapper and multihash framing.
//!
//! Cryptographic hashing in the codebase goes through this module so the
//! algorithm choice and the multihash framing (`0x1E` BLAKE3 multicodec,
//! `0x20` = 32-byte digest) live in one place.

/// Multihash prefix for a 256-bit BLAKE3 digest.
pub const MULTIHASH_BLAKE3_PREFIX: [u8; 2] = [0x1E, 0x20];

/// Computes the 256-bit BLAKE3 hash of `data`.
///
/// # Example
/// ```
/// // BLAKE3("") anchor
/// let hash = iscc_core::hash::blake3_hash(&[]);
/// assert_eq!(
///     hex::encode(hash),
///     "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
/// );
/// ```
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Renders a BLAKE3 digest of `data` as a lowercase hex multihash.
pub fn multihash_blake3(data: &[u8]) -> String {
    multihash_from_digest(&blake3_hash(data))
}

/// Renders an existing 32-byte BLAKE3 digest as a lowercase hex multihash.
pub fn multihash_from_digest(digest: &[u8; 32]) -> String {
    let mut framed = Vec::with_capacity(34);
    framed.extend_from_slice(&MULTIHASH_BLAKE3_PREFIX);
    framed.extend_from_slice(digest);
    hex::encode(framed)
}

/// Incremental BLAKE3 hasher for data that arrives in pieces.
pub struct Blake3Hasher {
    inner: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Feeds more data into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalizes and returns the 32-byte digest.
    pub fn finalize(self) -> [u8; 32] {
        *self.inner.finalize().as_bytes()
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}
