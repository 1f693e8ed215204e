//! Data-Code generation (similarity fingerprint of raw bytes).

use iscc_core::IsccResult;

use crate::results::DataCode;
use crate::streaming::DataHasher;

/// Generate a Data-Code from a byte slice.
///
/// Splits the data into content-defined chunks, hashes each chunk with
/// xxh32, and compresses the feature set with MinHash. Equivalent to
/// streaming the same bytes through [`DataHasher`].
pub fn gen_data_code_v0(data: &[u8], bits: u32) -> IsccResult<DataCode> {
    let mut hasher = DataHasher::new();
    hasher.update(data)?;
    hasher.finalize(bits)
}
