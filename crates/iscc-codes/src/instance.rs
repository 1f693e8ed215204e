//! Instance-Code generation (exact-identity cryptographic digest).

use iscc_core::IsccResult;

use crate::results::InstanceCode;
use crate::streaming::InstanceHasher;

/// Generate an Instance-Code from a byte slice.
///
/// The digest is BLAKE3 over the full stream; the result also carries the
/// multihash rendering and the byte count. Equivalent to streaming the
/// same bytes through [`InstanceHasher`].
pub fn gen_instance_code_v0(data: &[u8], bits: u32) -> IsccResult<InstanceCode> {
    let mut hasher = InstanceHasher::new();
    hasher.update(data)?;
    hasher.finalize(bits)
}
