//! Base32 / base64 transport encodings.
//!
//! ISCC codes travel as RFC 4648 base32 without padding, uppercase on
//! output and case-insensitive on input. Metadata data-URLs use standard
//! base64; binding layers additionally use base64url without padding.

use crate::error::{IsccError, IsccResult};

/// Encode bytes as RFC 4648 base32, uppercase, no padding.
pub fn encode_base32(data: &[u8]) -> String {
    data_encoding::BASE32_NOPAD.encode(data)
}

/// Decode an unpadded base32 string, accepting any letter case.
pub fn decode_base32(code: &str) -> IsccResult<Vec<u8>> {
    let upper = code.to_uppercase();
    data_encoding::BASE32_NOPAD
        .decode(upper.as_bytes())
        .map_err(|e| IsccError::InvalidEncoding(format!("base32 decode error: {e}")))
}

/// Encode bytes as base64url (RFC 4648 §5) without padding.
pub fn encode_base64url_nopad(data: &[u8]) -> String {
    data_encoding::BASE64URL_NOPAD.encode(data)
}
