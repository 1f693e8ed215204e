//! ISCC Core - codec and normalization primitives for ISO 24138 content codes.
//!
//! This crate provides:
//! - The error taxonomy shared across the workspace
//! - MainType/SubType/Version enums and the varnibble header codec
//! - Base32/base64 transport encodings
//! - Unit encoding, `iscc_decode`, and composite `iscc_decompose`
//! - Unicode text normalization (clean/collapse/trim/newline handling)
//! - BLAKE3 wrapper with multihash framing

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod base;
pub mod codec;
pub mod error;
pub mod hash;
pub mod header;
pub mod text;

pub use base::{decode_base32, encode_base32, encode_base64url_nopad};
pub use codec::{encode_unit, iscc_clean, iscc_decode, iscc_decompose};
pub use error::{IsccError, IsccResult};
pub use header::{
    decode_header, decode_length, decode_units, encode_header, encode_length, encode_units,
    MainType, SubType, Version,
};
pub use text::{text_clean, text_collapse, text_remove_newlines, text_trim};
