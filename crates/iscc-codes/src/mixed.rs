//! Mixed-Code generation (combining several Content-Codes).
//!
//! Each input Content-Code contributes one `bits/8`-byte entry: its first
//! raw byte (the header byte carrying the type information) followed by
//! the leading body bytes. SimHash over the entries yields the digest.

use iscc_core::{
    decode_base32, decode_header, decode_length, encode_unit, iscc_clean, IsccError, IsccResult,
    MainType, SubType, Version,
};

use crate::results::MixedCode;

/// SimHash over type-tagged prefixes of decoded Content-Codes.
fn soft_hash_codes(raw_codes: &[Vec<u8>], bits: u32) -> IsccResult<Vec<u8>> {
    if raw_codes.len() < 2 {
        return Err(IsccError::InvalidInput(
            "at least 2 Content-Codes are required for mixing".into(),
        ));
    }

    let nbytes = (bits / 8) as usize;
    let mut entries: Vec<Vec<u8>> = Vec::with_capacity(raw_codes.len());

    for raw in raw_codes {
        let (mtype, stype, _version, index, body) = decode_header(raw)?;
        if mtype != MainType::Content {
            return Err(IsccError::InvalidType(format!(
                "mixing requires Content-Codes, got {mtype:?}"
            )));
        }
        if decode_length(mtype, index, stype) < bits {
            return Err(IsccError::InvalidType(format!(
                "Content-Code shorter than the requested {bits} bits"
            )));
        }

        let mut entry = Vec::with_capacity(nbytes);
        entry.push(raw[0]);
        let take = (nbytes - 1).min(body.len());
        entry.extend_from_slice(&body[..take]);
        entry.resize(nbytes, 0);
        entries.push(entry);
    }

    iscc_algo::alg_simhash(&entries)
}

/// Generate a Mixed-Code from two or more Content-Code strings.
///
/// Inputs may carry the `ISCC:` prefix; they are echoed back unchanged in
/// the result. Every input must be a Content-Code at least `bits` long.
pub fn gen_mixed_code_v0(codes: &[impl AsRef<str>], bits: u32) -> IsccResult<MixedCode> {
    let raw_codes: Vec<Vec<u8>> = codes
        .iter()
        .map(|code| decode_base32(&iscc_clean(code.as_ref())))
        .collect::<IsccResult<_>>()?;

    let digest = soft_hash_codes(&raw_codes, bits)?;
    let code = encode_unit(MainType::Content, SubType::Mixed, Version::V0, bits, &digest)?;

    Ok(MixedCode {
        iscc: format!("ISCC:{code}"),
        parts: codes.iter().map(|s| s.as_ref().to_string()).collect(),
    })
}
