//! Unit encoding, decoding, and composite decomposition.
//!
//! An ISCC-UNIT is `base32(header || digest)`. A composite ISCC-CODE packs
//! several unit digests behind a single header; [`iscc_decompose`] expands
//! it back into standalone units. Input strings may carry the `ISCC:`
//! prefix and dash separators in any letter case.

use tracing::trace;

use crate::base::{decode_base32, encode_base32};
use crate::error::{IsccError, IsccResult};
use crate::header::{
    decode_header, decode_length, decode_units, encode_header, encode_length, MainType, SubType,
    Version,
};

/// Bytes contributed by each unit to a non-wide composite body.
const UNIT_BODY_NARROW: usize = 8;
/// Bytes contributed by each unit to a wide composite body.
const UNIT_BODY_WIDE: usize = 16;

/// Strip the optional `ISCC:` prefix (any case) and dash separators.
pub fn iscc_clean(code: &str) -> String {
    let body = match code.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("ISCC:") => &code[5..],
        _ => code,
    };
    body.replace('-', "")
}

/// Encode a single ISCC-UNIT as a base32 string (without `ISCC:` prefix).
///
/// `bits` is the digest bit length. If the digest is shorter than
/// `bits / 8` bytes the body is zero-filled on the right. Composite codes
/// are not units; passing [`MainType::Iscc`] is a type error.
pub fn encode_unit(
    mtype: MainType,
    stype: SubType,
    version: Version,
    bits: u32,
    digest: &[u8],
) -> IsccResult<String> {
    if mtype == MainType::Iscc {
        return Err(IsccError::InvalidType(
            "ISCC MainType is not a unit; use the composite assembler".into(),
        ));
    }
    let index = encode_length(mtype, bits)?;
    let nbytes = (bits / 8) as usize;
    let mut out = encode_header(mtype, stype, version, index)?;
    let take = nbytes.min(digest.len());
    out.extend_from_slice(&digest[..take]);
    out.resize(out.len() + nbytes - take, 0);
    Ok(encode_base32(&out))
}

/// Decode an ISCC string into `(MainType, SubType, Version, length-index,
/// digest)`.
///
/// The digest is exactly `bits / 8` bytes for the declared bit length;
/// shorter bodies are an encoding error.
pub fn iscc_decode(iscc: &str) -> IsccResult<(MainType, SubType, Version, u32, Vec<u8>)> {
    let raw = decode_base32(&iscc_clean(iscc))?;
    let (mtype, stype, version, index, tail) = decode_header(&raw)?;
    let nbytes = (decode_length(mtype, index, stype) / 8) as usize;
    if tail.len() < nbytes {
        return Err(IsccError::InvalidEncoding(format!(
            "truncated body: expected {nbytes} digest bytes, got {}",
            tail.len()
        )));
    }
    Ok((mtype, stype, version, index, tail[..nbytes].to_vec()))
}

/// Decompose an ISCC-CODE (or a concatenated unit sequence) into its
/// constituent ISCC-UNIT strings.
///
/// Plain units are re-encoded at their declared length and the walk
/// continues on the remaining bytes. A composite header expands into its
/// dynamic units (Meta, Semantic, Content) followed by the mandatory Data
/// and Instance units; Content/Semantic units inherit the composite
/// SubType while Meta is always `None`.
pub fn iscc_decompose(iscc_code: &str) -> IsccResult<Vec<String>> {
    let mut raw = decode_base32(&iscc_clean(iscc_code))?;
    let mut components = Vec::new();

    while !raw.is_empty() {
        let (mtype, stype, version, index, body) = decode_header(&raw)?;

        if mtype != MainType::Iscc {
            let bits = decode_length(mtype, index, stype);
            let nbytes = (bits / 8) as usize;
            if body.len() < nbytes {
                return Err(IsccError::InvalidEncoding(format!(
                    "truncated body: expected {nbytes} bytes, got {}",
                    body.len()
                )));
            }
            components.push(encode_unit(mtype, stype, version, bits, &body[..nbytes])?);
            raw = body[nbytes..].to_vec();
            continue;
        }

        let units = decode_units(index)?;
        let wide = stype == SubType::Wide;
        trace!(?units, wide, "expanding composite");

        if wide {
            if body.len() < 2 * UNIT_BODY_WIDE {
                return Err(IsccError::InvalidEncoding(format!(
                    "truncated body: expected 32 bytes, got {}",
                    body.len()
                )));
            }
            components.push(encode_unit(
                MainType::Data,
                SubType::None,
                version,
                128,
                &body[..UNIT_BODY_WIDE],
            )?);
            components.push(encode_unit(
                MainType::Instance,
                SubType::None,
                version,
                128,
                &body[UNIT_BODY_WIDE..2 * UNIT_BODY_WIDE],
            )?);
            break;
        }

        let expected = (units.len() + 2) * UNIT_BODY_NARROW;
        if body.len() < expected {
            return Err(IsccError::InvalidEncoding(format!(
                "truncated body: expected {expected} bytes, got {}",
                body.len()
            )));
        }

        for (idx, unit) in units.iter().enumerate() {
            let unit_stype = if *unit == MainType::Meta {
                SubType::None
            } else {
                stype
            };
            let start = idx * UNIT_BODY_NARROW;
            components.push(encode_unit(
                *unit,
                unit_stype,
                version,
                64,
                &body[start..start + UNIT_BODY_NARROW],
            )?);
        }

        let tail = &body[body.len() - 2 * UNIT_BODY_NARROW..];
        components.push(encode_unit(
            MainType::Data,
            SubType::None,
            version,
            64,
            &tail[..UNIT_BODY_NARROW],
        )?);
        components.push(encode_unit(
            MainType::Instance,
            SubType::None,
            version,
            64,
            &tail[UNIT_BODY_NARROW..],
        )?);
        break;
    }

    Ok(components)
}
