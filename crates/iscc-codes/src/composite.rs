//! Composite ISCC-CODE assembly.
//!
//! A composite aggregates two or more ISCC-UNITs behind one header. Data-
//! and Instance-Code are mandatory and always close the sorted unit list;
//! Meta, Semantic, and Content are optional and recorded in the header's
//! length bitfield. Each unit contributes the leading 8 body bytes (16 in
//! wide mode).

use tracing::debug;

use iscc_core::{
    decode_base32, decode_header, decode_length, encode_base32, encode_header, encode_units,
    iscc_clean, IsccError, IsccResult, MainType, SubType, Version,
};

use crate::results::{IsccCode, SumCode};
use crate::streaming::SumHasher;

/// Minimum base32 length of a composable unit (2 header + 8 body bytes).
const MIN_UNIT_CHARS: usize = 16;

type DecodedUnit = (MainType, SubType, Version, u32, Vec<u8>);

/// Generate a composite ISCC-CODE from two or more unit code strings.
///
/// Units may carry the `ISCC:` prefix and arrive in any order; they are
/// sorted by MainType. `wide` is honored only for a pure Data+Instance
/// pair whose units both carry at least 128 bits.
pub fn gen_iscc_code_v0(codes: &[impl AsRef<str>], wide: bool) -> IsccResult<IsccCode> {
    if codes.len() < 2 {
        return Err(IsccError::InvalidInput(
            "at least 2 ISCC units are required".into(),
        ));
    }

    let mut decoded: Vec<DecodedUnit> = Vec::with_capacity(codes.len());
    for code in codes {
        let cleaned = iscc_clean(code.as_ref());
        if cleaned.len() < MIN_UNIT_CHARS {
            return Err(IsccError::InvalidInput(format!(
                "ISCC unit too short (min {MIN_UNIT_CHARS} base32 chars): {cleaned}"
            )));
        }
        let raw = decode_base32(&cleaned)?;
        decoded.push(decode_header(&raw)?);
    }
    decoded.sort_by_key(|&(mtype, ..)| mtype);

    let main_types: Vec<MainType> = decoded.iter().map(|&(mtype, ..)| mtype).collect();
    if main_types[main_types.len() - 2..] != [MainType::Data, MainType::Instance] {
        return Err(IsccError::InvalidType(
            "Data-Code and Instance-Code are mandatory".into(),
        ));
    }

    let is_wide = wide
        && main_types == [MainType::Data, MainType::Instance]
        && decoded
            .iter()
            .all(|&(mtype, stype, _, index, _)| decode_length(mtype, index, stype) >= 128);

    let subtype = if is_wide {
        SubType::Wide
    } else {
        composite_subtype(&decoded)?
    };

    let optional_units = &main_types[..main_types.len() - 2];
    let unit_field = encode_units(optional_units)?;

    let body_bytes = if is_wide { 16 } else { 8 };
    let mut payload = encode_header(MainType::Iscc, subtype, Version::V0, unit_field)?;
    for (_, _, _, _, body) in &decoded {
        let take = body_bytes.min(body.len());
        payload.extend_from_slice(&body[..take]);
    }

    debug!(units = codes.len(), wide = is_wide, ?subtype, "assembled composite");
    Ok(IsccCode {
        iscc: format!("ISCC:{}", encode_base32(&payload)),
    })
}

/// SubType of a non-wide composite.
///
/// Content/Semantic units must agree on one SubType, which the composite
/// inherits. Without such units a bare Data+Instance pair is `Sum`, any
/// larger set is `IsccNone`.
fn composite_subtype(decoded: &[DecodedUnit]) -> IsccResult<SubType> {
    let content_subtypes: Vec<SubType> = decoded
        .iter()
        .filter(|&&(mtype, ..)| mtype == MainType::Semantic || mtype == MainType::Content)
        .map(|&(_, stype, ..)| stype)
        .collect();

    match content_subtypes.first() {
        Some(&first) => {
            if content_subtypes.iter().all(|&stype| stype == first) {
                Ok(first)
            } else {
                Err(IsccError::InvalidType(
                    "Content/Semantic units have mismatched SubTypes".into(),
                ))
            }
        }
        None if decoded.len() == 2 => Ok(SubType::Sum),
        None => Ok(SubType::IsccNone),
    }
}

/// Generate a Data+Instance composite directly from bytes.
///
/// One pass drives both underlying hashers; see
/// [`SumHasher`](crate::streaming::SumHasher) for the streaming form.
pub fn gen_sum_code_v0(data: &[u8], bits: u32, wide: bool) -> IsccResult<SumCode> {
    let mut hasher = SumHasher::new();
    hasher.update(data)?;
    hasher.finalize(bits, wide)
}
