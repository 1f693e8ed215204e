//! Self-describing ISCC header: type enums and the varnibble bit codec.
//!
//! Every ISCC code starts with four variable-length nibble-aligned fields
//! (MainType, SubType, Version, length index), concatenated big-endian and
//! zero-padded to the next byte boundary. The varnibble encoding spends one
//! unary prefix bit per extra nibble:
//!
//! | Range      | Bits               | Width |
//! |------------|--------------------|-------|
//! | 0..=7      | `0xxx`             | 4     |
//! | 8..=71     | `10xxxxxx`         | 8     |
//! | 72..=583   | `110xxxxxxxxx`     | 12    |
//! | 584..=4679 | `1110xxxxxxxxxxxx` | 16    |

use crate::error::{IsccError, IsccResult};

/// Primary kind of an ISCC code.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MainType {
    /// Meta-Code: similarity hash over normalized metadata.
    Meta = 0,
    /// Semantic-Code: reserved for semantic feature hashes.
    Semantic = 1,
    /// Content-Code: per-media perceptual hash.
    Content = 2,
    /// Data-Code: CDC + MinHash over raw bytes.
    Data = 3,
    /// Instance-Code: cryptographic digest of the exact byte stream.
    Instance = 4,
    /// Composite ISCC-CODE aggregating several units.
    Iscc = 5,
    /// Short identifier issued by a registry.
    Id = 6,
    /// Decentralized time-sortable identifier.
    Flake = 7,
}

impl MainType {
    /// Integer tag as stored in the header.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MainType {
    type Error = IsccError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Meta),
            1 => Ok(Self::Semantic),
            2 => Ok(Self::Content),
            3 => Ok(Self::Data),
            4 => Ok(Self::Instance),
            5 => Ok(Self::Iscc),
            6 => Ok(Self::Id),
            7 => Ok(Self::Flake),
            _ => Err(IsccError::InvalidType(format!("invalid MainType: {value}"))),
        }
    }
}

/// Secondary kind of an ISCC code; interpretation depends on the MainType.
///
/// For Content-Codes and Semantic-Codes the value 0 means "text" (see
/// [`SubType::TEXT`]); for composite ISCC-CODEs values 5..=7 describe the
/// aggregation mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubType {
    /// No specific subtype; aliases text content in Content context.
    None = 0,
    /// Image content.
    Image = 1,
    /// Audio content.
    Audio = 2,
    /// Video content.
    Video = 3,
    /// Mixed content (combined Content-Codes).
    Mixed = 4,
    /// Composite of exactly the two mandatory units.
    Sum = 5,
    /// Composite with optional units but no common content subtype.
    IsccNone = 6,
    /// Composite with 128-bit Data and Instance bodies.
    Wide = 7,
}

impl SubType {
    /// Alias for [`SubType::None`] in Content/Semantic context.
    pub const TEXT: Self = Self::None;

    /// Integer tag as stored in the header.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SubType {
    type Error = IsccError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Image),
            2 => Ok(Self::Audio),
            3 => Ok(Self::Video),
            4 => Ok(Self::Mixed),
            5 => Ok(Self::Sum),
            6 => Ok(Self::IsccNone),
            7 => Ok(Self::Wide),
            _ => Err(IsccError::InvalidType(format!("invalid SubType: {value}"))),
        }
    }
}

/// ISCC algorithm version. `V0` is the only value defined by the standard.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Version {
    /// Version 0.
    #[default]
    V0 = 0,
}

impl Version {
    /// Integer tag as stored in the header.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Version {
    type Error = IsccError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::V0),
            _ => Err(IsccError::InvalidType(format!("invalid Version: {value}"))),
        }
    }
}

/// Largest value representable as a varnibble.
pub const VARNIBBLE_MAX: u32 = 4679;

/// Encode `value` as a varnibble, returning `(bits, width)` with the bit
/// pattern right-aligned in the `u64`.
fn encode_varnibble(value: u32) -> IsccResult<(u64, u32)> {
    match value {
        0..=7 => Ok((value as u64, 4)),
        8..=71 => Ok(((0b10u64 << 6) | (value - 8) as u64, 8)),
        72..=583 => Ok(((0b110u64 << 9) | (value - 72) as u64, 12)),
        584..=4679 => Ok(((0b1110u64 << 12) | (value - 584) as u64, 16)),
        _ => Err(IsccError::InvalidInput(format!(
            "varnibble value out of range (0-{VARNIBBLE_MAX}): {value}"
        ))),
    }
}

/// Read the bit at absolute position `pos` (MSB-first) from `data`.
fn bit_at(data: &[u8], pos: usize) -> bool {
    (data[pos / 8] >> (7 - pos % 8)) & 1 == 1
}

/// Read `width` bits starting at `pos` as a big-endian integer.
///
/// Caller guarantees `pos + width` is within bounds.
fn read_bits(data: &[u8], pos: usize, width: usize) -> u32 {
    let mut value = 0u32;
    for i in 0..width {
        value = (value << 1) | u32::from(bit_at(data, pos + i));
    }
    value
}

/// Decode one varnibble starting at bit `pos`.
///
/// Returns the decoded value and the new bit position. The shortest valid
/// prefix wins; anything else is an encoding error.
fn read_varnibble(data: &[u8], pos: usize) -> IsccResult<(u32, usize)> {
    let total = data.len() * 8;
    let avail = total.saturating_sub(pos);
    if avail >= 4 && !bit_at(data, pos) {
        Ok((read_bits(data, pos, 4), pos + 4))
    } else if avail >= 8 && !bit_at(data, pos + 1) {
        Ok((read_bits(data, pos + 2, 6) + 8, pos + 8))
    } else if avail >= 12 && !bit_at(data, pos + 2) {
        Ok((read_bits(data, pos + 3, 9) + 72, pos + 12))
    } else if avail >= 16 && !bit_at(data, pos + 3) {
        Ok((read_bits(data, pos + 4, 12) + 584, pos + 16))
    } else if avail < 4 {
        Err(IsccError::InvalidEncoding("truncated header".into()))
    } else {
        Err(IsccError::InvalidEncoding(
            "invalid varnibble prefix or insufficient bits".into(),
        ))
    }
}

/// Encode the four header fields and zero-pad to a byte boundary.
///
/// The result is at least two bytes for in-range fields and never exceeds
/// eight bytes (four maximal varnibbles).
pub fn encode_header(
    mtype: MainType,
    stype: SubType,
    version: Version,
    length: u32,
) -> IsccResult<Vec<u8>> {
    let mut acc = 0u64;
    let mut nbits = 0u32;
    for value in [
        mtype.tag() as u32,
        stype.tag() as u32,
        version.tag() as u32,
        length,
    ] {
        let (bits, width) = encode_varnibble(value)?;
        acc = (acc << width) | bits;
        nbits += width;
    }
    let nbytes = nbits.div_ceil(8);
    // Right-pad with zero bits to the byte boundary.
    acc <<= nbytes * 8 - nbits;
    let be = acc.to_be_bytes();
    Ok(be[8 - nbytes as usize..].to_vec())
}

/// Repack the bit range `[pos, end)` of `data` into fresh bytes, MSB-first,
/// zero-filling the final partial byte.
fn repack_bits(data: &[u8], pos: usize, end: usize) -> Vec<u8> {
    let nbits = end - pos;
    let mut out = vec![0u8; nbits.div_ceil(8)];
    for i in 0..nbits {
        if bit_at(data, pos + i) {
            out[i / 8] |= 1 << (7 - i % 8);
        }
    }
    out
}

/// Decode an ISCC header from raw bytes.
///
/// Returns `(MainType, SubType, Version, length-index, tail)` where `tail`
/// holds all bytes after the header. A four-bit zero pad between the last
/// varnibble and the byte boundary is skipped; each varnibble is a multiple
/// of four bits, so any misalignment is exactly one nibble.
pub fn decode_header(data: &[u8]) -> IsccResult<(MainType, SubType, Version, u32, Vec<u8>)> {
    let mut pos = 0;
    let (mtype_val, p) = read_varnibble(data, pos)?;
    pos = p;
    let (stype_val, p) = read_varnibble(data, pos)?;
    pos = p;
    let (version_val, p) = read_varnibble(data, pos)?;
    pos = p;
    let (length, p) = read_varnibble(data, pos)?;
    pos = p;

    if mtype_val > 7 {
        return Err(IsccError::InvalidType(format!(
            "invalid MainType: {mtype_val}"
        )));
    }
    if stype_val > 7 {
        return Err(IsccError::InvalidType(format!(
            "invalid SubType: {stype_val}"
        )));
    }
    if version_val > 0 {
        return Err(IsccError::InvalidType(format!(
            "invalid Version: {version_val}"
        )));
    }
    let mtype = MainType::try_from(mtype_val as u8)?;
    let stype = SubType::try_from(stype_val as u8)?;
    let version = Version::try_from(version_val as u8)?;

    let total = data.len() * 8;
    if pos % 8 != 0 && pos + 4 <= total && read_bits(data, pos, 4) == 0 {
        pos += 4;
    }

    let tail = if pos % 8 == 0 {
        data[pos / 8..].to_vec()
    } else {
        repack_bits(data, pos, total)
    };

    Ok((mtype, stype, version, length, tail))
}

/// Compress a digest bit length into the header length index.
///
/// The compression depends on the MainType:
/// - Meta/Semantic/Content/Data/Instance/Flake: `bits / 32 - 1`
/// - ISCC: the 0..=7 optional-unit bitfield passes through unchanged
/// - ID: `(bits - 64) / 8`
pub fn encode_length(mtype: MainType, bits: u32) -> IsccResult<u32> {
    match mtype {
        MainType::Meta
        | MainType::Semantic
        | MainType::Content
        | MainType::Data
        | MainType::Instance
        | MainType::Flake => {
            if bits >= 32 && bits % 32 == 0 && bits <= 256 {
                Ok(bits / 32 - 1)
            } else {
                Err(IsccError::InvalidInput(format!(
                    "invalid length {bits} for {mtype:?} (multiple of 32 in 32..=256)"
                )))
            }
        }
        MainType::Iscc => {
            if bits <= 7 {
                Ok(bits)
            } else {
                Err(IsccError::InvalidInput(format!(
                    "invalid length {bits} for ISCC (unit bitfield 0-7)"
                )))
            }
        }
        MainType::Id => {
            if (64..=96).contains(&bits) && (bits - 64) % 8 == 0 {
                Ok((bits - 64) / 8)
            } else {
                Err(IsccError::InvalidInput(format!(
                    "invalid length {bits} for ID (64-96, step 8)"
                )))
            }
        }
    }
}

/// Expand a header length index back into the digest bit length.
///
/// Inverse of [`encode_length`]. For composite codes the result depends on
/// the SubType: Wide composites are always 256 bits, otherwise each set
/// optional-unit bit adds 64 bits to the mandatory 128.
pub fn decode_length(mtype: MainType, index: u32, stype: SubType) -> u32 {
    match mtype {
        MainType::Meta
        | MainType::Semantic
        | MainType::Content
        | MainType::Data
        | MainType::Instance
        | MainType::Flake => (index + 1) * 32,
        MainType::Iscc => {
            if stype == SubType::Wide {
                256
            } else {
                index.count_ones() * 64 + 128
            }
        }
        MainType::Id => index * 8 + 64,
    }
}

/// Fold the optional units of a composite into the length bitfield.
///
/// Bit 0 = Content, bit 1 = Semantic, bit 2 = Meta. Data and Instance are
/// mandatory and must not appear here.
pub fn encode_units(units: &[MainType]) -> IsccResult<u32> {
    let mut field = 0u32;
    for &unit in units {
        field |= match unit {
            MainType::Content => 1,
            MainType::Semantic => 2,
            MainType::Meta => 4,
            other => {
                return Err(IsccError::InvalidType(format!(
                    "{other:?} is not an optional composite unit"
                )));
            }
        };
    }
    Ok(field)
}

/// Expand a composite length bitfield into its optional units, ascending by
/// MainType so the order matches the composite body layout.
pub fn decode_units(field: u32) -> IsccResult<Vec<MainType>> {
    if field > 7 {
        return Err(IsccError::InvalidType(format!(
            "invalid unit bitfield: {field}"
        )));
    }
    let mut units = Vec::new();
    if field & 4 != 0 {
        units.push(MainType::Meta);
    }
    if field & 2 != 0 {
        units.push(MainType::Semantic);
    }
    if field & 1 != 0 {
        units.push(MainType::Content);
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varnibble_roundtrip(value: u32) -> (u32, u32) {
        let (bits, width) = encode_varnibble(value).unwrap();
        let mut bytes = vec![0u8; 8];
        let shifted = bits << (64 - width) >> 48;
        bytes[0] = (shifted >> 8) as u8;
        bytes[1] = shifted as u8;
        let (decoded, pos) = read_varnibble(&bytes, 0).unwrap();
        (decoded, pos as u32)
    }

    #[test]
    fn test_varnibble_roundtrip_boundaries() {
        for value in [0, 1, 7, 8, 71, 72, 583, 584, 4679] {
            let (decoded, consumed) = varnibble_roundtrip(value);
            assert_eq!(decoded, value);
            let expected_width = match value {
                0..=7 => 4,
                8..=71 => 8,
                72..=583 => 12,
                _ => 16,
            };
            assert_eq!(consumed, expected_width, "width mismatch for {value}");
        }
    }

    #[test]
    fn test_varnibble_roundtrip_exhaustive() {
        for value in 0..=VARNIBBLE_MAX {
            let (decoded, _) = varnibble_roundtrip(value);
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_varnibble_out_of_range() {
        assert!(encode_varnibble(VARNIBBLE_MAX + 1).is_err());
    }

    #[test]
    fn test_encode_header_meta_64() {
        // varnibble(0) x3 + varnibble(1) = 16 bits = 2 bytes, no padding
        let header = encode_header(MainType::Meta, SubType::None, Version::V0, 1).unwrap();
        assert_eq!(header, vec![0x00, 0x01]);
    }

    #[test]
    fn test_encode_header_with_nibble_padding() {
        // varnibble(8) is 8 bits wide: 4+4+4+8 = 20 bits, padded to 24
        let header = encode_header(MainType::Meta, SubType::None, Version::V0, 8).unwrap();
        assert_eq!(header, vec![0x00, 0x08, 0x00]);
    }

    #[test]
    fn test_encode_header_data_instance() {
        let header = encode_header(MainType::Data, SubType::None, Version::V0, 1).unwrap();
        assert_eq!(header, vec![0x30, 0x01]);
        let header = encode_header(MainType::Instance, SubType::None, Version::V0, 1).unwrap();
        assert_eq!(header, vec![0x40, 0x01]);
    }

    #[test]
    fn test_decode_header_roundtrip_all_main_types() {
        for tag in 0..=7u8 {
            let mtype = MainType::try_from(tag).unwrap();
            let header = encode_header(mtype, SubType::None, Version::V0, 1).unwrap();
            let (m, s, v, l, tail) = decode_header(&header).unwrap();
            assert_eq!(m, mtype);
            assert_eq!(s, SubType::None);
            assert_eq!(v, Version::V0);
            assert_eq!(l, 1);
            assert!(tail.is_empty());
        }
    }

    #[test]
    fn test_decode_header_tail_preserved() {
        let mut data = encode_header(MainType::Content, SubType::Image, Version::V0, 3).unwrap();
        let body = [0xAA, 0xBB, 0xCC, 0xDD];
        data.extend_from_slice(&body);
        let (m, s, _, l, tail) = decode_header(&data).unwrap();
        assert_eq!(m, MainType::Content);
        assert_eq!(s, SubType::Image);
        assert_eq!(l, 3);
        assert_eq!(tail, body);
    }

    #[test]
    fn test_decode_header_skips_nibble_padding() {
        let mut data = encode_header(MainType::Meta, SubType::None, Version::V0, 8).unwrap();
        assert_eq!(data.len(), 3);
        data.extend_from_slice(&[0xFF, 0xEE]);
        let (_, _, _, l, tail) = decode_header(&data).unwrap();
        assert_eq!(l, 8);
        assert_eq!(tail, vec![0xFF, 0xEE]);
    }

    #[test]
    fn test_decode_header_rejects_bad_version() {
        // varnibble fields: mtype=0, stype=0, version=1, length=1
        let data = [0x00, 0x11];
        let err = decode_header(&data).unwrap_err();
        assert!(matches!(err, IsccError::InvalidType(_)));
    }

    #[test]
    fn test_decode_header_truncated() {
        let err = decode_header(&[0x00]).unwrap_err();
        assert!(matches!(err, IsccError::InvalidEncoding(_)));
    }

    #[test]
    fn test_encode_length_bit_lengths() {
        assert_eq!(encode_length(MainType::Meta, 32).unwrap(), 0);
        assert_eq!(encode_length(MainType::Meta, 64).unwrap(), 1);
        assert_eq!(encode_length(MainType::Content, 128).unwrap(), 3);
        assert_eq!(encode_length(MainType::Instance, 256).unwrap(), 7);
        assert!(encode_length(MainType::Meta, 48).is_err());
        assert!(encode_length(MainType::Meta, 0).is_err());
        assert!(encode_length(MainType::Data, 288).is_err());
    }

    #[test]
    fn test_encode_length_iscc_passthrough() {
        for field in 0..=7 {
            assert_eq!(encode_length(MainType::Iscc, field).unwrap(), field);
        }
        assert!(encode_length(MainType::Iscc, 8).is_err());
    }

    #[test]
    fn test_encode_length_id() {
        assert_eq!(encode_length(MainType::Id, 64).unwrap(), 0);
        assert_eq!(encode_length(MainType::Id, 96).unwrap(), 4);
        assert!(encode_length(MainType::Id, 63).is_err());
        assert!(encode_length(MainType::Id, 97).is_err());
    }

    #[test]
    fn test_decode_length_inverse() {
        for mtype in [MainType::Meta, MainType::Content, MainType::Data] {
            for bits in (32..=256).step_by(32) {
                let index = encode_length(mtype, bits).unwrap();
                assert_eq!(decode_length(mtype, index, SubType::None), bits);
            }
        }
        assert_eq!(decode_length(MainType::Iscc, 0, SubType::Wide), 256);
        assert_eq!(decode_length(MainType::Iscc, 0, SubType::Sum), 128);
        assert_eq!(decode_length(MainType::Iscc, 3, SubType::None), 256);
        assert_eq!(decode_length(MainType::Iscc, 7, SubType::IsccNone), 320);
        assert_eq!(decode_length(MainType::Id, 4, SubType::None), 96);
    }

    #[test]
    fn test_unit_bitfield_roundtrip() {
        assert_eq!(encode_units(&[]).unwrap(), 0);
        assert_eq!(encode_units(&[MainType::Content]).unwrap(), 1);
        assert_eq!(encode_units(&[MainType::Semantic]).unwrap(), 2);
        assert_eq!(encode_units(&[MainType::Meta]).unwrap(), 4);
        assert_eq!(
            encode_units(&[MainType::Meta, MainType::Semantic, MainType::Content]).unwrap(),
            7
        );
        assert!(encode_units(&[MainType::Data]).is_err());
        assert!(encode_units(&[MainType::Iscc]).is_err());

        for field in 0..=7 {
            let units = decode_units(field).unwrap();
            assert_eq!(encode_units(&units).unwrap(), field);
            let mut sorted = units.clone();
            sorted.sort();
            assert_eq!(units, sorted, "decode_units must be ascending");
        }
        assert!(decode_units(8).is_err());
    }

    #[test]
    fn test_type_constructors_reject_out_of_range() {
        assert!(MainType::try_from(8).is_err());
        assert!(SubType::try_from(8).is_err());
        assert!(Version::try_from(1).is_err());
        assert_eq!(SubType::TEXT, SubType::None);
    }
}
