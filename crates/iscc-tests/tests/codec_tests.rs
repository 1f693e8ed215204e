//! Codec round-trip and decomposition scenarios across crate boundaries.

use iscc_core::{
    decode_base32, decode_length, encode_base32, encode_unit, iscc_clean, iscc_decode,
    iscc_decompose, IsccError, MainType, SubType, Version,
};
use iscc_tests::{init_tracing, lcg_bytes};

#[test]
fn unit_encode_decode_roundtrip_all_types_and_lengths() {
    init_tracing();
    let digest = lcg_bytes(32, 0xA11CE);
    // Every MainType except the composite, which is not a unit.
    for tag in [0u8, 1, 2, 3, 4, 6, 7] {
        let mtype = MainType::try_from(tag).unwrap();
        let lengths: Vec<u32> = if mtype == MainType::Id {
            (64..=96).step_by(8).collect()
        } else {
            (32..=256).step_by(32).collect()
        };
        for bits in lengths {
            let code = encode_unit(mtype, SubType::None, Version::V0, bits, &digest).unwrap();
            let (m, s, v, index, body) = iscc_decode(&code).unwrap();
            assert_eq!(m, mtype);
            assert_eq!(s, SubType::None);
            assert_eq!(v, Version::V0);
            assert_eq!(decode_length(m, index, s), bits);
            assert_eq!(body, digest[..(bits / 8) as usize]);
        }
    }
}

#[test]
fn base32_roundtrips_arbitrary_bytes() {
    for len in 0..64 {
        let data = lcg_bytes(len, len as u64 + 1);
        let encoded = encode_base32(&data);
        assert_eq!(decode_base32(&encoded).unwrap(), data);
    }
}

#[test]
fn decompose_known_composite() {
    let units =
        iscc_decompose("ISCC:KACYPXW445FTYNJ3CYSXHAFJMA2HUWULUNRFE3BLHRSCXYH2M5AEGQY").unwrap();
    assert_eq!(units[0], "AAAYPXW445FTYNJ3");
    let types: Vec<MainType> = units.iter().map(|u| iscc_decode(u).unwrap().0).collect();
    assert_eq!(
        types,
        vec![
            MainType::Meta,
            MainType::Content,
            MainType::Data,
            MainType::Instance
        ]
    );
}

#[test]
fn decompose_accepts_prefix_dashes_and_lowercase() {
    let canonical = iscc_decompose("ISCC:KACYPXW445FTYNJ3CYSXHAFJMA2HUWULUNRFE3BLHRSCXYH2M5AEGQY")
        .unwrap();
    let dashed = iscc_decompose("ISCC:KACY-PXW4-45FT-YNJ3CYSXHAFJMA2HUWULUNRFE3BLHRSCXYH2M5AEGQY")
        .unwrap();
    let lower = iscc_decompose("iscc:kacypxw445ftynj3cysxhafjma2huwulunrfe3blhrscxyh2m5aegqy")
        .unwrap();
    assert_eq!(canonical, dashed);
    assert_eq!(canonical, lower);
}

#[test]
fn decompose_concatenated_unit_sequence() {
    // Two standalone units base32-encoded as one byte string decompose
    // back into both units.
    let a = encode_unit(MainType::Data, SubType::None, Version::V0, 64, &lcg_bytes(8, 1)).unwrap();
    let b =
        encode_unit(MainType::Instance, SubType::None, Version::V0, 64, &lcg_bytes(8, 2)).unwrap();
    let mut raw = decode_base32(&a).unwrap();
    raw.extend(decode_base32(&b).unwrap());
    let joined = encode_base32(&raw);

    let units = iscc_decompose(&joined).unwrap();
    assert_eq!(units, vec![a, b]);
}

#[test]
fn wide_composite_decomposes_into_128_bit_units() {
    let data = iscc_codes::gen_data_code_v0(b"hello world", 256).unwrap().iscc;
    let instance = iscc_codes::gen_instance_code_v0(b"hello world", 256)
        .unwrap()
        .iscc;
    let wide = iscc_codes::gen_iscc_code_v0(&[&data, &instance], true).unwrap();

    let units = iscc_decompose(&wide.iscc).unwrap();
    assert_eq!(units.len(), 2);
    for (unit, want_type) in units.iter().zip([MainType::Data, MainType::Instance]) {
        let (mtype, stype, _, index, digest) = iscc_decode(unit).unwrap();
        assert_eq!(mtype, want_type);
        assert_eq!(stype, SubType::None);
        assert_eq!(decode_length(mtype, index, stype), 128);
        assert_eq!(digest.len(), 16);
    }
}

#[test]
fn composite_assemble_then_decompose_is_identity() {
    // A canonically sorted 64-bit unit list survives assemble/decompose
    // unchanged.
    let meta = iscc_codes::gen_meta_code_v0("Round Trip", None, None, 64)
        .unwrap()
        .iscc;
    let text = iscc_codes::gen_text_code_v0("round trip text", 64).unwrap().iscc;
    let data = iscc_codes::gen_data_code_v0(b"round trip", 64).unwrap().iscc;
    let instance = iscc_codes::gen_instance_code_v0(b"round trip", 64)
        .unwrap()
        .iscc;

    let inputs = [&meta, &text, &data, &instance];
    let composite = iscc_codes::gen_iscc_code_v0(&inputs, false).unwrap();
    let units = iscc_decompose(&composite.iscc).unwrap();

    let stripped: Vec<String> = inputs.iter().map(|c| iscc_clean(c)).collect();
    assert_eq!(units, stripped);
}

#[test]
fn decode_reports_error_taxonomy() {
    // Base32 garbage.
    assert!(matches!(
        iscc_decode("ISCC:!@#$"),
        Err(IsccError::InvalidEncoding(_))
    ));
    // Truncated: header promises 8 body bytes, none present.
    let short = encode_base32(&[0x00, 0x01]);
    assert!(matches!(
        iscc_decode(&short),
        Err(IsccError::InvalidEncoding(_))
    ));
    // Version other than zero.
    let bad_version = encode_base32(&[0x00, 0x11, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert!(matches!(
        iscc_decode(&bad_version),
        Err(IsccError::InvalidType(_))
    ));
}
