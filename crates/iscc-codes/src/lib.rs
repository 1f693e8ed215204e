//! ISCC Codes - unit code generators for ISO 24138 content identifiers.
//!
//! This crate composes the codec ([`iscc_core`]), hash primitives
//! ([`iscc_algo`]), and content-defined chunking ([`iscc_cdc`]) into the
//! nine `gen_*_v0` generator functions, the streaming hashers, and the
//! conformance selftest. The full public surface of the lower crates that
//! callers commonly need (text normalization, decode/decompose) is
//! re-exported here.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod audio;
mod composite;
mod conformance;
mod data;
mod image;
mod instance;
mod meta;
mod mixed;
mod results;
mod streaming;
mod text;
mod video;

pub use audio::gen_audio_code_v0;
pub use composite::{gen_iscc_code_v0, gen_sum_code_v0};
pub use conformance::{conformance_data, conformance_selftest};
pub use data::gen_data_code_v0;
pub use image::gen_image_code_v0;
pub use instance::gen_instance_code_v0;
pub use meta::{gen_meta_code_v0, json_to_data_url};
pub use mixed::gen_mixed_code_v0;
pub use results::{
    AudioCode, DataCode, ImageCode, InstanceCode, IsccCode, MetaCode, MixedCode, SumCode,
    TextCode, VideoCode,
};
pub use streaming::{DataHasher, InstanceHasher, SumHasher};
pub use text::gen_text_code_v0;
pub use video::gen_video_code_v0;

pub use iscc_core::{
    encode_base64url_nopad, iscc_clean, iscc_decode, iscc_decompose, text_clean, text_collapse,
    text_remove_newlines, text_trim, IsccError, IsccResult, MainType, SubType, Version,
};

/// Byte budget for the normalized Meta-Code name.
pub const META_TRIM_NAME: usize = 128;

/// Byte budget for the normalized Meta-Code description.
pub const META_TRIM_DESCRIPTION: usize = 4096;

/// Character width of Text-Code n-grams.
pub const TEXT_NGRAM_SIZE: usize = 13;

/// Character width of Meta-Code name/description n-grams.
pub const META_NGRAM_SIZE_TEXT: usize = 3;

/// Byte width of Meta-Code windows over raw metadata payloads.
pub const META_NGRAM_SIZE_BYTES: usize = 4;

/// Target average CDC chunk size for Data-Code generation.
pub const DATA_AVG_CHUNK_SIZE: u32 = iscc_cdc::DEFAULT_AVG_CHUNK_SIZE;
