//! Structured results returned by the `gen_*_v0` functions.
//!
//! Every generator returns the ISCC string plus whatever side outputs the
//! operation produces (normalized metadata, content hash, file size, ...).
//! The structs serialize to the same JSON shape the conformance corpus
//! uses for expected outputs.

use serde::Serialize;

/// Result of [`gen_meta_code_v0`](crate::gen_meta_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct MetaCode {
    /// ISCC string, e.g. `ISCC:AAAZXZ6OU74YAZIM`.
    pub iscc: String,
    /// Name after clean / newline removal / 128-byte trim.
    pub name: String,
    /// Description after clean / 4096-byte trim; absent when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Metadata echoed back as a data-URL; absent when no meta was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// BLAKE3 multihash (hex) of the metadata payload or normalized text.
    pub metahash: String,
}

/// Result of [`gen_text_code_v0`](crate::gen_text_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct TextCode {
    /// ISCC string.
    pub iscc: String,
    /// Character count of the collapsed text.
    pub characters: usize,
}

/// Result of [`gen_image_code_v0`](crate::gen_image_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ImageCode {
    /// ISCC string.
    pub iscc: String,
}

/// Result of [`gen_audio_code_v0`](crate::gen_audio_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct AudioCode {
    /// ISCC string.
    pub iscc: String,
}

/// Result of [`gen_video_code_v0`](crate::gen_video_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct VideoCode {
    /// ISCC string.
    pub iscc: String,
}

/// Result of [`gen_mixed_code_v0`](crate::gen_mixed_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct MixedCode {
    /// ISCC string.
    pub iscc: String,
    /// The input Content-Codes, passed through unchanged.
    pub parts: Vec<String>,
}

/// Result of [`gen_data_code_v0`](crate::gen_data_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct DataCode {
    /// ISCC string.
    pub iscc: String,
}

/// Result of [`gen_instance_code_v0`](crate::gen_instance_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct InstanceCode {
    /// ISCC string.
    pub iscc: String,
    /// BLAKE3 multihash (hex) of the full byte stream.
    pub datahash: String,
    /// Stream length in bytes.
    pub filesize: u64,
}

/// Result of [`gen_iscc_code_v0`](crate::gen_iscc_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct IsccCode {
    /// Composite ISCC string, e.g. `ISCC:KACYPXW445FTYNJ3...`.
    pub iscc: String,
}

/// Result of [`gen_sum_code_v0`](crate::gen_sum_code_v0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SumCode {
    /// Composite Data+Instance ISCC string.
    pub iscc: String,
    /// BLAKE3 multihash (hex) of the full byte stream.
    pub datahash: String,
    /// Stream length in bytes.
    pub filesize: u64,
}
