//! Error taxonomy shared by every crate in the workspace.
//!
//! All fallible public operations return [`IsccResult`]. The variants map
//! one-to-one onto the failure classes of ISO 24138 processing: domain
//! violations, malformed serialized forms, type-level inconsistencies, and
//! streaming-hasher misuse.

use thiserror::Error;

/// Result alias for all ISCC operations.
pub type IsccResult<T> = Result<T, IsccError>;

/// Errors surfaced by the public ISCC API.
///
/// Messages are short and stable so they can be asserted on in tests and
/// logged without localization concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IsccError {
    /// An input value is outside the domain of the requested operation
    /// (bad bit length, wrong pixel count, empty frame list, malformed
    /// JSON metadata, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A serialized form could not be parsed (base32 failure, truncated
    /// header bitstream, invalid varnibble prefix, truncated body).
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A well-formed value carries inconsistent or out-of-range type
    /// information (unknown MainType/SubType, unsupported version, unit
    /// mixing violations).
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A streaming hasher was used after `finalize` consumed its state.
    #[error("hasher already finalized")]
    AlreadyFinalized,
}
