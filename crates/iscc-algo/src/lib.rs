//! ISCC Algo - similarity-preserving hash primitives.
//!
//! The leaf algorithms composed by the ISCC unit generators:
//! - [`xxh32`] - canonical 32-bit xxHash with seed
//! - [`alg_dct`] - fast recursive type-II DCT
//! - [`alg_simhash`] - majority-vote bit aggregation
//! - [`alg_minhash_256`] - 64-permutation MinHash digest
//! - [`alg_wtahash`] - winner-take-all hash over frame signature sums
//!
//! All functions are pure; fixed permutation tables are compile-time
//! constants.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod dct;
pub mod minhash;
pub mod simhash;
pub mod wtahash;
pub mod xxh32;

pub use dct::alg_dct;
pub use minhash::alg_minhash_256;
pub use simhash::{alg_simhash, sliding_window, sliding_window_bytes};
pub use wtahash::{alg_wtahash, WTA_VECTOR_LEN};
pub use xxh32::xxh32;
