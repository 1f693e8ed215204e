//! Streaming hashers for incremental Data-, Instance-, and Sum-Code
//! generation.
//!
//! Each hasher follows `new -> update* -> finalize`. Finalize consumes the
//! internal state; any use afterwards fails with
//! [`IsccError::AlreadyFinalized`]. For identical input bytes the
//! streaming results are bit-identical to the one-shot `gen_*_v0`
//! functions regardless of how the stream is fragmented.

use tracing::debug;

use iscc_core::hash::{multihash_from_digest, Blake3Hasher};
use iscc_core::{encode_unit, IsccError, IsccResult, MainType, SubType, Version};

use crate::composite::gen_iscc_code_v0;
use crate::results::{DataCode, InstanceCode, SumCode};
use crate::DATA_AVG_CHUNK_SIZE;

/// Streaming Data-Code hasher (CDC + xxh32 + MinHash).
///
/// The last CDC chunk of every update is held back in a tail buffer: more
/// data may still merge into it, so it is only hashed once the next chunk
/// boundary (or finalize) proves it complete. This keeps the chunk
/// sequence identical to a single-shot pass over the whole stream.
pub struct DataHasher {
    state: Option<DataState>,
}

struct DataState {
    features: Vec<u32>,
    tail: Vec<u8>,
}

impl DataHasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            state: Some(DataState {
                features: Vec::new(),
                tail: Vec::new(),
            }),
        }
    }

    /// Feeds more data into the hasher.
    pub fn update(&mut self, data: &[u8]) -> IsccResult<()> {
        let state = self.state.as_mut().ok_or(IsccError::AlreadyFinalized)?;
        state.tail.extend_from_slice(data);

        let mut consumed = 0;
        {
            let chunks = iscc_cdc::chunks(&state.tail, false, DATA_AVG_CHUNK_SIZE);
            for chunk in &chunks[..chunks.len() - 1] {
                state.features.push(iscc_algo::xxh32(chunk, 0));
                consumed += chunk.len();
            }
        }

        // Shift the retained tail chunk to the front, keeping capacity.
        state.tail.copy_within(consumed.., 0);
        let new_len = state.tail.len() - consumed;
        state.tail.truncate(new_len);
        Ok(())
    }

    /// Finalizes the stream into a Data-Code of `bits` length.
    pub fn finalize(&mut self, bits: u32) -> IsccResult<DataCode> {
        let mut state = self.state.take().ok_or(IsccError::AlreadyFinalized)?;
        if !state.tail.is_empty() {
            state.features.push(iscc_algo::xxh32(&state.tail, 0));
        } else if state.features.is_empty() {
            // Empty stream: MinHash still needs one feature.
            state.features.push(iscc_algo::xxh32(&[], 0));
        }
        debug!(features = state.features.len(), "finalizing data hash");

        let digest = iscc_algo::alg_minhash_256(&state.features);
        let code = encode_unit(MainType::Data, SubType::None, Version::V0, bits, &digest)?;
        Ok(DataCode {
            iscc: format!("ISCC:{code}"),
        })
    }
}

impl Default for DataHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming Instance-Code hasher (BLAKE3 over the exact byte stream).
pub struct InstanceHasher {
    state: Option<InstanceState>,
}

struct InstanceState {
    hasher: Blake3Hasher,
    filesize: u64,
}

impl InstanceHasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            state: Some(InstanceState {
                hasher: Blake3Hasher::new(),
                filesize: 0,
            }),
        }
    }

    /// Feeds more data into the hasher.
    pub fn update(&mut self, data: &[u8]) -> IsccResult<()> {
        let state = self.state.as_mut().ok_or(IsccError::AlreadyFinalized)?;
        state.hasher.update(data);
        state.filesize += data.len() as u64;
        Ok(())
    }

    /// Finalizes the stream into an Instance-Code of `bits` length.
    pub fn finalize(&mut self, bits: u32) -> IsccResult<InstanceCode> {
        let state = self.state.take().ok_or(IsccError::AlreadyFinalized)?;
        let digest = state.hasher.finalize();
        let code = encode_unit(MainType::Instance, SubType::None, Version::V0, bits, &digest)?;
        Ok(InstanceCode {
            iscc: format!("ISCC:{code}"),
            datahash: multihash_from_digest(&digest),
            filesize: state.filesize,
        })
    }
}

impl Default for InstanceHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming Sum-Code hasher: Data- and Instance-Code in one pass,
/// assembled into a two-unit composite.
pub struct SumHasher {
    data: DataHasher,
    instance: InstanceHasher,
}

impl SumHasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            data: DataHasher::new(),
            instance: InstanceHasher::new(),
        }
    }

    /// Feeds more data into both underlying hashers.
    pub fn update(&mut self, data: &[u8]) -> IsccResult<()> {
        self.data.update(data)?;
        self.instance.update(data)
    }

    /// Finalizes into a Data+Instance composite.
    ///
    /// Wide mode requires 128-bit unit bodies, so the units are generated
    /// at 128 bits when `wide` is set and at `bits` otherwise.
    pub fn finalize(&mut self, bits: u32, wide: bool) -> IsccResult<SumCode> {
        let unit_bits = if wide { 128 } else { bits };
        let data = self.data.finalize(unit_bits)?;
        let instance = self.instance.finalize(unit_bits)?;
        let composite = gen_iscc_code_v0(&[&data.iscc, &instance.iscc], wide)?;
        Ok(SumCode {
            iscc: composite.iscc,
            datahash: instance.datahash,
            filesize: instance.filesize,
        })
    }
}

impl Default for SumHasher {
    fn default() -> Self {
        Self::new()
    }
}
