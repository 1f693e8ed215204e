//! Shared helpers for the integration test suite.

use std::sync::Once;

use serde_json::Value;

/// Initialize tracing once for the whole test binary.
///
/// Output goes through the test writer so it interleaves with captured
/// test output; the filter honors `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Parsed conformance corpus.
pub fn corpus() -> Value {
    serde_json::from_str(iscc_codes::conformance_data()).expect("corpus must parse")
}

/// Decode a `"stream:<hex>"` corpus input.
pub fn stream_bytes(value: &Value) -> Vec<u8> {
    let text = value.as_str().expect("stream input must be a string");
    let hex_data = text.strip_prefix("stream:").expect("missing stream prefix");
    hex::decode(hex_data).expect("stream hex must decode")
}

/// Deterministic pseudo-random bytes for property tests.
pub fn lcg_bytes(n: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}
