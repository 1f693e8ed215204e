//! Conformance selftest against the embedded vector corpus.
//!
//! The corpus is a JSON document of the shape
//! `{ function: { case: { inputs: [...], outputs: {...} } } }`. Byte
//! streams are encoded as `"stream:<hex>"`. The selftest runs every
//! vector through the public generators and compares all expected
//! outputs bit-exact. Failures are logged, never panicked.

use serde_json::Value;
use tracing::error;

use crate::{
    gen_audio_code_v0, gen_data_code_v0, gen_image_code_v0, gen_instance_code_v0,
    gen_iscc_code_v0, gen_meta_code_v0, gen_mixed_code_v0, gen_text_code_v0, gen_video_code_v0,
};

/// Embedded conformance vectors.
const TEST_DATA: &str = include_str!("../data/data.json");

/// Raw JSON text of the embedded conformance corpus.
pub fn conformance_data() -> &'static str {
    TEST_DATA
}

/// Decode a `"stream:<hex>"` corpus input into bytes.
fn decode_stream(value: &Value) -> Option<Vec<u8>> {
    let hex_data = value.as_str()?.strip_prefix("stream:")?;
    hex::decode(hex_data).ok()
}

/// Compare a produced value against an expected corpus output.
fn check<T: PartialEq + std::fmt::Debug>(
    func: &str,
    case: &str,
    field: &str,
    got: T,
    want: T,
) -> bool {
    if got == want {
        true
    } else {
        error!(%func, %case, %field, ?got, ?want, "conformance mismatch");
        false
    }
}

/// Run every embedded conformance vector; `true` iff all pass.
pub fn conformance_selftest() -> bool {
    let data: Value = match serde_json::from_str(TEST_DATA) {
        Ok(value) => value,
        Err(e) => {
            error!("cannot parse conformance corpus: {e}");
            return false;
        }
    };

    let mut passed = true;
    passed &= run_section(&data, "gen_meta_code_v0", run_meta_case);
    passed &= run_section(&data, "gen_text_code_v0", run_text_case);
    passed &= run_section(&data, "gen_image_code_v0", run_image_case);
    passed &= run_section(&data, "gen_audio_code_v0", run_audio_case);
    passed &= run_section(&data, "gen_video_code_v0", run_video_case);
    passed &= run_section(&data, "gen_mixed_code_v0", run_mixed_case);
    passed &= run_section(&data, "gen_data_code_v0", run_data_case);
    passed &= run_section(&data, "gen_instance_code_v0", run_instance_case);
    passed &= run_section(&data, "gen_iscc_code_v0", run_iscc_case);
    passed
}

/// Run one corpus section through a per-case handler.
fn run_section(data: &Value, func: &str, run_case: fn(&str, &str, &Value) -> Option<bool>) -> bool {
    let Some(cases) = data[func].as_object() else {
        error!(%func, "section missing from conformance corpus");
        return false;
    };

    let mut passed = true;
    for (case, vector) in cases {
        match run_case(func, case, vector) {
            Some(true) => {}
            Some(false) => passed = false,
            None => {
                error!(%func, %case, "cannot parse test inputs");
                passed = false;
            }
        }
    }
    passed
}

fn run_meta_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let name = inputs[0].as_str()?;
    let description = inputs[1].as_str()?;
    let description = (!description.is_empty()).then_some(description);
    let meta: Option<String> = match &inputs[2] {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        object @ Value::Object(_) => serde_json::to_string(object).ok(),
        _ => return None,
    };
    let bits = inputs[3].as_u64()? as u32;
    let outputs = &vector["outputs"];

    let result = match gen_meta_code_v0(name, description, meta.as_deref(), bits) {
        Ok(result) => result,
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            return Some(false);
        }
    };

    let mut ok = check(func, case, "iscc", result.iscc.as_str(), outputs["iscc"].as_str()?);
    ok &= check(
        func,
        case,
        "metahash",
        result.metahash.as_str(),
        outputs["metahash"].as_str()?,
    );
    if let Some(want) = outputs.get("name").and_then(Value::as_str) {
        ok &= check(func, case, "name", result.name.as_str(), want);
    }
    if let Some(want) = outputs.get("description").and_then(Value::as_str) {
        ok &= check(func, case, "description", result.description.as_deref(), Some(want));
    }
    if let Some(want) = outputs.get("meta").and_then(Value::as_str) {
        ok &= check(func, case, "meta", result.meta.as_deref(), Some(want));
    }
    Some(ok)
}

fn run_text_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let text = inputs[0].as_str()?;
    let bits = inputs[1].as_u64()? as u32;
    let outputs = &vector["outputs"];

    let result = match gen_text_code_v0(text, bits) {
        Ok(result) => result,
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            return Some(false);
        }
    };

    let mut ok = check(func, case, "iscc", result.iscc.as_str(), outputs["iscc"].as_str()?);
    ok &= check(
        func,
        case,
        "characters",
        result.characters as u64,
        outputs["characters"].as_u64()?,
    );
    Some(ok)
}

fn run_image_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let pixels: Vec<u8> = inputs[0]
        .as_array()?
        .iter()
        .map(|v| v.as_u64().map(|n| n as u8))
        .collect::<Option<_>>()?;
    let bits = inputs[1].as_u64()? as u32;

    match gen_image_code_v0(&pixels, bits) {
        Ok(result) => Some(check(
            func,
            case,
            "iscc",
            result.iscc.as_str(),
            vector["outputs"]["iscc"].as_str()?,
        )),
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            Some(false)
        }
    }
}

fn run_audio_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let cv: Vec<i32> = inputs[0]
        .as_array()?
        .iter()
        .map(|v| v.as_i64().map(|n| n as i32))
        .collect::<Option<_>>()?;
    let bits = inputs[1].as_u64()? as u32;

    match gen_audio_code_v0(&cv, bits) {
        Ok(result) => Some(check(
            func,
            case,
            "iscc",
            result.iscc.as_str(),
            vector["outputs"]["iscc"].as_str()?,
        )),
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            Some(false)
        }
    }
}

fn run_video_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let frames: Vec<Vec<i32>> = inputs[0]
        .as_array()?
        .iter()
        .map(|frame| {
            frame
                .as_array()?
                .iter()
                .map(|v| v.as_i64().map(|n| n as i32))
                .collect::<Option<Vec<i32>>>()
        })
        .collect::<Option<_>>()?;
    let bits = inputs[1].as_u64()? as u32;

    match gen_video_code_v0(&frames, bits) {
        Ok(result) => Some(check(
            func,
            case,
            "iscc",
            result.iscc.as_str(),
            vector["outputs"]["iscc"].as_str()?,
        )),
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            Some(false)
        }
    }
}

fn run_mixed_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let codes: Vec<&str> = inputs[0]
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect::<Option<_>>()?;
    let bits = inputs[1].as_u64()? as u32;
    let outputs = &vector["outputs"];

    let result = match gen_mixed_code_v0(&codes, bits) {
        Ok(result) => result,
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            return Some(false);
        }
    };

    let mut ok = check(func, case, "iscc", result.iscc.as_str(), outputs["iscc"].as_str()?);
    if let Some(parts) = outputs.get("parts").and_then(Value::as_array) {
        let want: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
        ok &= check(func, case, "parts", result.parts.clone(),
            want.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }
    Some(ok)
}

fn run_data_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let stream = decode_stream(&inputs[0])?;
    let bits = inputs[1].as_u64()? as u32;

    match gen_data_code_v0(&stream, bits) {
        Ok(result) => Some(check(
            func,
            case,
            "iscc",
            result.iscc.as_str(),
            vector["outputs"]["iscc"].as_str()?,
        )),
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            Some(false)
        }
    }
}

fn run_instance_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let stream = decode_stream(&inputs[0])?;
    let bits = inputs[1].as_u64()? as u32;
    let outputs = &vector["outputs"];

    let result = match gen_instance_code_v0(&stream, bits) {
        Ok(result) => result,
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            return Some(false);
        }
    };

    let mut ok = check(func, case, "iscc", result.iscc.as_str(), outputs["iscc"].as_str()?);
    ok &= check(
        func,
        case,
        "datahash",
        result.datahash.as_str(),
        outputs["datahash"].as_str()?,
    );
    ok &= check(func, case, "filesize", result.filesize, outputs["filesize"].as_u64()?);
    Some(ok)
}

fn run_iscc_case(func: &str, case: &str, vector: &Value) -> Option<bool> {
    let inputs = vector["inputs"].as_array()?;
    let codes: Vec<&str> = inputs[0]
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect::<Option<_>>()?;

    match gen_iscc_code_v0(&codes, false) {
        Ok(result) => Some(check(
            func,
            case,
            "iscc",
            result.iscc.as_str(),
            vector["outputs"]["iscc"].as_str()?,
        )),
        Err(e) => {
            error!(%func, %case, "generator failed: {e}");
            Some(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selftest_passes() {
        assert!(conformance_selftest());
    }

    #[test]
    fn test_corpus_has_all_sections() {
        let data: Value = serde_json::from_str(conformance_data()).unwrap();
        for func in [
            "gen_meta_code_v0",
            "gen_text_code_v0",
            "gen_image_code_v0",
            "gen_audio_code_v0",
            "gen_video_code_v0",
            "gen_mixed_code_v0",
            "gen_data_code_v0",
            "gen_instance_code_v0",
            "gen_iscc_code_v0",
        ] {
            let section = data[func].as_object().unwrap();
            assert!(!section.is_empty(), "{func} has no vectors");
        }
    }
}
