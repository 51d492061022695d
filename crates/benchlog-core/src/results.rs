//! Result files written by benchmark runners.
//!
//! A result file is a JSON array of measurements in the custom tool format:
//! `[{"name": ..., "unit": ..., "value": ..., "extra": ...}, ...]`. Runners
//! that profile several configurations extend the same file once per
//! configuration before the whole array is turned into a single run.

use serde_json::Value;

use crate::types::Measurement;
use crate::CoreError;

pub fn parse_results(text: &str) -> Result<Vec<Measurement>, CoreError> {
    let values: Vec<Value> = serde_json::from_str(text)
        .map_err(|e| CoreError::InvalidRun(format!("result file is not a JSON array: {e}")))?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| parse_result(i, value))
        .collect()
}

fn parse_result(i: usize, value: Value) -> Result<Measurement, CoreError> {
    for (field, ok) in [
        ("name", value.get("name").is_some_and(Value::is_string)),
        ("unit", value.get("unit").is_some_and(Value::is_string)),
        ("value", value.get("value").is_some_and(Value::is_number)),
    ] {
        if !ok {
            let kind = if field == "value" { "number" } else { "string" };
            return Err(CoreError::InvalidRun(format!(
                "result {i}: `{field}` must be a {kind}"
            )));
        }
    }
    serde_json::from_value(value).map_err(|e| CoreError::InvalidRun(format!("result {i}: {e}")))
}

/// Append `new` to the measurements already in `existing` and render the
/// combined array.
pub fn merge_results(existing: Option<&str>, new: &[Measurement]) -> Result<String, CoreError> {
    let mut all = match existing {
        Some(text) if !text.trim().is_empty() => parse_results(text)?,
        _ => Vec::new(),
    };
    all.extend_from_slice(new);
    serde_json::to_string(&all).map_err(|e| CoreError::Serialization(e.to_string()))
}
