//! Turning raw input into record collections
//!
//! The loader is the only place that knows about bytes. It parses with
//! simd-json when it can and falls back to serde_json so that parse errors
//! carry line/column information. Nesting depth is bounded on the raw bytes
//! before either parser runs; building a `Value` through simd-json has no
//! recursion limit of its own.

use crate::config::LoaderMode;
use crate::error::{Result, SieveError};
use serde_json::{Map, Value};
use std::io::BufRead;
use tracing::debug;

/// One element of the input collection
pub type Record = Map<String, Value>;

/// Parse a complete JSON document nested at most `max_depth` containers deep
pub fn parse_json(bytes: &[u8], max_depth: usize) -> Result<Value> {
    check_nesting(bytes, max_depth)?;

    // simd-json parses in place, so work on a scratch copy
    let mut scratch = bytes.to_vec();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_json::from_slice(bytes)?),
    }
}

/// Parse bytes and load them as a record collection
pub fn load_records(bytes: &[u8], mode: LoaderMode, max_depth: usize) -> Result<Vec<Record>> {
    let value = parse_json(bytes, max_depth)?;
    records_from_value(value, mode)
}

/// Interpret an already parsed document as a record collection
///
/// The top level must be an array. Non-object elements are dropped or
/// rejected depending on `mode`.
pub fn records_from_value(value: Value, mode: LoaderMode) -> Result<Vec<Record>> {
    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(SieveError::malformed(format!(
                "expected a JSON array at the top level, found {}",
                type_name(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(elements.len());
    for (idx, element) in elements.into_iter().enumerate() {
        match element {
            Value::Object(record) => records.push(record),
            other => match mode {
                LoaderMode::DropNonObjects => {
                    debug!(index = idx, kind = type_name(&other), "dropping non-object element");
                }
                LoaderMode::RejectNonObjects => {
                    return Err(SieveError::malformed(format!(
                        "element {} is {}, expected an object",
                        idx,
                        type_name(&other)
                    )))
                }
            },
        }
    }

    Ok(records)
}

/// Load newline-delimited JSON, one record per non-empty line
pub fn load_ndjson<R: BufRead>(reader: R, mode: LoaderMode, max_depth: usize) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_json(line.as_bytes(), max_depth)? {
            Value::Object(record) => records.push(record),
            other => match mode {
                LoaderMode::DropNonObjects => {
                    debug!(line = line_no + 1, kind = type_name(&other), "dropping non-object line");
                }
                LoaderMode::RejectNonObjects => {
                    return Err(SieveError::malformed(format!(
                        "line {} is {}, expected an object",
                        line_no + 1,
                        type_name(&other)
                    )))
                }
            },
        }
    }

    Ok(records)
}

/// Pull the data out of a request-style envelope
///
/// Uses the `data` key when present, otherwise the first value that is an
/// array or object.
pub fn extract_payload(payload: &Value) -> Result<&Value> {
    let obj = payload
        .as_object()
        .ok_or_else(|| SieveError::malformed("payload must be a JSON object"))?;

    if let Some(data) = obj.get("data") {
        return Ok(data);
    }

    obj.values()
        .find(|v| matches!(v, Value::Array(_) | Value::Object(_)))
        .ok_or_else(|| SieveError::malformed("no JSON-compatible data structure found in payload"))
}

/// Reject raw JSON nested deeper than `limit` containers
///
/// Brackets inside string literals are ignored. Malformed input is left for
/// the parser to report.
pub fn check_nesting(bytes: &[u8], limit: usize) -> Result<()> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in bytes {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return Err(SieveError::NestingTooDeep { limit });
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    Ok(())
}

/// Reject documents nested deeper than `limit` containers
pub fn check_depth(value: &Value, limit: usize) -> Result<()> {
    let mut stack: Vec<(&Value, usize)> = vec![(value, 0)];

    while let Some((node, depth)) = stack.pop() {
        let children: Box<dyn Iterator<Item = &Value>> = match node {
            Value::Array(items) => Box::new(items.iter()),
            Value::Object(obj) => Box::new(obj.values()),
            _ => continue,
        };

        let depth = depth + 1;
        if depth > limit {
            return Err(SieveError::NestingTooDeep { limit });
        }
        stack.extend(children.map(|child| (child, depth)));
    }

    Ok(())
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
