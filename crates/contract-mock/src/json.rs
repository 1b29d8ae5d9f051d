use crate::error::{MockError, Result};
use crate::mock::MockHandle;
use crate::value::{to_bytes32, Address, Value, B256, U256};
use serde_json::Value as Json;

/// Converts JSON into a stub value.
///
/// Strings are read as an address (`0x` + 40 hex digits), a 32-byte word
/// (`0x` + 64 hex digits), a decimal uint256, or otherwise as text encoded
/// with [`to_bytes32`]. `{"tuple": [...]}` builds a tuple.
pub fn value_from_json(json: &Json) -> Result<Value> {
    match json {
        Json::Null => Ok(Value::Unit),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => n
            .as_u64()
            .map(|n| Value::Uint(U256::from(n)))
            .ok_or_else(|| MockError::UnsupportedJson(n.to_string())),
        Json::String(s) => value_from_str(s),
        Json::Array(items) => items
            .iter()
            .map(value_from_json)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Json::Object(map) => match map.get("tuple") {
            Some(Json::Array(items)) if map.len() == 1 => items
                .iter()
                .map(value_from_json)
                .collect::<Result<Vec<_>>>()
                .map(Value::Tuple),
            _ => Err(MockError::UnsupportedJson(json.to_string())),
        },
    }
}

fn value_from_str(s: &str) -> Result<Value> {
    if s.starts_with("0x") {
        if let Ok(addr) = s.parse::<Address>() {
            return Ok(Value::Address(addr));
        }
        if let Ok(word) = s.parse::<B256>() {
            return Ok(Value::Bytes32(word));
        }
    }
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return U256::from_str_radix(s, 10)
            .map(Value::Uint)
            .map_err(|e| MockError::UnsupportedJson(format!("{s}: {e}")));
    }
    to_bytes32(s)
        .map(Value::Bytes32)
        .ok_or_else(|| MockError::UnsupportedJson(format!("'{s}' does not fit in 32 bytes")))
}

/// Programs a constant stub for every entry of a `{"method": value}` object.
/// Returns the number of methods programmed.
pub fn program_from_json(handle: &MockHandle, json: &Json) -> Result<usize> {
    let stubs = json
        .as_object()
        .ok_or_else(|| MockError::UnsupportedJson(json.to_string()))?;
    for (method, value) in stubs {
        handle.will_return_with(method, value_from_json(value)?)?;
    }
    Ok(stubs.len())
}
