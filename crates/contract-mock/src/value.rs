//! ABI-like values passed to and returned from mocked contract methods.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use alloy_primitives::{Address, B256, U256};

/// Encodes `text` as UTF-8, right-padded with zeros to a 32-byte word.
///
/// Returns `None` for text longer than 32 bytes, which cannot be encoded
/// without colliding with other keys sharing the same prefix. The empty
/// string encodes to [`B256::ZERO`].
pub fn to_bytes32(text: &str) -> Option<B256> {
    let bytes = text.as_bytes();
    if bytes.len() > 32 {
        return None;
    }
    let mut word = [0u8; 32];
    word[..bytes.len()].copy_from_slice(bytes);
    Some(B256::from(word))
}

/// Decodes a word back into the text it was built from, if it is
/// zero-padded UTF-8.
pub fn bytes32_label(word: &B256) -> Option<String> {
    let end = word.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    std::str::from_utf8(&word[..end]).ok().map(str::to_string)
}

/// Currency keys print as their label; other words as hex.
pub fn display_bytes32(word: &B256) -> String {
    match bytes32_label(word) {
        Some(label) if !label.is_empty() => label,
        _ => word.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Unit,
    Bool(bool),
    Uint(U256),
    Bytes32(B256),
    Address(Address),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn uint(n: u128) -> Self {
        Value::Uint(U256::from(n))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes32(&self) -> Option<B256> {
        match self {
            Value::Bytes32(word) => Some(*word),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Bytes32(word) => write!(f, "{}", display_bytes32(word)),
            Value::Address(addr) => write!(f, "{}", addr),
            Value::Array(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_joined(f, items)?;
                write!(f, ")")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u128> for Value {
    fn from(n: u128) -> Self {
        Value::uint(n)
    }
}

impl From<U256> for Value {
    fn from(n: U256) -> Self {
        Value::Uint(n)
    }
}

impl From<B256> for Value {
    fn from(word: B256) -> Self {
        Value::Bytes32(word)
    }
}

impl From<Address> for Value {
    fn from(addr: Address) -> Self {
        Value::Address(addr)
    }
}
