//! Method signatures a mock is allowed to be programmed and called with.

use crate::error::{MockError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl MethodSignature {
    pub fn new(name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// ABI-like description of a contract interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub methods: Vec<MethodSignature>,
}

impl InterfaceDescriptor {
    pub fn new(name: &str, methods: Vec<MethodSignature>) -> Self {
        Self {
            name: name.to_string(),
            methods,
        }
    }

    /// Parses a descriptor from JSON of the form
    /// `{"name": "ISynth", "methods": [{"name": "burn", "inputs": ["address", "uint256"]}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: InterfaceDescriptor = serde_json::from_str(json)
            .map_err(|e| MockError::InvalidDescriptor(e.to_string()))?;
        let mut seen = std::collections::HashSet::new();
        for method in &descriptor.methods {
            if !seen.insert(method.name.as_str()) {
                return Err(MockError::InvalidDescriptor(format!(
                    "{} declares '{}' more than once",
                    descriptor.name, method.name
                )));
            }
        }
        Ok(descriptor)
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.name == name)
    }
}
