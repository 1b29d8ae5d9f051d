use crate::error::Result;
use crate::interface::InterfaceDescriptor;
use crate::json::program_from_json;
use crate::matcher::ResponseTable;
use crate::mock::{MockHandle, StubbedBehavior};
use crate::value::{Address, Value};
use sha2::{Digest, Sha256};
use std::cell::Cell;
use tracing::debug;

/// Creates fresh mocks, each with its own address.
///
/// Addresses are derived from the factory seed, the mock label and a
/// per-factory counter, so two factories with the same seed hand out the
/// same sequence of addresses.
#[derive(Debug)]
pub struct MockFactory {
    seed: String,
    nonce: Cell<u64>,
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new("contract-mock")
    }
}

impl MockFactory {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            nonce: Cell::new(0),
        }
    }

    pub fn created(&self) -> u64 {
        self.nonce.get()
    }

    pub fn next_address(&self, label: &str) -> Address {
        let nonce = self.nonce.get();
        self.nonce.set(nonce + 1);

        let mut hasher = Sha256::new();
        hasher.update(self.seed.as_bytes());
        hasher.update(label.as_bytes());
        hasher.update(nonce.to_be_bytes());
        let digest = hasher.finalize();

        Address::from_slice(&digest[12..])
    }

    pub fn create(&self, label: &str, interface: &InterfaceDescriptor) -> MockHandle {
        let address = self.next_address(label);
        debug!(
            label,
            interface = interface.name.as_str(),
            address = %address,
            "Mock created"
        );
        MockHandle::new(label, address, Some(interface.clone()))
    }
}

pub struct MockBuilder {
    label: String,
    address: Option<Address>,
    interface: Option<InterfaceDescriptor>,
    stubs: Vec<(String, StubbedBehavior)>,
    json_stubs: Vec<serde_json::Value>,
}

impl MockBuilder {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            address: None,
            interface: None,
            stubs: Vec::new(),
            json_stubs: Vec::new(),
        }
    }

    pub fn with_interface(mut self, interface: InterfaceDescriptor) -> Self {
        self.interface = Some(interface);
        self
    }

    pub fn at(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_return(mut self, method: &str, value: impl Into<Value>) -> Self {
        self.stubs
            .push((method.to_string(), StubbedBehavior::Constant(value.into())));
        self
    }

    pub fn with_void(mut self, method: &str) -> Self {
        self.stubs.push((method.to_string(), StubbedBehavior::Void));
        self
    }

    pub fn with_table(mut self, method: &str, table: ResponseTable) -> Self {
        self.stubs
            .push((method.to_string(), StubbedBehavior::Table(table)));
        self
    }

    /// Constant stubs from a `{"method": value}` object, applied after the
    /// individually added stubs.
    pub fn with_json_stubs(mut self, json: serde_json::Value) -> Self {
        self.json_stubs.push(json);
        self
    }

    /// Without an explicit address the mock gets one from `factory`.
    pub fn build(self, factory: &MockFactory) -> Result<MockHandle> {
        let address = self
            .address
            .unwrap_or_else(|| factory.next_address(&self.label));
        let handle = MockHandle::new(&self.label, address, self.interface);
        for (method, behavior) in self.stubs {
            handle.program(&method, behavior)?;
        }
        for json in &self.json_stubs {
            program_from_json(&handle, json)?;
        }
        Ok(handle)
    }
}
