use crate::companion::{CompanionCache, CompanionMode};
use crate::config::HarnessConfig;
use crate::interfaces::{self, EXCHANGE_RATES, EXCHANGE_STATE, FLEXIBLE_STORAGE, ISSUER, SYNTHETIX};
use crate::{HarnessError, Result};
use contract_mock::{Address, InterfaceDescriptor, MockFactory, MockHandle};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// The collaborators a suite mocks, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct MockSet {
    entries: Vec<(String, InterfaceDescriptor)>,
}

impl MockSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declaring a name twice replaces the earlier descriptor.
    pub fn with(mut self, name: &str, interface: InterfaceDescriptor) -> Self {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = interface,
            None => self.entries.push((name.to_string(), interface)),
        }
        self
    }

    /// Every collaborator the exchanger talks to.
    pub fn exchanger() -> Self {
        Self::new()
            .with(SYNTHETIX, interfaces::synthetix())
            .with(EXCHANGE_RATES, interfaces::exchange_rates())
            .with(EXCHANGE_STATE, interfaces::exchange_state())
            .with(FLEXIBLE_STORAGE, interfaces::flexible_storage())
            .with(ISSUER, interfaces::issuer())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails with the first name in `required` that is not declared.
    pub fn require(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(HarnessError::MissingMock(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// Named mocks for one test case, also indexed by address.
#[derive(Debug, Default)]
pub struct MockRegistry {
    by_name: BTreeMap<String, MockHandle>,
    by_address: HashMap<Address, String>,
}

impl MockRegistry {
    pub fn build(mocks: &MockSet, factory: &MockFactory) -> Self {
        let mut registry = Self::default();
        for (name, interface) in &mocks.entries {
            registry.insert(name, factory.create(name, interface));
        }
        registry
    }

    pub fn insert(&mut self, name: &str, handle: MockHandle) {
        if let Some(previous) = self.by_name.insert(name.to_string(), handle.clone()) {
            self.by_address.remove(&previous.address());
        }
        self.by_address.insert(handle.address(), name.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&MockHandle> {
        self.by_name.get(name)
    }

    pub fn by_address(&self, address: &Address) -> Option<&MockHandle> {
        self.by_address
            .get(address)
            .and_then(|name| self.by_name.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Everything a hook or test body can see for one test case.
///
/// A context is built fresh for every case, so programmed behaviors, call
/// logs and synth mocks never leak between cases.
#[derive(Debug)]
pub struct TestContext {
    registry: MockRegistry,
    factory: Rc<MockFactory>,
    companions: Rc<RefCell<CompanionCache>>,
    companion_mode: CompanionMode,
}

impl TestContext {
    pub fn new(mocks: &MockSet, config: &HarnessConfig, seed: &str) -> Self {
        let seed = config.mocks.address_seed.as_deref().unwrap_or(seed);
        let factory = Rc::new(MockFactory::new(seed));
        Self {
            registry: MockRegistry::build(mocks, &factory),
            factory,
            companions: Rc::new(RefCell::new(CompanionCache::default())),
            companion_mode: config.companion.mode,
        }
    }

    pub fn mock(&self, name: &str) -> Result<MockHandle> {
        self.registry
            .get(name)
            .cloned()
            .ok_or_else(|| HarnessError::MissingMock(name.to_string()))
    }

    /// Finds a named mock or a materialized synth by address.
    pub fn mock_at(&self, address: &Address) -> Option<MockHandle> {
        self.registry.by_address(address).cloned().or_else(|| {
            self.companions
                .borrow()
                .all()
                .into_iter()
                .find(|synth| synth.address() == *address)
        })
    }

    /// The synth most recently returned by an issuer lookup.
    pub fn synth(&self) -> Option<MockHandle> {
        self.companions.borrow().latest()
    }

    pub fn synths(&self) -> Vec<MockHandle> {
        self.companions.borrow().all()
    }

    pub fn registry(&self) -> &MockRegistry {
        &self.registry
    }

    /// Replaces (or adds) a named mock for the rest of the case.
    pub fn register(&mut self, name: &str, handle: MockHandle) {
        self.registry.insert(name, handle);
    }

    pub fn factory(&self) -> Rc<MockFactory> {
        self.factory.clone()
    }

    pub fn companion_mode(&self) -> CompanionMode {
        self.companion_mode
    }

    pub(crate) fn companion_cache(&self) -> Rc<RefCell<CompanionCache>> {
        self.companions.clone()
    }
}
