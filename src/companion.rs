//! Synth mocks created on demand by issuer lookups.
//!
//! The first `Issuer.synths(key)` call in a test case materializes an
//! `ISynth` mock with no-op `issue`/`burn`; every lookup then points the
//! synth's `currencyKey()` at the queried key and returns its address.

use crate::interfaces::{self, SYNTH};
use crate::logging;
use contract_mock::{
    display_bytes32, CallHandler, InterfaceDescriptor, MockBuilder, MockError, MockFactory,
    MockHandle, Value, B256,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanionMode {
    /// One synth per test case whatever the key. A later lookup with a
    /// different key rebinds `currencyKey()` on that same synth.
    #[default]
    SingleInstance,
    /// One synth per distinct key.
    PerKey,
}

#[derive(Debug, Default)]
pub struct CompanionCache {
    single: Option<(B256, MockHandle)>,
    by_key: BTreeMap<B256, MockHandle>,
    latest: Option<MockHandle>,
}

impl CompanionCache {
    /// The most recently returned synth.
    pub fn latest(&self) -> Option<MockHandle> {
        self.latest.clone()
    }

    /// The synth whose `currencyKey()` currently reports `key`. In
    /// single-instance mode that is only the most recently looked-up key.
    pub fn get(&self, key: &B256) -> Option<MockHandle> {
        match &self.single {
            Some((bound, handle)) if bound == key => Some(handle.clone()),
            Some(_) => None,
            None => self.by_key.get(key).cloned(),
        }
    }

    pub fn all(&self) -> Vec<MockHandle> {
        match &self.single {
            Some((_, handle)) => vec![handle.clone()],
            None => self.by_key.values().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.single.is_none() && self.by_key.is_empty()
    }

    fn get_or_create(
        &mut self,
        mode: CompanionMode,
        key: B256,
        factory: &MockFactory,
        interface: &InterfaceDescriptor,
    ) -> contract_mock::Result<MockHandle> {
        let handle = match mode {
            CompanionMode::SingleInstance => match &mut self.single {
                Some((bound, handle)) => {
                    if *bound != key {
                        logging::log_companion_rebound(
                            &display_bytes32(bound),
                            &display_bytes32(&key),
                        );
                        *bound = key;
                    }
                    handle.clone()
                }
                None => {
                    let handle = materialize(key, factory, interface)?;
                    self.single = Some((key, handle.clone()));
                    handle
                }
            },
            CompanionMode::PerKey => match self.by_key.get(&key) {
                Some(handle) => handle.clone(),
                None => {
                    let handle = materialize(key, factory, interface)?;
                    self.by_key.insert(key, handle.clone());
                    handle
                }
            },
        };
        self.latest = Some(handle.clone());
        Ok(handle)
    }
}

fn materialize(
    key: B256,
    factory: &MockFactory,
    interface: &InterfaceDescriptor,
) -> contract_mock::Result<MockHandle> {
    let synth = MockBuilder::new(SYNTH)
        .with_interface(interface.clone())
        .with_void("burn")
        .with_void("issue")
        .build(factory)?;
    logging::log_companion_materialized(&display_bytes32(&key), &synth.address().to_string());
    Ok(synth)
}

/// Handler installed on `Issuer.synths`.
pub struct SynthLookup {
    mode: CompanionMode,
    factory: Rc<MockFactory>,
    cache: Rc<RefCell<CompanionCache>>,
    interface: InterfaceDescriptor,
}

impl SynthLookup {
    pub fn new(
        mode: CompanionMode,
        factory: Rc<MockFactory>,
        cache: Rc<RefCell<CompanionCache>>,
    ) -> Self {
        Self {
            mode,
            factory,
            cache,
            interface: interfaces::synth(),
        }
    }
}

impl CallHandler for SynthLookup {
    fn call(&self, method: &str, args: &[Value]) -> contract_mock::Result<Value> {
        let key = args
            .first()
            .and_then(Value::as_bytes32)
            .ok_or_else(|| MockError::HandlerFailed {
                method: method.to_string(),
                reason: "expected a bytes32 currency key as the first argument".to_string(),
            })?;

        let synth = self.cache.borrow_mut().get_or_create(
            self.mode,
            key,
            &self.factory,
            &self.interface,
        )?;
        synth.will_return_with("currencyKey", key)?;
        Ok(Value::Address(synth.address()))
    }
}
