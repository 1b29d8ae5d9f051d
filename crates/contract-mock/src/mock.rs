use crate::error::{MockError, Result};
use crate::interface::InterfaceDescriptor;
use crate::matcher::ResponseTable;
use crate::value::{Address, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Resolves a call whose response needs more than a lookup table, such as
/// programming another mock as a side effect.
pub trait CallHandler {
    fn call(&self, method: &str, args: &[Value]) -> Result<Value>;
}

#[derive(Clone)]
pub enum StubbedBehavior {
    Constant(Value),
    /// No-op; the call succeeds and returns [`Value::Unit`].
    Void,
    Table(ResponseTable),
    Handler(Rc<dyn CallHandler>),
}

impl StubbedBehavior {
    pub fn respond(&self, method: &str, args: &[Value]) -> Result<Value> {
        match self {
            StubbedBehavior::Constant(value) => Ok(value.clone()),
            StubbedBehavior::Void => Ok(Value::Unit),
            StubbedBehavior::Table(table) => table.resolve(method, args),
            StubbedBehavior::Handler(handler) => handler.call(method, args),
        }
    }
}

impl fmt::Debug for StubbedBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StubbedBehavior::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            StubbedBehavior::Void => write!(f, "Void"),
            StubbedBehavior::Table(table) => f.debug_tuple("Table").field(table).finish(),
            StubbedBehavior::Handler(_) => write!(f, "Handler(..)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockCallLogEntry {
    pub method: String,
    pub args: Vec<Value>,
    pub mocked: bool,
    pub returned: Option<Value>,
}

#[derive(Debug)]
pub struct MockContract {
    label: String,
    address: Address,
    interface: Option<InterfaceDescriptor>,
    behaviors: HashMap<String, StubbedBehavior>,
    calls: Vec<MockCallLogEntry>,
}

impl MockContract {
    fn check_method(&self, method: &str) -> Result<()> {
        if let Some(interface) = &self.interface {
            if interface.method(method).is_none() {
                return Err(MockError::UnknownMethod {
                    contract: self.label.clone(),
                    method: method.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_arity(&self, method: &str, actual: usize) -> Result<()> {
        let expected = self
            .interface
            .as_ref()
            .and_then(|i| i.method(method))
            .map(|m| m.inputs.len());
        match expected {
            Some(expected) if expected != actual => Err(MockError::ArityMismatch {
                contract: self.label.clone(),
                method: method.to_string(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

/// Shared handle to one mocked contract.
///
/// Handles are cheap to clone and all clones address the same mock, so a
/// behavior programmed through one clone is observed through every other.
#[derive(Clone)]
pub struct MockHandle(Rc<RefCell<MockContract>>);

impl MockHandle {
    pub fn new(label: &str, address: Address, interface: Option<InterfaceDescriptor>) -> Self {
        Self(Rc::new(RefCell::new(MockContract {
            label: label.to_string(),
            address,
            interface,
            behaviors: HashMap::new(),
            calls: Vec::new(),
        })))
    }

    pub fn address(&self) -> Address {
        self.0.borrow().address
    }

    pub fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    pub fn interface_name(&self) -> Option<String> {
        self.0.borrow().interface.as_ref().map(|i| i.name.clone())
    }

    pub fn ptr_eq(&self, other: &MockHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Installs `behavior` for `method`, replacing whatever was there.
    pub fn program(&self, method: &str, behavior: StubbedBehavior) -> Result<()> {
        let mut mock = self.0.borrow_mut();
        mock.check_method(method)?;
        debug!(
            contract = mock.label.as_str(),
            method,
            behavior = ?behavior,
            "Stub programmed"
        );
        mock.behaviors.insert(method.to_string(), behavior);
        Ok(())
    }

    pub fn will_return_with(&self, method: &str, value: impl Into<Value>) -> Result<()> {
        self.program(method, StubbedBehavior::Constant(value.into()))
    }

    pub fn will_return(&self, method: &str) -> Result<()> {
        self.program(method, StubbedBehavior::Void)
    }

    pub fn will_resolve_with(&self, method: &str, table: ResponseTable) -> Result<()> {
        self.program(method, StubbedBehavior::Table(table))
    }

    pub fn will_delegate_to(&self, method: &str, handler: Rc<dyn CallHandler>) -> Result<()> {
        self.program(method, StubbedBehavior::Handler(handler))
    }

    pub fn behavior(&self, method: &str) -> Option<StubbedBehavior> {
        self.0.borrow().behaviors.get(method).cloned()
    }

    pub fn is_programmed(&self, method: &str) -> bool {
        self.0.borrow().behaviors.contains_key(method)
    }

    pub fn programmed_methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.0.borrow().behaviors.keys().cloned().collect();
        methods.sort();
        methods
    }

    /// Drops every programmed behavior and the call log.
    pub fn reset(&self) {
        let mut mock = self.0.borrow_mut();
        mock.behaviors.clear();
        mock.calls.clear();
    }

    /// Invokes `method` and records the call.
    ///
    /// The behavior is evaluated without holding a borrow of this mock, so a
    /// handler may freely program other mocks.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        let behavior = {
            let mut mock = self.0.borrow_mut();
            mock.check_method(method)?;
            mock.check_arity(method, args.len())?;
            match mock.behaviors.get(method).cloned() {
                Some(behavior) => behavior,
                None => {
                    warn!(
                        contract = mock.label.as_str(),
                        method, "No stub programmed for mocked call"
                    );
                    mock.calls.push(MockCallLogEntry {
                        method: method.to_string(),
                        args: args.to_vec(),
                        mocked: false,
                        returned: None,
                    });
                    return Err(MockError::NotProgrammed {
                        contract: mock.label.clone(),
                        method: method.to_string(),
                    });
                }
            }
        };

        let result = behavior.respond(method, args);
        self.0.borrow_mut().calls.push(MockCallLogEntry {
            method: method.to_string(),
            args: args.to_vec(),
            mocked: true,
            returned: result.as_ref().ok().cloned(),
        });
        result
    }

    pub fn calls(&self) -> Vec<MockCallLogEntry> {
        self.0.borrow().calls.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.0
            .borrow()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .count()
    }
}

impl fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mock = self.0.borrow();
        f.debug_struct("MockHandle")
            .field("label", &mock.label)
            .field("address", &mock.address.to_string())
            .finish()
    }
}
