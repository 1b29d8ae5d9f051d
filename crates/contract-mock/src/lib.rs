//! Programmable contract mocks.
//!
//! A [`MockHandle`] stands in for one deployed contract. Each method can be
//! programmed with a constant, a no-op, an argument-matched
//! [`ResponseTable`], or a [`CallHandler`]; every call is recorded.

pub mod assertions;
pub mod builder;
pub mod error;
pub mod interface;
pub mod json;
pub mod matcher;
pub mod mock;
pub mod value;

pub use assertions::CallAssertions;
pub use builder::{MockBuilder, MockFactory};
pub use error::{MockError, Result};
pub use interface::{InterfaceDescriptor, MethodSignature};
pub use matcher::{ArgMatcher, Response, ResponseTable, Rule};
pub use mock::{CallHandler, MockCallLogEntry, MockHandle, StubbedBehavior};
pub use value::{bytes32_label, display_bytes32, to_bytes32, Address, Value, B256, U256};
