#![allow(dead_code)]

use contract_mock::{to_bytes32, Address, Value};
use exchanger_behaviors::{HarnessConfig, MockSet, Result, Scope, Suite, TestContext};

pub const CASE: &str = "subject";

/// Registers the single case that [`arrange`] prepares.
pub fn subject(scope: &mut Scope<'_>) -> Result<()> {
    scope.it(CASE, |_ctx| Ok(()));
    Ok(())
}

/// Builds an exchanger suite with `build`, then runs the hooks of [`CASE`].
pub fn arrange_with<F>(config: HarnessConfig, build: F) -> TestContext
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    let mut suite = Suite::new("Exchanger", MockSet::exchanger()).with_config(config);
    build(&mut suite.scope()).unwrap();
    suite.arrange(CASE).unwrap()
}

pub fn arrange<F>(build: F) -> TestContext
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    arrange_with(HarnessConfig::default(), build)
}

pub fn key(text: &str) -> Value {
    Value::Bytes32(to_bytes32(text).unwrap())
}

pub fn account() -> Value {
    Value::Address(Address::repeat_byte(0xaa))
}
