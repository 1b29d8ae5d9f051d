//! Preconditions for exchanger tests.
//!
//! Each setup opens a describe block, registers one before-each hook that
//! programs the collaborator mocks, and then calls `body` inside that block
//! so further setups and cases nest beneath it:
//!
//! ```ignore
//! when_mocked_with_no_prior_exchanges_to_settle(scope, |scope| {
//!     when_mocked_with_exchange_rates_validity(scope, RatesValidity { valid: true }, |scope| {
//!         scope.it("exchanges", |ctx| { /* ... */ Ok(()) });
//!         Ok(())
//!     })
//! })
//! ```
//!
//! Hooks reprogram from scratch on every run, so applying the same setup
//! twice leaves the same state as applying it once.

use crate::companion::SynthLookup;
use crate::interfaces::{EXCHANGE_RATES, EXCHANGE_STATE, FLEXIBLE_STORAGE, ISSUER, SYNTHETIX};
use crate::suite::Scope;
use crate::{HarnessError, Result};
use contract_mock::{json, to_bytes32, ArgMatcher, Response, ResponseTable, Value, B256, U256};
use serde_json::Value as Json;
use std::rc::Rc;

/// Fixed-point 1.0 with 18 decimals.
pub const UNIT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Namespace under which system settings live in flexible storage.
pub const SYSTEM_SETTINGS: &str = "SystemSettings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatesValidity {
    pub valid: bool,
}

impl Default for RatesValidity {
    fn default() -> Self {
        Self { valid: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UintSystemSetting {
    pub setting: String,
    /// Decimal integer, e.g. `"300"`.
    pub value: String,
}

impl UintSystemSetting {
    pub fn new(setting: &str, value: &str) -> Self {
        Self {
            setting: setting.to_string(),
            value: value.to_string(),
        }
    }
}

/// `Synthetix.synthsByAddress` returns the empty key for any caller.
pub fn when_mocked_to_allow_checks<F>(scope: &mut Scope<'_>, body: F) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    scope.describe("when mocked to allow invocation checks", |scope| {
        scope.before_each_requiring("allow invocation checks", &[SYNTHETIX], |ctx| {
            ctx.mock(SYNTHETIX)?
                .will_return_with("synthsByAddress", B256::ZERO)?;
            Ok(())
        })?;
        body(scope)
    })
}

/// `ExchangeRates.anyRateIsInvalid` returns `!valid`.
pub fn when_mocked_with_exchange_rates_validity<F>(
    scope: &mut Scope<'_>,
    params: RatesValidity,
    body: F,
) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    let title = if params.valid {
        "when mocked with valid exchange rates"
    } else {
        "when mocked with invalid exchange rates"
    };
    scope.describe(title, |scope| {
        scope.before_each_requiring("exchange rates validity", &[EXCHANGE_RATES], move |ctx| {
            ctx.mock(EXCHANGE_RATES)?
                .will_return_with("anyRateIsInvalid", !params.valid)?;
            Ok(())
        })?;
        body(scope)
    })
}

/// Both the max timestamp and the entry count of the exchange ledger read 0.
pub fn when_mocked_with_no_prior_exchanges_to_settle<F>(scope: &mut Scope<'_>, body: F) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    scope.describe("when mocked with no prior exchanges to settle", |scope| {
        scope.before_each_requiring("no prior exchanges", &[EXCHANGE_STATE], |ctx| {
            let state = ctx.mock(EXCHANGE_STATE)?;
            state.will_return_with("getMaxTimestamp", U256::ZERO)?;
            state.will_return_with("getLengthOfEntries", U256::ZERO)?;
            Ok(())
        })?;
        body(scope)
    })
}

fn setting_word(text: &str) -> Result<Value> {
    to_bytes32(text).map(Value::Bytes32).ok_or_else(|| {
        HarnessError::InvalidParameter(format!(
            "'{}' is longer than 32 bytes and cannot be used as a storage key",
            text
        ))
    })
}

/// The table `getUIntValue` is programmed with: `value` for
/// `("SystemSettings", setting)`, 0 for every other record.
pub fn uint_setting_table(setting: &str, value: U256) -> Result<ResponseTable> {
    Ok(ResponseTable::with_default(Value::Uint(U256::ZERO)).when(
        vec![
            ArgMatcher::Eq(setting_word(SYSTEM_SETTINGS)?),
            ArgMatcher::Eq(setting_word(setting)?),
        ],
        Value::Uint(value),
    ))
}

/// `FlexibleStorage.getUIntValue` returns `value` for the named system
/// setting only. A `value` that is not a decimal uint256, or a setting name
/// that does not fit in 32 bytes, is rejected before the hook is registered.
pub fn when_mocked_with_uint_system_setting<F>(
    scope: &mut Scope<'_>,
    params: UintSystemSetting,
    body: F,
) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    let value = U256::from_str_radix(params.value.trim(), 10).map_err(|e| {
        HarnessError::InvalidParameter(format!(
            "SystemSetting.{} value '{}' is not a decimal uint256: {}",
            params.setting, params.value, e
        ))
    })?;
    let table = uint_setting_table(&params.setting, value)?;
    let title = format!(
        "when SystemSetting.{} is mocked to {}",
        params.setting, params.value
    );
    scope.describe(&title, |scope| {
        scope.before_each_requiring("uint system setting", &[FLEXIBLE_STORAGE], move |ctx| {
            ctx.mock(FLEXIBLE_STORAGE)?
                .will_resolve_with("getUIntValue", table.clone())?;
            Ok(())
        })?;
        body(scope)
    })
}

/// `effectiveValueAndRates(src, amount, dest)` returns
/// `(amount, UNIT, UNIT)`.
pub fn when_mocked_effective_rate_as_equal<F>(scope: &mut Scope<'_>, body: F) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    scope.describe(
        "when mocked with exchange rates giving an effective value of 1:1",
        |scope| {
            scope.before_each_requiring("effective rate parity", &[EXCHANGE_RATES], |ctx| {
                let parity = ResponseTable::with_default(Response::Tuple(vec![
                    Response::Arg(1),
                    Response::Constant(Value::Uint(UNIT)),
                    Response::Constant(Value::Uint(UNIT)),
                ]));
                ctx.mock(EXCHANGE_RATES)?
                    .will_resolve_with("effectiveValueAndRates", parity)?;
                Ok(())
            })?;
            body(scope)
        },
    )
}

/// Rate history lookups return two empty lists.
pub fn when_mocked_last_n_rates<F>(scope: &mut Scope<'_>, body: F) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    scope.describe("when mocked 1e18 as last n rates", |scope| {
        scope.before_each_requiring("last n rates", &[EXCHANGE_RATES], |ctx| {
            ctx.mock(EXCHANGE_RATES)?.will_return_with(
                "ratesAndUpdatedTimeForCurrencyLastNRounds",
                Value::Tuple(vec![Value::Array(vec![]), Value::Array(vec![])]),
            )?;
            Ok(())
        })?;
        body(scope)
    })
}

/// `Issuer.synths(key)` returns the address of a synth mock whose
/// `currencyKey()` reports `key` and whose `issue`/`burn` succeed.
pub fn when_mocked_a_synth_to_issue_and_burn<F>(scope: &mut Scope<'_>, body: F) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    scope.describe("when mocked a synth to burn", |scope| {
        scope.before_each_requiring("synth to issue and burn", &[ISSUER], |ctx| {
            let lookup = SynthLookup::new(
                ctx.companion_mode(),
                ctx.factory(),
                ctx.companion_cache(),
            );
            ctx.mock(ISSUER)?
                .will_delegate_to("synths", Rc::new(lookup))?;
            Ok(())
        })?;
        body(scope)
    })
}

/// Round ids read 0 and appending an exchange entry succeeds silently.
pub fn when_mocked_exchange_state_persistence<F>(scope: &mut Scope<'_>, body: F) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    scope.describe("when mocking exchange state persistance", |scope| {
        scope.before_each_requiring(
            "exchange state persistence",
            &[EXCHANGE_RATES, EXCHANGE_STATE],
            |ctx| {
                ctx.mock(EXCHANGE_RATES)?
                    .will_return_with("getCurrentRoundId", U256::ZERO)?;
                ctx.mock(EXCHANGE_STATE)?.will_return("appendExchangeEntry")?;
                Ok(())
            },
        )?;
        body(scope)
    })
}

/// Programs `collaborator` with a constant return for every entry of a
/// `{"method": value}` object, e.g. a fixture file loaded with `serde_json`.
/// Stubs that are not an object, or values that cannot be converted, are
/// rejected before the hook is registered.
pub fn when_mocked_with_json_stubs<F>(
    scope: &mut Scope<'_>,
    collaborator: &str,
    stubs: Json,
    body: F,
) -> Result<()>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    let entries = stubs.as_object().ok_or_else(|| {
        HarnessError::InvalidParameter(format!("stubs for {} must be a JSON object", collaborator))
    })?;
    for (method, value) in entries {
        json::value_from_json(value).map_err(|e| {
            HarnessError::InvalidParameter(format!("{}.{}: {}", collaborator, method, e))
        })?;
    }

    let title = format!("when {} is mocked from JSON stubs", collaborator);
    let name = collaborator.to_string();
    scope.describe(&title, |scope| {
        scope.before_each_requiring("json stubs", &[collaborator], move |ctx| {
            json::program_from_json(&ctx.mock(&name)?, &stubs)?;
            Ok(())
        })?;
        body(scope)
    })
}
