//! Integration tests for the individual behavior setups

use crate::common::{account, arrange, key, subject};
use contract_mock::{MockError, Value, B256, U256};
use exchanger_behaviors::behaviors::*;
use exchanger_behaviors::interfaces::{EXCHANGE_RATES, EXCHANGE_STATE, FLEXIBLE_STORAGE, SYNTHETIX};
use exchanger_behaviors::HarnessError;

// ── Invocation checks ───────────────────────────────────────────────

#[test]
fn test_allow_checks_returns_empty_key() {
    let ctx = arrange(|s| when_mocked_to_allow_checks(s, subject));
    let synthetix = ctx.mock(SYNTHETIX).unwrap();

    let out = synthetix.call("synthsByAddress", &[account()]).unwrap();

    assert_eq!(out, Value::Bytes32(B256::ZERO));
}

// ── Exchange rates ──────────────────────────────────────────────────

#[test]
fn test_valid_rates_report_no_invalid_rate() {
    let ctx = arrange(|s| when_mocked_with_exchange_rates_validity(s, RatesValidity { valid: true }, subject));
    let rates = ctx.mock(EXCHANGE_RATES).unwrap();

    let out = rates
        .call("anyRateIsInvalid", &[Value::Array(vec![key("sUSD"), key("sETH")])])
        .unwrap();

    assert_eq!(out, Value::Bool(false));
}

#[test]
fn test_invalid_rates_report_invalid_rate() {
    let ctx = arrange(|s| when_mocked_with_exchange_rates_validity(s, RatesValidity { valid: false }, subject));
    let rates = ctx.mock(EXCHANGE_RATES).unwrap();

    let out = rates.call("anyRateIsInvalid", &[Value::Array(vec![])]).unwrap();

    assert_eq!(out, Value::Bool(true));
}

#[test]
fn test_effective_rate_parity_echoes_amount() {
    let ctx = arrange(|s| when_mocked_effective_rate_as_equal(s, subject));
    let rates = ctx.mock(EXCHANGE_RATES).unwrap();

    let out = rates
        .call(
            "effectiveValueAndRates",
            &[key("sUSD"), Value::Uint(U256::from(250) * UNIT), key("sETH")],
        )
        .unwrap();

    assert_eq!(
        out,
        Value::Tuple(vec![
            Value::Uint(U256::from(250) * UNIT),
            Value::Uint(UNIT),
            Value::Uint(UNIT)
        ])
    );
}

#[test]
fn test_last_n_rates_are_empty() {
    let ctx = arrange(|s| when_mocked_last_n_rates(s, subject));
    let rates = ctx.mock(EXCHANGE_RATES).unwrap();

    let out = rates
        .call(
            "ratesAndUpdatedTimeForCurrencyLastNRounds",
            &[key("sETH"), Value::uint(5)],
        )
        .unwrap();

    assert_eq!(out, Value::Tuple(vec![Value::Array(vec![]), Value::Array(vec![])]));
}

#[test]
fn test_untargeted_methods_stay_unprogrammed() {
    let ctx = arrange(|s| when_mocked_with_exchange_rates_validity(s, RatesValidity::default(), subject));
    let rates = ctx.mock(EXCHANGE_RATES).unwrap();

    let err = rates.call("rateForCurrency", &[key("sETH")]).unwrap_err();

    assert!(matches!(err, MockError::NotProgrammed { .. }));
    assert!(!ctx.mock(EXCHANGE_STATE).unwrap().is_programmed("getMaxTimestamp"));
}

// ── Exchange state ──────────────────────────────────────────────────

#[test]
fn test_no_prior_exchanges_read_zero_on_every_call() {
    let ctx = arrange(|s| when_mocked_with_no_prior_exchanges_to_settle(s, subject));
    let state = ctx.mock(EXCHANGE_STATE).unwrap();
    let args = [account(), key("sETH")];

    for _ in 0..3 {
        assert_eq!(state.call("getMaxTimestamp", &args).unwrap(), Value::uint(0));
        assert_eq!(state.call("getLengthOfEntries", &args).unwrap(), Value::uint(0));
    }
    assert_eq!(state.call_count("getMaxTimestamp"), 3);
}

#[test]
fn test_exchange_state_persistence() {
    let ctx = arrange(|s| when_mocked_exchange_state_persistence(s, subject));
    let rates = ctx.mock(EXCHANGE_RATES).unwrap();
    let state = ctx.mock(EXCHANGE_STATE).unwrap();

    assert_eq!(
        rates.call("getCurrentRoundId", &[key("sUSD")]).unwrap(),
        Value::uint(0)
    );
    let entry = [
        account(),
        key("sUSD"),
        Value::uint(100),
        key("sETH"),
        Value::uint(99),
        Value::uint(30),
        Value::uint(1_600_000_000),
        Value::uint(0),
        Value::uint(0),
    ];
    assert_eq!(state.call("appendExchangeEntry", &entry).unwrap(), Value::Unit);
    assert_eq!(state.call_count("appendExchangeEntry"), 1);
}

// ── System settings ─────────────────────────────────────────────────

#[test]
fn test_uint_system_setting_matches_only_its_record() {
    let ctx = arrange(|s| {
        when_mocked_with_uint_system_setting(s, UintSystemSetting::new("waitingPeriodSecs", "180"), subject)
    });
    let storage = ctx.mock(FLEXIBLE_STORAGE).unwrap();

    let hit = storage
        .call("getUIntValue", &[key(SYSTEM_SETTINGS), key("waitingPeriodSecs")])
        .unwrap();
    let other_key = storage
        .call("getUIntValue", &[key(SYSTEM_SETTINGS), key("exchangeFeeRate")])
        .unwrap();
    let other_namespace = storage
        .call("getUIntValue", &[key("Exchanger"), key("waitingPeriodSecs")])
        .unwrap();

    assert_eq!(hit, Value::uint(180));
    assert_eq!(other_key, Value::uint(0));
    assert_eq!(other_namespace, Value::uint(0));
}

#[test]
fn test_uint_system_setting_accepts_large_values() {
    let ctx = arrange(|s| {
        when_mocked_with_uint_system_setting(
            s,
            UintSystemSetting::new("priceDeviationThresholdFactor", "3000000000000000000"),
            subject,
        )
    });
    let storage = ctx.mock(FLEXIBLE_STORAGE).unwrap();

    let out = storage
        .call(
            "getUIntValue",
            &[key(SYSTEM_SETTINGS), key("priceDeviationThresholdFactor")],
        )
        .unwrap();

    assert_eq!(out, Value::Uint(U256::from(3) * UNIT));
}

#[test]
fn test_uint_system_setting_rejects_bad_value() {
    let mut suite = exchanger_behaviors::Suite::new(
        "Exchanger",
        exchanger_behaviors::MockSet::exchanger(),
    );

    let err = when_mocked_with_uint_system_setting(
        &mut suite.scope(),
        UintSystemSetting::new("waitingPeriodSecs", "-1"),
        subject,
    )
    .unwrap_err();

    assert!(matches!(err, HarnessError::InvalidParameter(_)));
}

#[test]
fn test_uint_system_setting_holds_values_past_u128() {
    let ctx = arrange(|s| {
        when_mocked_with_uint_system_setting(
            s,
            UintSystemSetting::new("waitingPeriodSecs", "340282366920938463463374607431768211456"),
            subject,
        )
    });
    let storage = ctx.mock(FLEXIBLE_STORAGE).unwrap();

    let out = storage
        .call("getUIntValue", &[key(SYSTEM_SETTINGS), key("waitingPeriodSecs")])
        .unwrap();

    assert_eq!(out, Value::Uint(U256::from(1u8) << 128usize));
}

#[test]
fn test_uint_system_setting_rejects_names_sharing_a_word_prefix() {
    let mut suite = exchanger_behaviors::Suite::new(
        "Exchanger",
        exchanger_behaviors::MockSet::exchanger(),
    );
    let name = format!("{}Secs", "a".repeat(32));

    let err = when_mocked_with_uint_system_setting(
        &mut suite.scope(),
        UintSystemSetting::new(&name, "7"),
        subject,
    )
    .unwrap_err();

    assert!(matches!(err, HarnessError::InvalidParameter(_)));
    assert_eq!(suite.case_count(), 0);
}

// ── JSON stubs ──────────────────────────────────────────────────────

#[test]
fn test_json_stubs_program_each_method() {
    let stubs = serde_json::json!({
        "getCurrentRoundId": "42",
        "anyRateIsInvalid": false,
    });
    let ctx = arrange(|s| when_mocked_with_json_stubs(s, EXCHANGE_RATES, stubs, subject));
    let rates = ctx.mock(EXCHANGE_RATES).unwrap();

    assert_eq!(
        rates.call("getCurrentRoundId", &[key("sETH")]).unwrap(),
        Value::uint(42)
    );
    assert_eq!(
        rates.call("anyRateIsInvalid", &[Value::Array(vec![])]).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_json_stubs_reject_non_object_and_bad_values() {
    let mut suite = exchanger_behaviors::Suite::new(
        "Exchanger",
        exchanger_behaviors::MockSet::exchanger(),
    );

    let not_object = when_mocked_with_json_stubs(
        &mut suite.scope(),
        EXCHANGE_RATES,
        serde_json::json!(["getCurrentRoundId"]),
        subject,
    )
    .unwrap_err();
    let negative = when_mocked_with_json_stubs(
        &mut suite.scope(),
        EXCHANGE_RATES,
        serde_json::json!({ "getCurrentRoundId": -1 }),
        subject,
    )
    .unwrap_err();

    assert!(matches!(not_object, HarnessError::InvalidParameter(_)));
    assert!(matches!(negative, HarnessError::InvalidParameter(_)));
    assert_eq!(suite.case_count(), 0);
}
