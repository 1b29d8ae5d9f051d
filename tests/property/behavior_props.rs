use proptest::prelude::*;

use crate::common::{account, arrange, key, subject};
use crate::strategies::{currency_key, identifier, oversized_identifier, uint256};
use contract_mock::Value;
use exchanger_behaviors::{HarnessError, MockSet, Suite};
use exchanger_behaviors::behaviors::*;
use exchanger_behaviors::interfaces::{EXCHANGE_RATES, EXCHANGE_STATE, FLEXIBLE_STORAGE, ISSUER};

proptest! {
    #[test]
    fn test_setting_resolves_only_its_record(
        setting in identifier(),
        other in identifier(),
        value in uint256(),
    ) {
        prop_assume!(setting != other);
        let params = UintSystemSetting::new(&setting, &value.to_string());
        let ctx = arrange(|s| when_mocked_with_uint_system_setting(s, params, subject));
        let storage = ctx.mock(FLEXIBLE_STORAGE).unwrap();

        let hit = storage.call("getUIntValue", &[key(SYSTEM_SETTINGS), key(&setting)]).unwrap();
        let miss = storage.call("getUIntValue", &[key(SYSTEM_SETTINGS), key(&other)]).unwrap();
        let foreign = storage.call("getUIntValue", &[key(&other), key(&setting)]).unwrap();

        prop_assert_eq!(hit, Value::Uint(value));
        prop_assert_eq!(miss, Value::uint(0));
        if other != SYSTEM_SETTINGS {
            prop_assert_eq!(foreign, Value::uint(0));
        }
    }

    #[test]
    fn test_oversized_setting_name_is_rejected(setting in oversized_identifier(), value in uint256()) {
        let mut suite = Suite::new("Exchanger", MockSet::exchanger());
        let err = when_mocked_with_uint_system_setting(
            &mut suite.scope(),
            UintSystemSetting::new(&setting, &value.to_string()),
            subject,
        )
        .unwrap_err();

        prop_assert!(matches!(err, HarnessError::InvalidParameter(_)));
        prop_assert_eq!(suite.case_count(), 0);
    }

    #[test]
    fn test_invalid_rate_flag_is_negated_validity(valid in any::<bool>()) {
        let ctx = arrange(|s| when_mocked_with_exchange_rates_validity(s, RatesValidity { valid }, subject));
        let out = ctx
            .mock(EXCHANGE_RATES)
            .unwrap()
            .call("anyRateIsInvalid", &[Value::Array(vec![])])
            .unwrap();

        prop_assert_eq!(out, Value::Bool(!valid));
    }

    #[test]
    fn test_parity_preserves_amount(
        amount in uint256(),
        src in currency_key(),
        dest in currency_key(),
    ) {
        let ctx = arrange(|s| when_mocked_effective_rate_as_equal(s, subject));
        let out = ctx
            .mock(EXCHANGE_RATES)
            .unwrap()
            .call("effectiveValueAndRates", &[key(&src), Value::Uint(amount), key(&dest)])
            .unwrap();

        prop_assert_eq!(
            out,
            Value::Tuple(vec![Value::Uint(amount), Value::Uint(UNIT), Value::Uint(UNIT)])
        );
    }

    #[test]
    fn test_no_prior_exchange_reads_zero(calls in 1usize..20) {
        let ctx = arrange(|s| when_mocked_with_no_prior_exchanges_to_settle(s, subject));
        let state = ctx.mock(EXCHANGE_STATE).unwrap();

        for _ in 0..calls {
            prop_assert_eq!(
                state.call("getMaxTimestamp", &[account(), key("sUSD")]).unwrap(),
                Value::uint(0)
            );
            prop_assert_eq!(
                state.call("getLengthOfEntries", &[account(), key("sUSD")]).unwrap(),
                Value::uint(0)
            );
        }
    }

    #[test]
    fn test_synth_identity_matches_lookup(currency in currency_key()) {
        let ctx = arrange(|s| when_mocked_a_synth_to_issue_and_burn(s, subject));
        let address = ctx
            .mock(ISSUER)
            .unwrap()
            .call("synths", &[key(&currency)])
            .unwrap()
            .as_address()
            .unwrap();
        let synth = ctx.mock_at(&address).unwrap();

        prop_assert_eq!(synth.call("currencyKey", &[]).unwrap(), key(&currency));
    }
}
