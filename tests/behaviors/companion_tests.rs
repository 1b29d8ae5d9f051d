//! Integration tests for synth mocks materialized by issuer lookups

use crate::common::{account, arrange, arrange_with, key, subject};
use contract_mock::{Address, Value};
use exchanger_behaviors::behaviors::when_mocked_a_synth_to_issue_and_burn;
use exchanger_behaviors::interfaces::ISSUER;
use exchanger_behaviors::{CompanionMode, HarnessConfig, TestContext};

fn lookup(ctx: &TestContext, currency: &str) -> Address {
    ctx.mock(ISSUER)
        .unwrap()
        .call("synths", &[key(currency)])
        .unwrap()
        .as_address()
        .unwrap()
}

#[test]
fn test_synth_is_absent_until_first_lookup() {
    let ctx = arrange(|s| when_mocked_a_synth_to_issue_and_burn(s, subject));

    assert!(ctx.synth().is_none());
    assert!(ctx.synths().is_empty());

    lookup(&ctx, "sETH");

    assert!(ctx.synth().is_some());
}

#[test]
fn test_synth_identity_echoes_lookup_key() {
    let ctx = arrange(|s| when_mocked_a_synth_to_issue_and_burn(s, subject));

    let address = lookup(&ctx, "sETH");
    let synth = ctx.mock_at(&address).unwrap();

    assert_eq!(synth.call("currencyKey", &[]).unwrap(), key("sETH"));
    assert!(synth.ptr_eq(&ctx.synth().unwrap()));
    assert_eq!(synth.interface_name().as_deref(), Some("ISynth"));
}

#[test]
fn test_repeated_lookups_share_one_synth() {
    let ctx = arrange(|s| when_mocked_a_synth_to_issue_and_burn(s, subject));

    let first = lookup(&ctx, "sBTC");
    let second = lookup(&ctx, "sBTC");

    assert_eq!(first, second);
    assert_eq!(ctx.synths().len(), 1);
}

#[test]
fn test_synth_issue_and_burn_succeed() {
    let ctx = arrange(|s| when_mocked_a_synth_to_issue_and_burn(s, subject));
    let synth = ctx.mock_at(&lookup(&ctx, "sUSD")).unwrap();
    let args = [account(), Value::uint(5)];

    assert_eq!(synth.call("issue", &args).unwrap(), Value::Unit);
    assert_eq!(synth.call("burn", &args).unwrap(), Value::Unit);
    assert_eq!(synth.call_count("burn"), 1);
}

#[test]
fn test_single_instance_rebinds_key_across_lookups() {
    let ctx = arrange(|s| when_mocked_a_synth_to_issue_and_burn(s, subject));

    let eth = lookup(&ctx, "sETH");
    let btc = lookup(&ctx, "sBTC");
    let synth = ctx.mock_at(&eth).unwrap();

    assert_eq!(eth, btc);
    assert_eq!(synth.call("currencyKey", &[]).unwrap(), key("sBTC"));
}

#[test]
fn test_per_key_mode_keeps_identities_apart() {
    let config = HarnessConfig::default().with_companion_mode(CompanionMode::PerKey);
    let ctx = arrange_with(config, |s| when_mocked_a_synth_to_issue_and_burn(s, subject));

    let eth = lookup(&ctx, "sETH");
    let btc = lookup(&ctx, "sBTC");

    assert_ne!(eth, btc);
    assert_eq!(ctx.synths().len(), 2);
    assert_eq!(
        ctx.mock_at(&eth).unwrap().call("currencyKey", &[]).unwrap(),
        key("sETH")
    );
    assert_eq!(
        ctx.mock_at(&btc).unwrap().call("currencyKey", &[]).unwrap(),
        key("sBTC")
    );
    assert!(ctx.synth().unwrap().ptr_eq(&ctx.mock_at(&btc).unwrap()));
}

#[test]
fn test_setup_applied_twice_still_yields_one_synth() {
    let ctx = arrange(|s| {
        when_mocked_a_synth_to_issue_and_burn(s, |s| when_mocked_a_synth_to_issue_and_burn(s, subject))
    });

    let first = lookup(&ctx, "sETH");
    let second = lookup(&ctx, "sETH");

    assert_eq!(first, second);
    assert_eq!(ctx.synths().len(), 1);
}

#[test]
fn test_synth_address_differs_from_collaborators() {
    let ctx = arrange(|s| when_mocked_a_synth_to_issue_and_burn(s, subject));
    let address = lookup(&ctx, "sETH");

    assert!(ctx.registry().by_address(&address).is_none());
    assert_ne!(address, ctx.mock(ISSUER).unwrap().address());
}
