//! Collaborators of the exchanger and the interfaces their mocks expose.

use contract_mock::{InterfaceDescriptor, MethodSignature};

pub const SYNTHETIX: &str = "Synthetix";
pub const EXCHANGE_RATES: &str = "ExchangeRates";
pub const EXCHANGE_STATE: &str = "ExchangeState";
pub const FLEXIBLE_STORAGE: &str = "FlexibleStorage";
pub const ISSUER: &str = "Issuer";

/// Label given to synth mocks created on demand.
pub const SYNTH: &str = "Synth";

pub fn synthetix() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "ISynthetix",
        vec![
            MethodSignature::new("synthsByAddress", &["address"], &["bytes32"]),
            MethodSignature::new("availableCurrencyKeys", &[], &["bytes32[]"]),
        ],
    )
}

pub fn exchange_rates() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "IExchangeRates",
        vec![
            MethodSignature::new("anyRateIsInvalid", &["bytes32[]"], &["bool"]),
            MethodSignature::new(
                "effectiveValueAndRates",
                &["bytes32", "uint256", "bytes32"],
                &["uint256", "uint256", "uint256"],
            ),
            MethodSignature::new(
                "ratesAndUpdatedTimeForCurrencyLastNRounds",
                &["bytes32", "uint256"],
                &["uint256[]", "uint256[]"],
            ),
            MethodSignature::new("getCurrentRoundId", &["bytes32"], &["uint256"]),
            MethodSignature::new("rateForCurrency", &["bytes32"], &["uint256"]),
        ],
    )
}

pub fn exchange_state() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "IExchangeState",
        vec![
            MethodSignature::new("getMaxTimestamp", &["address", "bytes32"], &["uint256"]),
            MethodSignature::new("getLengthOfEntries", &["address", "bytes32"], &["uint256"]),
            MethodSignature::new(
                "appendExchangeEntry",
                &[
                    "address", "bytes32", "uint256", "bytes32", "uint256", "uint256", "uint256",
                    "uint256", "uint256",
                ],
                &[],
            ),
            MethodSignature::new("removeEntries", &["address", "bytes32"], &[]),
        ],
    )
}

pub fn flexible_storage() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "IFlexibleStorage",
        vec![
            MethodSignature::new("getUIntValue", &["bytes32", "bytes32"], &["uint256"]),
            MethodSignature::new("getBoolValue", &["bytes32", "bytes32"], &["bool"]),
        ],
    )
}

pub fn issuer() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "IIssuer",
        vec![
            MethodSignature::new("synths", &["bytes32"], &["address"]),
            MethodSignature::new("synthsByAddress", &["address"], &["bytes32"]),
        ],
    )
}

pub fn synth() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        "ISynth",
        vec![
            MethodSignature::new("currencyKey", &[], &["bytes32"]),
            MethodSignature::new("issue", &["address", "uint256"], &[]),
            MethodSignature::new("burn", &["address", "uint256"], &[]),
        ],
    )
}
