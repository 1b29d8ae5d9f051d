use proptest::prelude::*;
use contract_mock::U256;

/// Setting names and currency keys: short ASCII identifiers that fit in a
/// 32-byte word.
pub fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,30}"
}

pub fn currency_key() -> impl Strategy<Value = String> {
    "s[A-Z]{2,5}"
}

/// Any uint256, drawn from all 32 bytes.
pub fn uint256() -> impl Strategy<Value = U256> {
    any::<[u8; 32]>().prop_map(U256::from_be_bytes)
}

/// Names that cannot be packed into a 32-byte word.
pub fn oversized_identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z]{33,48}"
}
