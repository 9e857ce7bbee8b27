// crates/seigledger-core/src/amount.rs
//
// Fixed-point amount math for the staking ledger.
//
// WTON amounts and the coinage factor use RAY fixed-point: 27 decimals,
// so 1.0 == 10^27. The native TON token has 18 decimals, giving the fixed
// conversion 1 TON-unit = 10^9 WTON-units. All internal accounting uses
// integer U256 to avoid floating-point precision issues; intermediate
// products go through U512 so `a * b / d` never overflows.

use primitive_types::{U256, U512};

/// Block heights, the only time source of the ledger.
pub type BlockNumber = u64;

/// Number of WTON units in one TON unit. WTON has 27 decimals, TON has 18.
pub const WTON_PER_TON: u64 = 1_000_000_000;

/// The RAY fixed-point unit: 10^27. Factors and rates are RAY-scaled.
pub fn ray() -> U256 {
    U256::exp10(27)
}

/// Convert a TON amount (18 decimals) to WTON units (27 decimals).
pub fn to_wton(ton_amount: U256) -> U256 {
    ton_amount.saturating_mul(U256::from(WTON_PER_TON))
}

/// Convert a WTON amount back to TON units, flooring the sub-TON remainder.
pub fn to_ton_floor(wton_amount: U256) -> U256 {
    wton_amount / U256::from(WTON_PER_TON)
}

/// Compute `a * b / denominator` with full 512-bit intermediate precision,
/// flooring the result. Division by zero returns zero (callers guard the
/// denominator; this keeps the helper total).
pub fn mul_div(a: U256, b: U256, denominator: U256) -> U256 {
    if denominator.is_zero() {
        return U256::zero();
    }
    let product = a.full_mul(b);
    let quotient = product / U512::from(denominator);
    U256::try_from(quotient).unwrap_or(U256::MAX)
}

/// Compute `a * b / denominator` rounding up. Used for raw-share burns so
/// rounding can never strand value inside a coinage.
pub fn mul_div_ceil(a: U256, b: U256, denominator: U256) -> U256 {
    if denominator.is_zero() {
        return U256::zero();
    }
    let denominator = U512::from(denominator);
    let product = a.full_mul(b);
    let quotient = (product + (denominator - U512::one())) / denominator;
    U256::try_from(quotient).unwrap_or(U256::MAX)
}

/// Serde adapter for U256 fields as decimal strings, the representation
/// used in TOML configs (amounts like 3.92e27 exceed every native width).
pub mod dec_str {
    use primitive_types::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_dec_str(&s).map_err(serde::de::Error::custom)
    }
}
