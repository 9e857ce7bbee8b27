// crates/seigledger-core/src/config.rs
//
// Ledger configuration. Deserialized from a TOML table or populated with
// the production constants of the staking system. Large amounts are decimal
// strings in the config file (they exceed every native integer width).

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::{dec_str, ray, BlockNumber};
use crate::error::LedgerError;

/// Configuration for the seigniorage engine and deposit manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Seigniorage minted per block, in WTON units (default 3.92 * 10^27).
    #[serde(with = "dec_str", default = "default_seig_per_block")]
    pub seig_per_block: U256,

    /// Minimum operator stake required to accrue seigniorage
    /// (default 1,000 * 10^27).
    #[serde(with = "dec_str", default = "default_minimum_amount")]
    pub minimum_amount: U256,

    /// RAY-scaled fraction of each accrual routed to the PowerTON reserve
    /// (default 0.10).
    #[serde(with = "dec_str", default = "default_powerton_seig_rate")]
    pub powerton_seig_rate: U256,

    /// RAY-scaled fraction routed to the DAO vault (default 0.50).
    #[serde(with = "dec_str", default = "default_dao_seig_rate")]
    pub dao_seig_rate: U256,

    /// RAY-scaled fraction distributed to operators proportional to their
    /// share of total stake (default 0.40).
    #[serde(with = "dec_str", default = "default_relative_seig_rate")]
    pub relative_seig_rate: U256,

    /// Blocks that must elapse between a withdrawal request and its
    /// processing (default 93,046).
    #[serde(default = "default_withdrawal_delay")]
    pub withdrawal_delay_blocks: BlockNumber,

    /// Block from which the first accrual measures elapsed time
    /// (default 18,169,346).
    #[serde(default = "default_last_seig_block")]
    pub last_seig_block: BlockNumber,

    /// Address credited with the DAO share of each accrual.
    #[serde(default = "default_dao_vault")]
    pub dao_vault: Address,

    /// Address credited with the PowerTON share of each accrual.
    #[serde(default = "default_powerton_vault")]
    pub powerton_vault: Address,
}

fn default_seig_per_block() -> U256 {
    // 3.92 * 10^27
    U256::from(392u64) * U256::exp10(25)
}

fn default_minimum_amount() -> U256 {
    U256::from(1_000u64) * U256::exp10(27)
}

fn default_powerton_seig_rate() -> U256 {
    U256::exp10(26)
}

fn default_dao_seig_rate() -> U256 {
    U256::from(5u64) * U256::exp10(26)
}

fn default_relative_seig_rate() -> U256 {
    U256::from(4u64) * U256::exp10(26)
}

fn default_withdrawal_delay() -> BlockNumber {
    93_046
}

fn default_last_seig_block() -> BlockNumber {
    18_169_346
}

fn default_dao_vault() -> Address {
    Address::derive("seigledger/vault", &[b"dao"])
}

fn default_powerton_vault() -> Address {
    Address::derive("seigledger/vault", &[b"powerton"])
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            seig_per_block: default_seig_per_block(),
            minimum_amount: default_minimum_amount(),
            powerton_seig_rate: default_powerton_seig_rate(),
            dao_seig_rate: default_dao_seig_rate(),
            relative_seig_rate: default_relative_seig_rate(),
            withdrawal_delay_blocks: default_withdrawal_delay(),
            last_seig_block: default_last_seig_block(),
            dao_vault: default_dao_vault(),
            powerton_vault: default_powerton_vault(),
        }
    }
}

impl LedgerConfig {
    /// Validate the invariants the engine assumes.
    ///
    /// # Errors
    /// Returns `LedgerError::InvalidConfig` if the three seigniorage rates
    /// sum to more than 1.0 (RAY) or a vault address is zero.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let rate_sum = self
            .powerton_seig_rate
            .saturating_add(self.dao_seig_rate)
            .saturating_add(self.relative_seig_rate);
        if rate_sum > ray() {
            return Err(LedgerError::InvalidConfig(format!(
                "seigniorage rates sum to {} which exceeds RAY",
                rate_sum
            )));
        }
        if self.dao_vault.is_zero() || self.powerton_vault.is_zero() {
            return Err(LedgerError::InvalidConfig(
                "vault addresses must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
