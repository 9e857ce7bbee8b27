// crates/seigledger-engine/src/coinage.rs
//
// Rebasing balance ledger ("coinage") and its per-operator factory.
//
// Each operator owns one coinage tracking its depositors' staked shares.
// Balances are stored raw and scaled by a RAY fixed-point factor:
//
//   balance_of(a) = raw[a] * factor / RAY
//
// Minting seigniorage rescales the factor once instead of touching every
// holder, so accrual is O(1) in the number of holders. The factor only
// ever increases.

use std::collections::HashMap;

use primitive_types::U256;

use seigledger_core::amount::{mul_div, mul_div_ceil, ray};
use seigledger_core::{Address, LedgerError};

/// A rebasing balance ledger for one operator.
#[derive(Debug, Clone)]
pub struct Coinage {
    /// RAY-scaled accumulated seigniorage multiplier. Starts at RAY (1.0)
    /// and is monotonically non-decreasing.
    factor: U256,
    /// Sum of all raw balances. Kept in lockstep with the map so the
    /// supply invariant holds structurally, not by recomputation.
    raw_total: U256,
    raw: HashMap<Address, U256>,
}

impl Coinage {
    pub fn new() -> Self {
        Self {
            factor: ray(),
            raw_total: U256::zero(),
            raw: HashMap::new(),
        }
    }

    /// The current RAY-scaled factor.
    pub fn factor(&self) -> U256 {
        self.factor
    }

    /// Effective balance of an account: `raw * factor / RAY`, floored.
    pub fn balance_of(&self, account: Address) -> U256 {
        let raw = self.raw.get(&account).copied().unwrap_or_default();
        mul_div(raw, self.factor, ray())
    }

    /// Effective total supply: `raw_total * factor / RAY`, floored.
    ///
    /// Flooring here and in `balance_of` means `sum(balance_of(*))` can
    /// fall short of `total_supply()` by at most one unit per holder, and
    /// can never exceed it.
    pub fn total_supply(&self) -> U256 {
        mul_div(self.raw_total, self.factor, ray())
    }

    /// Credit `amount` effective units to an account. Raw shares are
    /// derived by floor division, so the credited effective balance is
    /// within one unit below `amount`.
    pub fn mint_to(&mut self, account: Address, amount: U256) {
        let raw = mul_div(amount, ray(), self.factor);
        let entry = self.raw.entry(account).or_default();
        *entry = entry.saturating_add(raw);
        self.raw_total = self.raw_total.saturating_add(raw);
    }

    /// Debit `amount` effective units from an account.
    ///
    /// Raw shares are removed with ceiling division (capped at the held
    /// raw balance), so a full withdrawal never strands dust.
    ///
    /// # Errors
    /// Returns `LedgerError::InsufficientBalance` if the account's
    /// effective balance cannot cover `amount`. No state changes on error.
    pub fn burn_from(&mut self, account: Address, amount: U256) -> Result<(), LedgerError> {
        let balance = self.balance_of(account);
        if amount > balance {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: balance,
            });
        }
        let held_raw = self.raw.get(&account).copied().unwrap_or_default();
        let raw = mul_div_ceil(amount, ray(), self.factor).min(held_raw);
        if raw == held_raw {
            self.raw.remove(&account);
        } else if let Some(entry) = self.raw.get_mut(&account) {
            *entry -= raw;
        }
        self.raw_total -= raw;
        Ok(())
    }

    /// Move `amount` effective units between accounts without touching the
    /// factor.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.burn_from(from, amount)?;
        self.mint_to(to, amount);
        Ok(())
    }

    /// Mint `amount` effective units pro rata across every holder by
    /// rescaling the factor: `factor *= (total + amount) / total`.
    ///
    /// Returns the new factor. Minting into an empty coinage is a no-op
    /// (there is nothing to scale).
    pub fn rebase(&mut self, amount: U256) -> U256 {
        let total = self.total_supply();
        if total.is_zero() || amount.is_zero() {
            return self.factor;
        }
        self.factor = mul_div(self.factor, total.saturating_add(amount), total);
        self.factor
    }

    /// Number of accounts holding a non-zero raw balance.
    pub fn holder_count(&self) -> usize {
        self.raw.len()
    }
}

impl Default for Coinage {
    fn default() -> Self {
        Self::new()
    }
}

/// Issues and holds one coinage per operator.
#[derive(Debug, Default)]
pub struct CoinageFactory {
    coinages: HashMap<Address, Coinage>,
}

impl CoinageFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the coinage for an operator.
    ///
    /// # Errors
    /// Returns `LedgerError::AlreadyExists` if the operator already has
    /// one — creation is idempotent-failing per operator.
    pub fn create(&mut self, operator: Address) -> Result<(), LedgerError> {
        if self.coinages.contains_key(&operator) {
            return Err(LedgerError::AlreadyExists(format!(
                "coinage for operator {}",
                operator
            )));
        }
        self.coinages.insert(operator, Coinage::new());
        Ok(())
    }

    pub fn contains(&self, operator: Address) -> bool {
        self.coinages.contains_key(&operator)
    }

    pub fn get(&self, operator: Address) -> Option<&Coinage> {
        self.coinages.get(&operator)
    }

    pub fn get_mut(&mut self, operator: Address) -> Option<&mut Coinage> {
        self.coinages.get_mut(&operator)
    }

    /// Grand total staked across all operators' coinages. Recomputed on
    /// demand; the relative seigniorage split depends on it.
    pub fn total_staked(&self) -> U256 {
        self.coinages
            .values()
            .fold(U256::zero(), |acc, c| acc.saturating_add(c.total_supply()))
    }
}
