// crates/seigledger-engine/src/seig.rs
//
// The seigniorage accrual engine.
//
// Seigniorage accrues per block against a single global clock and is split
// three ways on every accrual: a PowerTON reserve share, a DAO share, and
// a "relative" share distributed to the calling operator proportional to
// its stake over the grand total staked across all operators. The engine
// exclusively owns every coinage factor and the WTON minting that backs
// grown stakes.
//
//   total_seig   = (block - last_seig_block) * seig_per_block
//   powerton     = total_seig * powerton_seig_rate / RAY
//   dao          = total_seig * dao_seig_rate / RAY
//   relative     = total_seig * relative_seig_rate / RAY
//   operator     = relative * operator_stake / grand_total_stake
//
// All divisions floor; per-call dust is dropped, never credited or burned.

use std::collections::HashMap;

use primitive_types::U256;

use seigledger_core::amount::{mul_div, ray, BlockNumber};
use seigledger_core::{Address, LedgerConfig, LedgerError};

use crate::coinage::CoinageFactory;

/// The outcome of one successful accrual, for the caller to settle token
/// backing and emit notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeigUpdate {
    /// Seigniorage rebased into the operator's coinage.
    pub operator_amount: U256,
    /// Share minted to the DAO vault.
    pub dao_amount: U256,
    /// Share minted to the PowerTON reserve.
    pub powerton_amount: U256,
    /// The operator coinage factor after the accrual.
    pub new_factor: U256,
}

/// Central accrual engine. Owns the coinage factory and the pause switch.
#[derive(Debug)]
pub struct SeigManager {
    seig_per_block: U256,
    minimum_amount: U256,
    powerton_seig_rate: U256,
    dao_seig_rate: U256,
    relative_seig_rate: U256,
    /// Global last-accrual block, shared by all operators.
    last_seig_block: BlockNumber,
    /// Per-operator last-commit marker; a repeat in the same block is an
    /// Ok no-op rather than a double accrual.
    last_commit_block: HashMap<Address, BlockNumber>,
    paused: bool,
    factory: CoinageFactory,
}

impl SeigManager {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            seig_per_block: config.seig_per_block,
            minimum_amount: config.minimum_amount,
            powerton_seig_rate: config.powerton_seig_rate,
            dao_seig_rate: config.dao_seig_rate,
            relative_seig_rate: config.relative_seig_rate,
            last_seig_block: config.last_seig_block,
            last_commit_block: HashMap::new(),
            paused: false,
            factory: CoinageFactory::new(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause all mutating operations. Idempotent.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume prior behavior exactly; no residual effect on balances.
    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn last_seig_block(&self) -> BlockNumber {
        self.last_seig_block
    }

    pub fn seig_per_block(&self) -> U256 {
        self.seig_per_block
    }

    pub fn minimum_amount(&self) -> U256 {
        self.minimum_amount
    }

    /// Issue the coinage for a newly registered operator.
    pub fn deploy_coinage(&mut self, operator: Address) -> Result<(), LedgerError> {
        self.factory.create(operator)
    }

    pub fn has_coinage(&self, operator: Address) -> bool {
        self.factory.contains(operator)
    }

    /// Effective staked balance of `account` on `operator`.
    pub fn stake_of(&self, operator: Address, account: Address) -> U256 {
        self.factory
            .get(operator)
            .map(|c| c.balance_of(account))
            .unwrap_or_default()
    }

    /// Effective total staked on `operator`.
    pub fn staked_total(&self, operator: Address) -> U256 {
        self.factory
            .get(operator)
            .map(|c| c.total_supply())
            .unwrap_or_default()
    }

    /// Grand total staked across every operator.
    pub fn grand_total_staked(&self) -> U256 {
        self.factory.total_staked()
    }

    pub fn coinage_factor(&self, operator: Address) -> U256 {
        self.factory.get(operator).map(|c| c.factor()).unwrap_or_else(ray)
    }

    /// Stake credit on deposit: mints into the operator's coinage.
    pub fn on_deposit(
        &mut self,
        operator: Address,
        account: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_active()?;
        let coinage = self
            .factory
            .get_mut(operator)
            .ok_or(LedgerError::UnknownOperator(operator))?;
        coinage.mint_to(account, amount);
        Ok(())
    }

    /// Stake debit on withdrawal request: burns from the operator's
    /// coinage so the funds stop earning seigniorage immediately.
    pub fn on_withdrawal_request(
        &mut self,
        operator: Address,
        account: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_active()?;
        let coinage = self
            .factory
            .get_mut(operator)
            .ok_or(LedgerError::UnknownOperator(operator))?;
        coinage.burn_from(account, amount)
    }

    /// Accrue seigniorage for `operator` up to `current_block`.
    ///
    /// Validation order: pause switch, operator existence, the minimum
    /// stake guard (blocks seigniorage farming on near-empty operators),
    /// then the same-block repeat no-op. Nothing mutates until every
    /// check has passed.
    ///
    /// # Errors
    /// `Paused`, `UnknownOperator`, or `MinimumAmountInsufficient`; each
    /// leaves all state untouched, so one operator's failure never blocks
    /// another operator's accrual.
    pub fn update_seigniorage(
        &mut self,
        operator: Address,
        current_block: BlockNumber,
    ) -> Result<SeigUpdate, LedgerError> {
        self.ensure_active()?;
        if !self.factory.contains(operator) {
            return Err(LedgerError::UnknownOperator(operator));
        }

        let operator_stake = self.staked_total(operator);
        if operator_stake < self.minimum_amount {
            return Err(LedgerError::MinimumAmountInsufficient {
                staked: operator_stake,
                minimum: self.minimum_amount,
            });
        }

        let already_committed = self
            .last_commit_block
            .get(&operator)
            .is_some_and(|&b| b >= current_block);
        let elapsed = current_block.saturating_sub(self.last_seig_block);
        if already_committed || elapsed == 0 {
            // Accrued this block already (or the global clock has not
            // advanced): success with nothing to mint.
            self.last_commit_block.insert(operator, current_block);
            return Ok(SeigUpdate {
                operator_amount: U256::zero(),
                dao_amount: U256::zero(),
                powerton_amount: U256::zero(),
                new_factor: self.coinage_factor(operator),
            });
        }

        let total_seig = self.seig_per_block.saturating_mul(U256::from(elapsed));
        let powerton_amount = mul_div(total_seig, self.powerton_seig_rate, ray());
        let dao_amount = mul_div(total_seig, self.dao_seig_rate, ray());
        let relative_pool = mul_div(total_seig, self.relative_seig_rate, ray());

        // The algorithmic core: the operator's reward is proportional to
        // its share of the grand total stake, recomputed on every call.
        let grand_total = self.grand_total_staked();
        let operator_amount = mul_div(relative_pool, operator_stake, grand_total);

        let new_factor = self
            .factory
            .get_mut(operator)
            .ok_or(LedgerError::UnknownOperator(operator))?
            .rebase(operator_amount);

        self.last_seig_block = current_block;
        self.last_commit_block.insert(operator, current_block);

        Ok(SeigUpdate {
            operator_amount,
            dao_amount,
            powerton_amount,
            new_factor,
        })
    }

    fn ensure_active(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }
}
