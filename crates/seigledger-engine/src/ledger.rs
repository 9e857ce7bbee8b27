// crates/seigledger-engine/src/ledger.rs
//
// The StakingLedger facade: wires the registry, committee, deposit
// manager, and seigniorage engine together and serializes every mutating
// operation behind `&mut self`. Cross-component calls are synchronous
// function calls within one operation; there are no background tasks.
//
// The facade also owns the two token ledgers (native TON and wrapped
// WTON), the role oracle, the block clock, and the ordered event log
// consumed by external indexers.

use std::sync::Arc;

use primitive_types::U256;
use tracing::{debug, info};

use seigledger_core::amount::{to_ton_floor, to_wton, BlockNumber};
use seigledger_core::{
    Address, BlockClock, LedgerConfig, LedgerError, Role, RoleOracle, StakingEvent, TokenLedger,
};

use crate::committee::{Candidate, DAOCommittee};
use crate::deposit::DepositManager;
use crate::registry::Layer2Registry;
use crate::seig::SeigManager;

/// The single-writer staking ledger.
pub struct StakingLedger {
    registry: Layer2Registry,
    committee: DAOCommittee,
    deposits: DepositManager,
    seig: SeigManager,
    ton: Box<dyn TokenLedger>,
    wton: Box<dyn TokenLedger>,
    roles: Box<dyn RoleOracle>,
    clock: Arc<dyn BlockClock>,
    /// Account holding deposited WTON and the backing for accrued stakes.
    reserve: Address,
    /// Account holding TON locked by TON→WTON swaps.
    swap_custody: Address,
    dao_vault: Address,
    powerton_vault: Address,
    events: Vec<StakingEvent>,
}

impl StakingLedger {
    /// # Errors
    /// Returns `LedgerError::InvalidConfig` if the config fails
    /// validation (rate sum above RAY, zero vault addresses).
    pub fn new(
        config: LedgerConfig,
        committee_address: Address,
        ton: Box<dyn TokenLedger>,
        wton: Box<dyn TokenLedger>,
        roles: Box<dyn RoleOracle>,
        clock: Arc<dyn BlockClock>,
    ) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            registry: Layer2Registry::new(),
            committee: DAOCommittee::new(committee_address),
            deposits: DepositManager::new(config.withdrawal_delay_blocks),
            seig: SeigManager::new(&config),
            ton,
            wton,
            roles,
            clock,
            reserve: Address::derive("seigledger/reserve", &[b"deposit-manager"]),
            swap_custody: Address::derive("seigledger/reserve", &[b"swap-custody"]),
            events: Vec::new(),
            dao_vault: config.dao_vault,
            powerton_vault: config.powerton_vault,
        })
    }

    // ------------------------------------------------------------------
    // Candidate governance
    // ------------------------------------------------------------------

    /// Create a candidate operator (committee `Admin` gate).
    pub fn create_candidate(
        &mut self,
        caller: Address,
        name: &str,
        admin: Address,
    ) -> Result<Candidate, LedgerError> {
        let block = self.clock.current_block();
        let candidate = self.committee.create_candidate(
            caller,
            name,
            admin,
            &mut self.registry,
            &mut self.seig,
            self.roles.as_ref(),
            block,
        )?;
        info!(name, contract = %candidate.contract, "candidate created");
        self.events.push(StakingEvent::CandidateCreated {
            contract: candidate.contract,
            identity: candidate.identity,
            memo: candidate.name.clone(),
        });
        Ok(candidate)
    }

    /// Candidate creation with typed retry recovery: a duplicate name
    /// resolves to the existing candidate without emitting a new record.
    pub fn create_or_reuse_candidate(
        &mut self,
        caller: Address,
        name: &str,
        admin: Address,
    ) -> Result<Candidate, LedgerError> {
        match self.create_candidate(caller, name, admin) {
            Err(LedgerError::DuplicateName(_)) => {
                debug!(name, "candidate already migrated, reusing");
                self.committee
                    .candidate(name)
                    .cloned()
                    .ok_or_else(|| LedgerError::DuplicateName(name.to_string()))
            }
            other => other,
        }
    }

    /// Register a pre-existing operator directly (`Minter` gate).
    pub fn register_operator(
        &mut self,
        caller: Address,
        operator: Address,
    ) -> Result<(), LedgerError> {
        if !self.roles.has_role(caller, Role::Minter) {
            return Err(LedgerError::Unauthorized {
                address: caller,
                role: Role::Minter,
            });
        }
        self.registry.register(operator)?;
        self.seig.deploy_coinage(operator)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Deposits and withdrawals
    // ------------------------------------------------------------------

    /// Deposit WTON stake to a registered operator.
    pub fn deposit(
        &mut self,
        account: Address,
        operator: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_registered(operator)?;
        if self.seig.is_paused() {
            return Err(LedgerError::Paused);
        }
        self.wton.transfer(account, self.reserve, amount)?;
        self.deposits.deposit(operator, account, amount);
        self.seig.on_deposit(operator, account, amount)?;
        info!(%operator, %account, %amount, "deposited");
        self.events.push(StakingEvent::Deposited {
            operator,
            account,
            amount,
        });
        Ok(())
    }

    /// Deposit native TON: swapped to WTON at the fixed 10^9 scale, then
    /// staked. This models the allowance+mint integration path; the
    /// WTON-denominated [`deposit`](Self::deposit) entry point does not
    /// accept native-token amounts.
    pub fn deposit_ton(
        &mut self,
        account: Address,
        operator: Address,
        ton_amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_registered(operator)?;
        if self.seig.is_paused() {
            return Err(LedgerError::Paused);
        }
        self.ton.transfer(account, self.swap_custody, ton_amount)?;
        self.wton.mint(account, to_wton(ton_amount))?;
        self.deposit(account, operator, to_wton(ton_amount))
    }

    /// Open a two-phase withdrawal: locks `amount` in the book and burns
    /// the stake immediately so it stops earning seigniorage. Funds move
    /// only in [`process_request`](Self::process_request).
    pub fn request_withdrawal(
        &mut self,
        account: Address,
        operator: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_registered(operator)?;
        if self.seig.is_paused() {
            return Err(LedgerError::Paused);
        }
        let block = self.clock.current_block();
        let request = self
            .deposits
            .request_withdrawal(operator, account, amount, block)?;
        // Deposit-to-raw flooring can leave the stake a unit or two below
        // the booked amount; the book is the gate, so clamp the burn.
        let burn = amount.min(self.seig.stake_of(operator, account));
        self.seig.on_withdrawal_request(operator, account, burn)?;
        debug!(%operator, %account, %amount, requested_at = request.requested_at, "withdrawal requested");
        self.events.push(StakingEvent::WithdrawalRequested {
            operator,
            account,
            amount,
            requested_at: request.requested_at,
        });
        Ok(())
    }

    /// Process the oldest pending withdrawal for (operator, account) once
    /// its delay has elapsed. Pays out WTON, or native TON at the fixed
    /// 10^9 scale when `receive_ton` is set.
    pub fn process_request(
        &mut self,
        account: Address,
        operator: Address,
        receive_ton: bool,
    ) -> Result<U256, LedgerError> {
        if self.seig.is_paused() {
            return Err(LedgerError::Paused);
        }
        let block = self.clock.current_block();
        let request = self.deposits.process_request(operator, account, block)?;
        if receive_ton {
            self.wton
                .transfer(self.reserve, self.swap_custody, request.amount)?;
            self.ton.mint(account, to_ton_floor(request.amount))?;
        } else {
            self.wton.transfer(self.reserve, account, request.amount)?;
        }
        info!(%operator, %account, amount = %request.amount, receive_ton, "withdrawal processed");
        self.events.push(StakingEvent::WithdrawalProcessed {
            operator,
            account,
            amount: request.amount,
        });
        Ok(request.amount)
    }

    // ------------------------------------------------------------------
    // Seigniorage
    // ------------------------------------------------------------------

    /// Accrue seigniorage for an operator up to the current block. The
    /// operator share is rebased into its coinage with WTON backing
    /// minted to the reserve; the DAO and PowerTON shares are minted to
    /// their vaults.
    pub fn update_seigniorage(&mut self, operator: Address) -> Result<U256, LedgerError> {
        let block = self.clock.current_block();
        let update = self.seig.update_seigniorage(operator, block)?;
        self.wton.mint(self.reserve, update.operator_amount)?;
        self.wton.mint(self.dao_vault, update.dao_amount)?;
        self.wton.mint(self.powerton_vault, update.powerton_amount)?;
        info!(
            %operator,
            amount = %update.operator_amount,
            new_factor = %update.new_factor,
            "seigniorage updated"
        );
        self.events.push(StakingEvent::SeigniorageUpdated {
            operator,
            amount: update.operator_amount,
            new_factor: update.new_factor,
        });
        Ok(update.operator_amount)
    }

    /// Pause all mutating operations (`Pauser` gate). Idempotent.
    pub fn pause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.ensure_role(caller, Role::Pauser)?;
        self.seig.pause();
        info!(%caller, "ledger paused");
        Ok(())
    }

    /// Unpause (`Pauser` gate); prior behavior resumes exactly.
    pub fn unpause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.ensure_role(caller, Role::Pauser)?;
        self.seig.unpause();
        info!(%caller, "ledger unpaused");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries (read-only, consistent snapshot)
    // ------------------------------------------------------------------

    pub fn is_paused(&self) -> bool {
        self.seig.is_paused()
    }

    pub fn num_layer2s(&self) -> u64 {
        self.registry.num_layer2s()
    }

    pub fn candidate(&self, name: &str) -> Option<&Candidate> {
        self.committee.candidate(name)
    }

    pub fn stake_of(&self, operator: Address, account: Address) -> U256 {
        self.seig.stake_of(operator, account)
    }

    pub fn staked_total(&self, operator: Address) -> U256 {
        self.seig.staked_total(operator)
    }

    pub fn coinage_factor(&self, operator: Address) -> U256 {
        self.seig.coinage_factor(operator)
    }

    pub fn deposited(&self, operator: Address, account: Address) -> U256 {
        self.deposits.deposited(operator, account)
    }

    pub fn pending_total(&self, operator: Address, account: Address) -> U256 {
        self.deposits.pending_total(operator, account)
    }

    pub fn pending_count(&self, operator: Address, account: Address) -> usize {
        self.deposits.pending_count(operator, account)
    }

    pub fn withdrawal_delay(&self) -> BlockNumber {
        self.deposits.withdrawal_delay()
    }

    pub fn last_seig_block(&self) -> BlockNumber {
        self.seig.last_seig_block()
    }

    pub fn ton_balance_of(&self, account: Address) -> U256 {
        self.ton.balance_of(account)
    }

    pub fn wton_balance_of(&self, account: Address) -> U256 {
        self.wton.balance_of(account)
    }

    pub fn reserve_address(&self) -> Address {
        self.reserve
    }

    /// Events emitted so far, in operation order.
    pub fn events(&self) -> &[StakingEvent] {
        &self.events
    }

    /// Drain the event log, handing records to the external indexer.
    pub fn take_events(&mut self) -> Vec<StakingEvent> {
        std::mem::take(&mut self.events)
    }

    fn ensure_registered(&self, operator: Address) -> Result<(), LedgerError> {
        if !self.registry.is_registered(operator) {
            return Err(LedgerError::UnknownOperator(operator));
        }
        Ok(())
    }

    fn ensure_role(&self, caller: Address, role: Role) -> Result<(), LedgerError> {
        if !self.roles.has_role(caller, role) {
            return Err(LedgerError::Unauthorized {
                address: caller,
                role,
            });
        }
        Ok(())
    }
}
