// crates/seigledger-engine/src/collab.rs
//
// In-memory implementations of the external collaborator traits: a token
// balance ledger, a static capability set, and a manually advanced block
// clock. Used by the test suites and the CLI scenario runner; deployments
// replace these with the real execution environment.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use primitive_types::U256;

use seigledger_core::amount::BlockNumber;
use seigledger_core::{Address, BlockClock, LedgerError, Role, RoleOracle, TokenLedger};

/// A simple in-memory token balance ledger for one token unit.
#[derive(Debug, Default)]
pub struct MemoryToken {
    balances: HashMap<Address, U256>,
    total_supply: U256,
}

impl MemoryToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenLedger for MemoryToken {
    fn mint(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        let entry = self.balances.entry(to).or_default();
        *entry = entry.saturating_add(amount);
        self.total_supply = self.total_supply.saturating_add(amount);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= amount;
        }
        let entry = self.balances.entry(to).or_default();
        *entry = entry.saturating_add(amount);
        Ok(())
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn total_supply(&self) -> U256 {
        self.total_supply
    }
}

/// A fixed capability set: address → granted roles.
#[derive(Debug, Default)]
pub struct StaticRoles {
    grants: HashMap<Address, HashSet<Role>>,
}

impl StaticRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, address: Address, role: Role) {
        self.grants.entry(address).or_default().insert(role);
    }
}

impl RoleOracle for StaticRoles {
    fn has_role(&self, address: Address, role: Role) -> bool {
        self.grants
            .get(&address)
            .is_some_and(|roles| roles.contains(&role))
    }
}

/// A manually advanced block counter. Shared between the driver and the
/// ledger via `Arc`, so tests advance time without touching the ledger.
#[derive(Debug, Default)]
pub struct ManualClock {
    block: AtomicU64,
}

impl ManualClock {
    pub fn new(start: BlockNumber) -> Self {
        Self {
            block: AtomicU64::new(start),
        }
    }

    /// Advance the counter by `blocks` and return the new height.
    pub fn advance(&self, blocks: u64) -> BlockNumber {
        self.block.fetch_add(blocks, Ordering::SeqCst) + blocks
    }
}

impl BlockClock for ManualClock {
    fn current_block(&self) -> BlockNumber {
        self.block.load(Ordering::SeqCst)
    }
}
