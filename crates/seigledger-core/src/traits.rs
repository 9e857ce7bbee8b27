// crates/seigledger-core/src/traits.rs
//
// Collaborator traits at the boundary between the accounting core and the
// external execution environment. All traits are synchronous: the core is a
// single-writer state-transition function driven one operation at a time by
// an external total-order service, so nothing here blocks or suspends.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::BlockNumber;
use crate::error::LedgerError;

/// Capabilities checked for privileged operations. Role assignment and
/// enumeration live in the external policy layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May write registry entries (register operators).
    Minter,
    /// May pause and unpause the seigniorage engine.
    Pauser,
    /// May create candidates and change privileged configuration.
    Admin,
}

/// The monotonically increasing block counter — the ledger's only time
/// source. Withdrawal delays and seigniorage accrual are expressed purely
/// as block-count comparisons against this clock.
pub trait BlockClock: Send + Sync {
    fn current_block(&self) -> BlockNumber;
}

/// A token balance ledger for one token unit (TON or WTON).
///
/// Implemented in-process for tests and simulation; in deployment this is
/// the external token contract surface.
pub trait TokenLedger: Send + Sync {
    /// Create new tokens in `to`'s balance.
    fn mint(&mut self, to: Address, amount: U256) -> Result<(), LedgerError>;

    /// Move tokens between accounts.
    ///
    /// # Errors
    /// Returns `LedgerError::InsufficientBalance` if `from` cannot cover
    /// `amount`.
    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError>;

    fn balance_of(&self, account: Address) -> U256;

    fn total_supply(&self) -> U256;
}

/// Capability check against the external policy collaborator.
pub trait RoleOracle: Send + Sync {
    fn has_role(&self, address: Address, role: Role) -> bool;
}
