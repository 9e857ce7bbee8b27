// crates/seigledger-core/src/error.rs

use primitive_types::U256;
use thiserror::Error;

use crate::address::Address;
use crate::amount::BlockNumber;
use crate::traits::Role;

/// Ledger-wide error types.
///
/// Every kind is a synchronous, recoverable-by-caller failure raised before
/// any state mutation; none is fatal to the ledger process. Callers doing
/// idempotent setup should treat `DuplicateName` as a signal to look up and
/// reuse existing state (see `DAOCommittee::create_or_reuse_candidate`).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The target already exists (coinage for an operator, registry entry).
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The operator is not in the layer2 registry.
    #[error("unknown operator: {0}")]
    UnknownOperator(Address),

    /// The seigniorage engine is paused; all mutating calls fail.
    #[error("paused")]
    Paused,

    /// The caller lacks the capability required by the operation.
    #[error("unauthorized: {address} lacks the {role:?} role")]
    Unauthorized { address: Address, role: Role },

    /// Not enough balance or unlocked stake to cover the request.
    #[error("insufficient balance: requested {requested} but only {available} available")]
    InsufficientBalance { requested: U256, available: U256 },

    /// Operator stake is below the seigniorage minimum.
    #[error("minimumAmount is insufficient: staked {staked}, minimum {minimum}")]
    MinimumAmountInsufficient { staked: U256, minimum: U256 },

    /// A withdrawal request is still inside its delay window.
    #[error("wait for withdrawal delay: withdrawable at block {withdrawable_at}, current block {current}")]
    WithdrawalDelayNotElapsed {
        withdrawable_at: BlockNumber,
        current: BlockNumber,
    },

    /// A candidate with this name was already created.
    #[error("duplicate candidate name: {0}")]
    DuplicateName(String),

    /// Configuration failed validation at load time.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
