// crates/seigledger-core/src/events.rs
//
// Structured event records emitted by the ledger for external indexers and
// tests. Events are appended in operation order and drained by the consumer.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::BlockNumber;

/// A notification record emitted after a successful state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum StakingEvent {
    /// A new candidate operator was created and registered.
    CandidateCreated {
        contract: Address,
        identity: Address,
        memo: String,
    },

    /// Stake was deposited to an operator (amount in WTON units).
    Deposited {
        operator: Address,
        account: Address,
        amount: U256,
    },

    /// A two-phase withdrawal was opened; funds stop earning seigniorage
    /// but are not yet released.
    WithdrawalRequested {
        operator: Address,
        account: Address,
        amount: U256,
        requested_at: BlockNumber,
    },

    /// A pending withdrawal cleared its delay and was paid out.
    WithdrawalProcessed {
        operator: Address,
        account: Address,
        amount: U256,
    },

    /// Seigniorage was accrued into an operator's coinage.
    SeigniorageUpdated {
        operator: Address,
        amount: U256,
        new_factor: U256,
    },
}
