// crates/seigledger-engine/src/lib.rs
//
// seigledger-engine: the staking/reward accounting engine.
//
// A deterministic single-writer ledger: operations arrive one at a time in
// an externally decided total order, and every mutating call either
// completes or fails synchronously before touching state. The components
// mirror the ownership split of the source system — the seigniorage
// manager owns coinage factors and WTON minting, the deposit manager owns
// withdrawal bookkeeping, the registry owns operator membership, and the
// DAO committee owns candidate identities.

pub mod coinage;
pub mod collab;
pub mod committee;
pub mod deposit;
pub mod ledger;
pub mod registry;
pub mod seig;

// Re-export key types for ergonomic access from downstream crates.
pub use coinage::{Coinage, CoinageFactory};
pub use collab::{ManualClock, MemoryToken, StaticRoles};
pub use committee::{Candidate, DAOCommittee};
pub use deposit::{DepositManager, WithdrawalRequest};
pub use ledger::StakingLedger;
pub use registry::Layer2Registry;
pub use seig::{SeigManager, SeigUpdate};
