// crates/seigledger-core/src/lib.rs
//
// seigledger-core: core types, fixed-point math, errors, events, and
// collaborator traits for the seigledger staking engine.
//
// This is the leaf crate that the engine and CLI depend on. All monetary
// values are tracked in WTON units (27 decimals, RAY fixed-point); the
// native TON unit (18 decimals) is related by a fixed 10^9 scale factor.

pub mod address;
pub mod amount;
pub mod config;
pub mod error;
pub mod events;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
pub use address::Address;
pub use amount::{mul_div, mul_div_ceil, ray, to_ton_floor, to_wton, BlockNumber, WTON_PER_TON};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use events::StakingEvent;
pub use traits::{BlockClock, Role, RoleOracle, TokenLedger};
