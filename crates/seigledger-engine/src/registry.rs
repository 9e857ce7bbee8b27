// crates/seigledger-engine/src/registry.rs
//
// The layer2 registry: the authoritative, append-only set of registered
// operators. Registration is minter-gated; the gate itself is checked by
// the callers that hold the role oracle (the facade and the committee).

use std::collections::HashSet;

use seigledger_core::{Address, LedgerError};

/// Append-only set of registered operator addresses.
///
/// `num_layer2s()` always equals the set cardinality and only ever grows;
/// removal is not part of the observed operator lifecycle.
#[derive(Debug, Default)]
pub struct Layer2Registry {
    layer2s: HashSet<Address>,
    // Insertion order, for stable iteration in reports.
    ordered: Vec<Address>,
}

impl Layer2Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operator.
    ///
    /// # Errors
    /// Returns `LedgerError::AlreadyExists` if the operator is already
    /// registered. No state changes on error.
    pub fn register(&mut self, operator: Address) -> Result<(), LedgerError> {
        if !self.layer2s.insert(operator) {
            return Err(LedgerError::AlreadyExists(format!(
                "registry entry for operator {}",
                operator
            )));
        }
        self.ordered.push(operator);
        Ok(())
    }

    pub fn is_registered(&self, operator: Address) -> bool {
        self.layer2s.contains(&operator)
    }

    /// Number of registered operators.
    pub fn num_layer2s(&self) -> u64 {
        self.layer2s.len() as u64
    }

    /// Registered operators in registration order.
    pub fn layer2s(&self) -> &[Address] {
        &self.ordered
    }
}
