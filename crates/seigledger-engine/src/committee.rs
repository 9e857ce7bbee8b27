// crates/seigledger-engine/src/committee.rs
//
// DAO committee: creates candidate operators, owns their identities, and
// registers them with the layer2 registry (the committee address holds
// the registry's minter capability).

use serde::{Deserialize, Serialize};

use seigledger_core::amount::BlockNumber;
use seigledger_core::{Address, LedgerError, Role, RoleOracle};

use crate::registry::Layer2Registry;
use crate::seig::SeigManager;

/// A candidate operator created by the DAO committee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate's operator contract address — the address deposits
    /// and seigniorage accrue against.
    pub contract: Address,
    /// The candidate's admin identity.
    pub identity: Address,
    /// Unique name (the creation record's memo).
    pub name: String,
    /// The committee that created the candidate.
    pub committee: Address,
    pub registered_at_block: BlockNumber,
}

/// The DAO committee: candidate creation and lookup.
#[derive(Debug)]
pub struct DAOCommittee {
    address: Address,
    candidates: Vec<Candidate>,
}

impl DAOCommittee {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            candidates: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn candidate(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Create a candidate: derive its contract address, register it with
    /// the registry, and deploy its coinage.
    ///
    /// Requires the caller to hold the `Admin` role and the committee
    /// itself to hold the registry's `Minter` capability. All validation
    /// runs before any cross-component mutation.
    ///
    /// # Errors
    /// `Unauthorized` for a caller without `Admin` or a committee without
    /// `Minter`; `DuplicateName` when the name was already used — callers
    /// doing idempotent setup should fall back to
    /// [`create_or_reuse_candidate`](Self::create_or_reuse_candidate).
    #[allow(clippy::too_many_arguments)]
    pub fn create_candidate(
        &mut self,
        caller: Address,
        name: &str,
        admin: Address,
        registry: &mut Layer2Registry,
        seig: &mut SeigManager,
        roles: &dyn RoleOracle,
        current_block: BlockNumber,
    ) -> Result<Candidate, LedgerError> {
        if !roles.has_role(caller, Role::Admin) {
            return Err(LedgerError::Unauthorized {
                address: caller,
                role: Role::Admin,
            });
        }
        if !roles.has_role(self.address, Role::Minter) {
            return Err(LedgerError::Unauthorized {
                address: self.address,
                role: Role::Minter,
            });
        }
        if self.candidate(name).is_some() {
            return Err(LedgerError::DuplicateName(name.to_string()));
        }

        let contract = Address::derive(
            "seigledger/candidate",
            &[self.address.as_bytes(), name.as_bytes()],
        );
        registry.register(contract)?;
        seig.deploy_coinage(contract)?;

        let candidate = Candidate {
            contract,
            identity: admin,
            name: name.to_string(),
            committee: self.address,
            registered_at_block: current_block,
        };
        self.candidates.push(candidate.clone());
        Ok(candidate)
    }

    /// Idempotent candidate creation: a `DuplicateName` failure is treated
    /// as "already migrated" and resolves to the existing candidate
    /// instead of failing the workflow.
    #[allow(clippy::too_many_arguments)]
    pub fn create_or_reuse_candidate(
        &mut self,
        caller: Address,
        name: &str,
        admin: Address,
        registry: &mut Layer2Registry,
        seig: &mut SeigManager,
        roles: &dyn RoleOracle,
        current_block: BlockNumber,
    ) -> Result<Candidate, LedgerError> {
        match self.create_candidate(caller, name, admin, registry, seig, roles, current_block) {
            Ok(candidate) => Ok(candidate),
            Err(LedgerError::DuplicateName(_)) => self
                .candidate(name)
                .cloned()
                .ok_or_else(|| LedgerError::DuplicateName(name.to_string())),
            Err(e) => Err(e),
        }
    }
}
