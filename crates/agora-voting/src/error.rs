use std::fmt;

use agora_types::Address;
use thiserror::Error;

use crate::status::WorkflowStatus;

/// Role a caller must hold for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Voter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Administrator => write!(f, "administrator"),
            Role::Voter => write!(f, "registered voter"),
        }
    }
}

/// Errors that can occur in workflow operations.
///
/// Every variant is raised before any state is touched, so a rejected call
/// leaves the engine exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VotingError {
    #[error("Unauthorized: {caller} is not a {role}")]
    Unauthorized { caller: Address, role: Role },

    #[error("Invalid phase: current status is {current}, expected {expected}")]
    InvalidPhase {
        expected: WorkflowStatus,
        current: WorkflowStatus,
    },

    #[error("Already registered: {0}")]
    AlreadyRegistered(Address),

    #[error("Proposal description is empty")]
    EmptyProposal,

    #[error("Already voted: {0}")]
    AlreadyVoted(Address),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),
}
