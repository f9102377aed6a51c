//! Workflow phases.
//!
//! RegisteringVoters -> ProposalsRegistrationStarted -> ProposalsRegistrationEnded
//! -> VotingSessionStarted -> VotingSessionEnded -> VotesTallied

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the voting workflow. Strictly ordered; never skipped or re-entered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum WorkflowStatus {
    /// Administrator is registering voters
    #[default]
    RegisteringVoters,
    /// Registered voters may submit proposals
    ProposalsRegistrationStarted,
    /// Proposal list is frozen
    ProposalsRegistrationEnded,
    /// Registered voters may cast their vote
    VotingSessionStarted,
    /// Votes are frozen, waiting for the tally
    VotingSessionEnded,
    /// Winner computed (terminal)
    VotesTallied,
}

impl WorkflowStatus {
    /// The phase that follows this one, if any.
    pub fn next(&self) -> Option<WorkflowStatus> {
        match self {
            WorkflowStatus::RegisteringVoters => Some(WorkflowStatus::ProposalsRegistrationStarted),
            WorkflowStatus::ProposalsRegistrationStarted => {
                Some(WorkflowStatus::ProposalsRegistrationEnded)
            }
            WorkflowStatus::ProposalsRegistrationEnded => Some(WorkflowStatus::VotingSessionStarted),
            WorkflowStatus::VotingSessionStarted => Some(WorkflowStatus::VotingSessionEnded),
            WorkflowStatus::VotingSessionEnded => Some(WorkflowStatus::VotesTallied),
            WorkflowStatus::VotesTallied => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStatus::VotesTallied)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStatus::RegisteringVoters => "registering voters",
            WorkflowStatus::ProposalsRegistrationStarted => "proposals registration started",
            WorkflowStatus::ProposalsRegistrationEnded => "proposals registration ended",
            WorkflowStatus::VotingSessionStarted => "voting session started",
            WorkflowStatus::VotingSessionEnded => "voting session ended",
            WorkflowStatus::VotesTallied => "votes tallied",
        };
        write!(f, "{}", name)
    }
}
