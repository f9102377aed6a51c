//! Notifications emitted by the workflow engine.
//!
//! Every successful state change appends exactly one event; rejected calls
//! append nothing.

use agora_types::Address;
use serde::{Deserialize, Serialize};

use crate::status::WorkflowStatus;

/// Observable side effect of a workflow operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum VotingEvent {
    /// A principal was added to the voter registry
    VoterRegistered { voter: Address },
    /// A proposal was appended at `proposal_id`
    ProposalRegistered { proposal_id: u64 },
    /// `voter` cast a ballot for `proposal_id`
    Voted { voter: Address, proposal_id: u64 },
    /// The workflow moved from `previous` to `next`
    WorkflowStatusChange {
        previous: WorkflowStatus,
        next: WorkflowStatus,
    },
}

impl VotingEvent {
    /// Event name without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            VotingEvent::VoterRegistered { .. } => "VoterRegistered",
            VotingEvent::ProposalRegistered { .. } => "ProposalRegistered",
            VotingEvent::Voted { .. } => "Voted",
            VotingEvent::WorkflowStatusChange { .. } => "WorkflowStatusChange",
        }
    }

    /// Canonical signature, used to derive the topic.
    pub fn signature(&self) -> &'static str {
        match self {
            VotingEvent::VoterRegistered { .. } => "VoterRegistered(address)",
            VotingEvent::ProposalRegistered { .. } => "ProposalRegistered(uint256)",
            VotingEvent::Voted { .. } => "Voted(address,uint256)",
            VotingEvent::WorkflowStatusChange { .. } => "WorkflowStatusChange(uint8,uint8)",
        }
    }

    /// 32-byte topic identifying the event kind.
    pub fn topic(&self) -> [u8; 32] {
        event_signature_to_topic(self.signature())
    }
}

/// Hash an event signature into a log topic.
pub fn event_signature_to_topic(signature: &str) -> [u8; 32] {
    let hash = blake3::hash(signature.as_bytes());
    let mut topic = [0u8; 32];
    topic.copy_from_slice(hash.as_bytes());
    topic
}
