//! Thread-safe handle over a [`WorkflowEngine`].
//!
//! Every call holds one exclusive lock for its whole duration, so concurrent
//! callers observe the operations as if they ran one after another.

use std::sync::Arc;

use agora_types::Address;
use parking_lot::Mutex;

use crate::engine::WorkflowEngine;
use crate::error::VotingError;
use crate::events::VotingEvent;
use crate::proposal::Proposal;
use crate::status::WorkflowStatus;
use crate::voter::Voter;

/// Cloneable, lock-serialized workflow.
#[derive(Debug, Clone)]
pub struct SharedWorkflow {
    inner: Arc<Mutex<WorkflowEngine>>,
}

impl SharedWorkflow {
    /// Create a workflow; `creator` becomes the administrator.
    pub fn new(creator: Address) -> Self {
        Self::from_engine(WorkflowEngine::new(creator))
    }

    pub fn from_engine(engine: WorkflowEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn add_voter(&self, caller: Address, target: Address) -> Result<(), VotingError> {
        self.inner.lock().add_voter(caller, target)
    }

    pub fn get_voter(&self, caller: Address, target: Address) -> Result<Voter, VotingError> {
        self.inner.lock().get_voter(caller, target)
    }

    pub fn start_proposals_registering(&self, caller: Address) -> Result<(), VotingError> {
        self.inner.lock().start_proposals_registering(caller)
    }

    pub fn add_proposal(&self, caller: Address, description: &str) -> Result<u64, VotingError> {
        self.inner.lock().add_proposal(caller, description)
    }

    pub fn get_one_proposal(&self, caller: Address, proposal_id: u64) -> Result<Proposal, VotingError> {
        self.inner.lock().get_one_proposal(caller, proposal_id).cloned()
    }

    pub fn end_proposals_registering(&self, caller: Address) -> Result<(), VotingError> {
        self.inner.lock().end_proposals_registering(caller)
    }

    pub fn start_voting_session(&self, caller: Address) -> Result<(), VotingError> {
        self.inner.lock().start_voting_session(caller)
    }

    pub fn set_vote(&self, caller: Address, proposal_id: u64) -> Result<(), VotingError> {
        self.inner.lock().set_vote(caller, proposal_id)
    }

    pub fn end_voting_session(&self, caller: Address) -> Result<(), VotingError> {
        self.inner.lock().end_voting_session(caller)
    }

    pub fn tally_votes(&self, caller: Address) -> Result<(), VotingError> {
        self.inner.lock().tally_votes(caller)
    }

    pub fn winning_proposal_id(&self) -> u64 {
        self.inner.lock().winning_proposal_id()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.inner.lock().status()
    }

    /// Drain the notification log.
    pub fn take_events(&self) -> Vec<VotingEvent> {
        self.inner.lock().take_events()
    }

    /// Run a read-only closure against a consistent view of the engine.
    pub fn read<R>(&self, f: impl FnOnce(&WorkflowEngine) -> R) -> R {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn admin() -> Address {
        Address::from_bytes([0xadu8; 20])
    }

    #[test]
    fn test_clones_share_state() {
        let workflow = SharedWorkflow::new(admin());
        let other = workflow.clone();

        workflow.add_voter(admin(), Address::from_bytes([1u8; 20])).unwrap();
        assert_eq!(other.read(|e| e.voter_count()), 1);
    }

    #[test]
    fn test_concurrent_votes_are_all_counted() {
        let voters: Vec<Address> = (0..64u8).map(|i| Address::derive(&[i])).collect();
        let workflow = SharedWorkflow::new(admin());
        for voter in &voters {
            workflow.add_voter(admin(), *voter).unwrap();
        }
        workflow.start_proposals_registering(admin()).unwrap();
        workflow.add_proposal(voters[0], "Only option").unwrap();
        workflow.end_proposals_registering(admin()).unwrap();
        workflow.start_voting_session(admin()).unwrap();

        // Every voter fires twice; only the first ballot per voter may land.
        let handles: Vec<_> = voters
            .iter()
            .flat_map(|voter| [*voter, *voter])
            .map(|voter| {
                let workflow = workflow.clone();
                thread::spawn(move || workflow.set_vote(voter, 1))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(VotingError::AlreadyVoted(_))))
            .count();

        assert_eq!(accepted, voters.len());
        assert_eq!(rejected, voters.len());
        assert_eq!(
            workflow.get_one_proposal(voters[0], 1).unwrap().vote_count,
            voters.len() as u64
        );
    }
}
