//! Core workflow engine: voter registry, proposals and the phase machine.
//!
//! Each operation validates everything it needs before mutating, so an `Err`
//! return leaves state and the event log untouched.

use std::collections::HashMap;

use agora_types::Address;

use crate::error::{Role, VotingError};
use crate::events::VotingEvent;
use crate::proposal::Proposal;
use crate::status::WorkflowStatus;
use crate::tally::plurality_winner;
use crate::voter::Voter;

/// Voting workflow owned by a single administrator.
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    /// Fixed at construction
    administrator: Address,
    /// Current phase
    status: WorkflowStatus,
    /// Voter registry (write-once membership)
    voters: HashMap<Address, Voter>,
    /// Index 0 is GENESIS once proposal registration opens
    proposals: Vec<Proposal>,
    /// 0 until tallied
    winning_proposal_id: u64,
    /// Emitted notifications, oldest first
    events: Vec<VotingEvent>,
}

impl WorkflowEngine {
    /// Create an engine; `creator` becomes the administrator.
    pub fn new(creator: Address) -> Self {
        tracing::info!("Voting workflow created by {}", creator);
        Self {
            administrator: creator,
            status: WorkflowStatus::RegisteringVoters,
            voters: HashMap::new(),
            proposals: Vec::new(),
            winning_proposal_id: 0,
            events: Vec::new(),
        }
    }

    // --- Voters ---

    /// Register `target` as a voter.
    pub fn add_voter(&mut self, caller: Address, target: Address) -> Result<(), VotingError> {
        self.ensure_administrator(caller)?;
        self.ensure_status(WorkflowStatus::RegisteringVoters)?;
        if self.voters.get(&target).is_some_and(|v| v.is_registered) {
            return Err(VotingError::AlreadyRegistered(target));
        }

        self.voters.insert(target, Voter::registered());
        tracing::info!(voter = %target, "Voter registered");
        self.emit(VotingEvent::VoterRegistered { voter: target });
        Ok(())
    }

    /// Look up a voter record. Unknown principals read back as a zero record.
    pub fn get_voter(&self, caller: Address, target: Address) -> Result<Voter, VotingError> {
        self.ensure_voter(caller)?;
        Ok(self.voters.get(&target).copied().unwrap_or_default())
    }

    // --- Proposals ---

    /// Open proposal registration. Seeds the GENESIS placeholder at index 0.
    pub fn start_proposals_registering(&mut self, caller: Address) -> Result<(), VotingError> {
        self.advance(caller, WorkflowStatus::RegisteringVoters, |engine| {
            engine.proposals.push(Proposal::genesis());
        })
    }

    /// Submit a proposal. Returns its index.
    pub fn add_proposal(&mut self, caller: Address, description: &str) -> Result<u64, VotingError> {
        self.ensure_voter(caller)?;
        self.ensure_status(WorkflowStatus::ProposalsRegistrationStarted)?;
        if description.is_empty() {
            return Err(VotingError::EmptyProposal);
        }

        let proposal_id = self.proposals.len() as u64;
        self.proposals.push(Proposal::new(description));
        tracing::info!(proposer = %caller, proposal_id, "Proposal registered");
        self.emit(VotingEvent::ProposalRegistered { proposal_id });
        Ok(proposal_id)
    }

    /// Read the proposal at `proposal_id` (0 is the placeholder).
    pub fn get_one_proposal(&self, caller: Address, proposal_id: u64) -> Result<&Proposal, VotingError> {
        self.ensure_voter(caller)?;
        self.proposal(proposal_id)
            .ok_or(VotingError::ProposalNotFound(proposal_id))
    }

    /// Close proposal registration.
    pub fn end_proposals_registering(&mut self, caller: Address) -> Result<(), VotingError> {
        self.advance(caller, WorkflowStatus::ProposalsRegistrationStarted, |_| {})
    }

    // --- Voting ---

    /// Open the voting session.
    pub fn start_voting_session(&mut self, caller: Address) -> Result<(), VotingError> {
        self.advance(caller, WorkflowStatus::ProposalsRegistrationEnded, |_| {})
    }

    /// Cast the caller's single ballot for `proposal_id`.
    pub fn set_vote(&mut self, caller: Address, proposal_id: u64) -> Result<(), VotingError> {
        self.ensure_voter(caller)?;
        self.ensure_status(WorkflowStatus::VotingSessionStarted)?;
        if self.voters.get(&caller).is_some_and(|v| !v.can_vote()) {
            return Err(VotingError::AlreadyVoted(caller));
        }
        let index = usize::try_from(proposal_id)
            .ok()
            .filter(|&i| i > 0 && i < self.proposals.len())
            .ok_or(VotingError::ProposalNotFound(proposal_id))?;

        // All checks passed; from here on nothing can fail.
        if let Some(voter) = self.voters.get_mut(&caller) {
            voter.record_vote(proposal_id);
        }
        self.proposals[index].add_vote();

        tracing::debug!(voter = %caller, proposal_id, "Vote recorded");
        self.emit(VotingEvent::Voted { voter: caller, proposal_id });
        Ok(())
    }

    /// Close the voting session.
    pub fn end_voting_session(&mut self, caller: Address) -> Result<(), VotingError> {
        self.advance(caller, WorkflowStatus::VotingSessionStarted, |_| {})
    }

    /// Compute the plurality winner and finish the workflow.
    pub fn tally_votes(&mut self, caller: Address) -> Result<(), VotingError> {
        self.advance(caller, WorkflowStatus::VotingSessionEnded, |engine| {
            engine.winning_proposal_id = plurality_winner(&engine.proposals);
            tracing::info!(
                winning_proposal_id = engine.winning_proposal_id,
                proposals = engine.proposals.len().saturating_sub(1),
                "Votes tallied"
            );
        })
    }

    /// Winning proposal index. 0 until the votes are tallied.
    pub fn winning_proposal_id(&self) -> u64 {
        self.winning_proposal_id
    }

    // --- Accessors ---

    pub fn administrator(&self) -> Address {
        self.administrator
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Number of entries in the proposal list, placeholder included.
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Notifications emitted so far, oldest first.
    pub fn events(&self) -> &[VotingEvent] {
        &self.events
    }

    /// Drain the notification log.
    pub fn take_events(&mut self) -> Vec<VotingEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Internals ---

    fn proposal(&self, proposal_id: u64) -> Option<&Proposal> {
        usize::try_from(proposal_id)
            .ok()
            .and_then(|i| self.proposals.get(i))
    }

    /// Move from `from` to its successor, running `on_enter` before the
    /// status flips.
    fn advance(
        &mut self,
        caller: Address,
        from: WorkflowStatus,
        on_enter: impl FnOnce(&mut Self),
    ) -> Result<(), VotingError> {
        self.ensure_administrator(caller)?;
        self.ensure_status(from)?;
        let next = match from.next() {
            Some(next) => next,
            None => {
                return Err(VotingError::InvalidPhase {
                    expected: from,
                    current: self.status,
                })
            }
        };

        on_enter(self);
        self.status = next;
        tracing::info!("Workflow status changed: {} -> {}", from, next);
        self.emit(VotingEvent::WorkflowStatusChange { previous: from, next });
        Ok(())
    }

    fn ensure_administrator(&self, caller: Address) -> Result<(), VotingError> {
        if caller != self.administrator {
            tracing::debug!(%caller, "Rejected: caller is not the administrator");
            return Err(VotingError::Unauthorized {
                caller,
                role: Role::Administrator,
            });
        }
        Ok(())
    }

    fn ensure_voter(&self, caller: Address) -> Result<(), VotingError> {
        if !self.voters.get(&caller).is_some_and(|v| v.is_registered) {
            tracing::debug!(%caller, "Rejected: caller is not a registered voter");
            return Err(VotingError::Unauthorized {
                caller,
                role: Role::Voter,
            });
        }
        Ok(())
    }

    fn ensure_status(&self, expected: WorkflowStatus) -> Result<(), VotingError> {
        if self.status != expected {
            tracing::debug!(current = %self.status, %expected, "Rejected: wrong phase");
            return Err(VotingError::InvalidPhase {
                expected,
                current: self.status,
            });
        }
        Ok(())
    }

    fn emit(&mut self, event: VotingEvent) {
        self.events.push(event);
    }
}
