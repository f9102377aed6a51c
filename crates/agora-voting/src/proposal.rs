//! Proposals submitted during the registration phase.
//!
//! Index 0 of the proposal list always holds the GENESIS placeholder, so real
//! proposals are numbered from 1.

use serde::{Deserialize, Serialize};

/// A submitted proposal and its running vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Proposal text
    pub description: String,
    /// Accepted votes
    pub vote_count: u64,
}

impl Proposal {
    /// Description of the placeholder stored at index 0.
    pub const GENESIS_DESCRIPTION: &'static str = "GENESIS";

    /// Create a proposal with no votes.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
        }
    }

    /// The index-0 placeholder. Never votable.
    pub fn genesis() -> Self {
        Self::new(Self::GENESIS_DESCRIPTION)
    }

    pub(crate) fn add_vote(&mut self) {
        self.vote_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis() {
        let genesis = Proposal::genesis();
        assert_eq!(genesis.description, "GENESIS");
        assert_eq!(genesis.vote_count, 0);
    }

    #[test]
    fn test_add_vote() {
        let mut proposal = Proposal::new("Plant trees");
        proposal.add_vote();
        proposal.add_vote();
        assert_eq!(proposal.vote_count, 2);
    }
}
