use serde::{Deserialize, Serialize};

/// Registry record for a principal.
///
/// Absent principals read back as `Voter::default()` (all zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    /// Meaningful only once `has_voted` is set
    pub voted_proposal_id: u64,
}

impl Voter {
    /// A freshly registered voter that has not voted yet.
    pub fn registered() -> Self {
        Self {
            is_registered: true,
            ..Self::default()
        }
    }

    /// Whether this voter may still cast a ballot.
    pub fn can_vote(&self) -> bool {
        self.is_registered && !self.has_voted
    }

    /// Record the ballot. Callers check `can_vote` first.
    pub(crate) fn record_vote(&mut self, proposal_id: u64) {
        self.has_voted = true;
        self.voted_proposal_id = proposal_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unregistered() {
        let voter = Voter::default();
        assert!(!voter.is_registered);
        assert!(!voter.has_voted);
        assert_eq!(voter.voted_proposal_id, 0);
        assert!(!voter.can_vote());
    }

    #[test]
    fn test_record_vote() {
        let mut voter = Voter::registered();
        assert!(voter.can_vote());

        voter.record_vote(2);
        assert!(voter.has_voted);
        assert_eq!(voter.voted_proposal_id, 2);
        assert!(!voter.can_vote());
    }
}
