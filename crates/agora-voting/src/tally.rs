//! Plurality tally.
//!
//! Scans proposals `1..N` in ascending order and keeps the first index that
//! reaches the highest vote count. A later proposal with an equal count never
//! displaces an earlier one.

use crate::proposal::Proposal;

/// Index of the winning proposal in `proposals` (index 0 is the placeholder).
///
/// Returns 0 when there is no real proposal to choose from. O(N).
pub fn plurality_winner(proposals: &[Proposal]) -> u64 {
    let mut winner: Option<(u64, u64)> = None;

    for (index, proposal) in proposals.iter().enumerate().skip(1) {
        match winner {
            Some((_, best)) if proposal.vote_count <= best => {}
            _ => winner = Some((index as u64, proposal.vote_count)),
        }
    }

    winner.map(|(index, _)| index).unwrap_or(0)
}
