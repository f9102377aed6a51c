//! Session scripts.
//!
//! A session script lists everything a complete voting round needs: the
//! administrator, the voters, who proposes what and who votes for which
//! index. `run_session` replays it against a fresh engine in workflow order
//! and stops at the first rejected operation.

use agora_types::Address;
use agora_voting::{VotingEvent, WorkflowEngine, WorkflowStatus};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A scripted voting round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    /// Principal that creates the workflow
    pub administrator: String,
    /// Principals to register, in order
    #[serde(default)]
    pub voters: Vec<String>,
    /// Proposals, in submission order (first is index 1)
    #[serde(default)]
    pub proposals: Vec<ProposalEntry>,
    /// Ballots, in casting order
    #[serde(default)]
    pub votes: Vec<VoteEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalEntry {
    pub author: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub voter: String,
    pub proposal: u64,
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub administrator: Address,
    pub status: WorkflowStatus,
    pub winning_proposal_id: u64,
    /// Real proposals, index 1 first
    pub proposals: Vec<ProposalSummary>,
    pub events: Vec<LoggedEvent>,
}

/// An emitted event together with its topic, as an indexer would see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEvent {
    /// 0x-hex topic of the event kind
    pub topic: String,
    #[serde(flatten)]
    pub event: VotingEvent,
}

impl From<VotingEvent> for LoggedEvent {
    fn from(event: VotingEvent) -> Self {
        Self {
            topic: format!("0x{}", hex::encode(event.topic())),
            event,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalSummary {
    pub id: u64,
    pub description: String,
    pub vote_count: u64,
}

impl SessionReport {
    /// The winning proposal, if any proposal was submitted.
    pub fn winner(&self) -> Option<&ProposalSummary> {
        self.proposals.iter().find(|p| p.id == self.winning_proposal_id)
    }
}

impl SessionScript {
    /// Three voters, three proposals; proposal 3 wins two votes to one.
    pub fn sample() -> Self {
        let entry = |author: &str, description: &str| ProposalEntry {
            author: author.to_string(),
            description: description.to_string(),
        };
        let ballot = |voter: &str, proposal| VoteEntry {
            voter: voter.to_string(),
            proposal,
        };

        Self {
            administrator: "owner".to_string(),
            voters: vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            proposals: vec![
                entry("alice", "First proposal"),
                entry("bob", "Second proposal"),
                entry("carol", "Third proposal"),
            ],
            votes: vec![ballot("alice", 3), ballot("bob", 3), ballot("carol", 2)],
        }
    }

    /// Load a script from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file '{}'", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session file '{}'", path.display()))
    }

    /// Write the script as TOML, headed by a note on principal syntax.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let contents = format!("{}{}", SCRIPT_HEADER, toml::to_string_pretty(self)?);
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session file '{}'", path.display()))?;
        Ok(())
    }
}

const SCRIPT_HEADER: &str = "\
# Principals are labels (hashed into an address) or agora1.../0x... addresses.
# Write `label:0xford` for a label that starts with agora1 or 0x.

";

/// Prefix that forces label derivation, e.g. `label:0xford`.
pub const LABEL_PREFIX: &str = "label:";

/// Turn a script principal into an address.
///
/// `agora1…` and `0x…` strings are parsed as addresses and must be valid.
/// Anything else is a label and is derived deterministically; a label that
/// would otherwise look like an address needs the `label:` prefix.
pub fn resolve_principal(principal: &str) -> anyhow::Result<Address> {
    if let Some(label) = principal.strip_prefix(LABEL_PREFIX) {
        Ok(Address::derive(label.as_bytes()))
    } else if principal.starts_with("agora1") || principal.starts_with("0x") || principal.starts_with("0X") {
        principal
            .parse()
            .with_context(|| format!("Invalid address '{}'", principal))
    } else {
        Ok(Address::derive(principal.as_bytes()))
    }
}

/// Replay `script` against a fresh engine.
pub fn run_session(script: &SessionScript) -> anyhow::Result<SessionReport> {
    let admin = resolve_principal(&script.administrator)?;
    let mut engine = WorkflowEngine::new(admin);

    let voters = script
        .voters
        .iter()
        .map(|v| resolve_principal(v).map(|addr| (v.as_str(), addr)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    for (label, voter) in &voters {
        engine
            .add_voter(admin, *voter)
            .with_context(|| format!("Registering voter '{}'", label))?;
    }

    engine
        .start_proposals_registering(admin)
        .context("Opening proposal registration")?;
    for entry in &script.proposals {
        let author = resolve_principal(&entry.author)?;
        engine
            .add_proposal(author, &entry.description)
            .with_context(|| format!("Adding proposal '{}' by '{}'", entry.description, entry.author))?;
    }
    engine
        .end_proposals_registering(admin)
        .context("Closing proposal registration")?;

    engine.start_voting_session(admin).context("Opening voting session")?;
    for ballot in &script.votes {
        let voter = resolve_principal(&ballot.voter)?;
        engine
            .set_vote(voter, ballot.proposal)
            .with_context(|| format!("Vote by '{}' for proposal {}", ballot.voter, ballot.proposal))?;
    }
    engine.end_voting_session(admin).context("Closing voting session")?;

    engine.tally_votes(admin).context("Tallying votes")?;
    tracing::info!(winning_proposal_id = engine.winning_proposal_id(), "Session complete");

    // Proposals are readable by registered voters only.
    let proposals = match voters.first() {
        Some((_, reader)) => (1..engine.proposal_count() as u64)
            .map(|id| {
                engine.get_one_proposal(*reader, id).map(|p| ProposalSummary {
                    id,
                    description: p.description.clone(),
                    vote_count: p.vote_count,
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(SessionReport {
        administrator: engine.administrator(),
        status: engine.status(),
        winning_proposal_id: engine.winning_proposal_id(),
        proposals,
        events: engine.take_events().into_iter().map(LoggedEvent::from).collect(),
    })
}
