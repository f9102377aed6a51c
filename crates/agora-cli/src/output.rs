//! Output formatting utilities.
//!
//! Pretty printing for CLI commands.

use agora_types::Address;
use agora_voting::VotingEvent;
use colored::Colorize;

use crate::session::SessionReport;

/// Format address (short version).
pub fn format_address_short(addr: &Address) -> String {
    let s = addr.to_string();
    if s.len() > 16 {
        format!("{}...{}", &s[..12], &s[s.len() - 6..])
    } else {
        s
    }
}

/// First four topic bytes, enough to tell event kinds apart.
pub fn format_topic_short(topic: &str) -> &str {
    topic.get(..10).unwrap_or(topic)
}

/// One-line description of an event.
pub fn format_event(event: &VotingEvent) -> String {
    match event {
        VotingEvent::VoterRegistered { voter } => {
            format!("VoterRegistered      {}", format_address_short(voter))
        }
        VotingEvent::ProposalRegistered { proposal_id } => {
            format!("ProposalRegistered   #{}", proposal_id)
        }
        VotingEvent::Voted { voter, proposal_id } => {
            format!("Voted                {} -> #{}", format_address_short(voter), proposal_id)
        }
        VotingEvent::WorkflowStatusChange { previous, next } => {
            format!("WorkflowStatusChange {} -> {}", previous, next)
        }
    }
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

/// Print a finished session.
pub fn print_report(report: &SessionReport) {
    print_info(&format!("Administrator: {}", report.administrator));

    println!();
    println!("{}", "Events".bold());
    for logged in &report.events {
        println!(
            "  {:<64} {}",
            format_event(&logged.event),
            format_topic_short(&logged.topic).dimmed()
        );
    }

    println!();
    println!("{}", "Proposals".bold());
    for proposal in &report.proposals {
        let line = format!(
            "  #{:<3} {:<40} {} vote(s)",
            proposal.id, proposal.description, proposal.vote_count
        );
        if proposal.id == report.winning_proposal_id {
            println!("{}", line.bright_green());
        } else {
            println!("{}", line);
        }
    }

    println!();
    match report.winner() {
        Some(winner) => print_success(&format!(
            "Winning proposal #{}: \"{}\" with {} vote(s)",
            winner.id, winner.description, winner.vote_count
        )),
        None => print_info("No proposal was submitted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LoggedEvent;
    use agora_voting::WorkflowStatus;

    #[test]
    fn test_format_address_short() {
        let addr = Address::derive(b"alice");
        let short = format_address_short(&addr);
        assert!(short.starts_with("agora1"));
        assert!(short.contains("..."));
        assert!(short.len() < addr.to_string().len());
    }

    #[test]
    fn test_format_event() {
        let line = format_event(&VotingEvent::WorkflowStatusChange {
            previous: WorkflowStatus::VotingSessionEnded,
            next: WorkflowStatus::VotesTallied,
        });
        assert!(line.starts_with("WorkflowStatusChange"));
        assert!(line.contains("voting session ended -> votes tallied"));

        let line = format_event(&VotingEvent::ProposalRegistered { proposal_id: 2 });
        assert!(line.ends_with("#2"));
    }

    #[test]
    fn test_format_topic_short() {
        let logged = LoggedEvent::from(VotingEvent::ProposalRegistered { proposal_id: 2 });
        let short = format_topic_short(&logged.topic);
        assert_eq!(short.len(), 10);
        assert!(logged.topic.starts_with(short));
        assert_eq!(format_topic_short("0x12"), "0x12");
    }
}
