//! Agora Voting - Administrator-driven voting workflow.
//!
//! This crate provides:
//! - The six-phase workflow state machine
//! - Voter registry and proposal list with their access rules
//! - Plurality tally (ties go to the lowest proposal index)
//! - Notifications emitted on every state change
//! - A lock-serialized handle for concurrent hosts

pub mod engine;
pub mod error;
pub mod events;
pub mod proposal;
pub mod shared;
pub mod status;
pub mod tally;
pub mod voter;

pub use engine::WorkflowEngine;
pub use error::{Role, VotingError};
pub use events::VotingEvent;
pub use proposal::Proposal;
pub use shared::SharedWorkflow;
pub use status::WorkflowStatus;
pub use tally::plurality_winner;
pub use voter::Voter;
