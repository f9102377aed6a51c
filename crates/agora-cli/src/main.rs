//! Agora CLI - Host for the Agora voting workflow.
//!
//! Loads session scripts, drives the workflow engine through every phase and
//! reports notifications and the winning proposal.

pub mod commands;
pub mod config;
pub mod output;
pub mod session;
pub mod telemetry;

use clap::Parser;

fn main() {
    let cli = commands::Cli::parse();

    if let Err(e) = commands::execute(cli) {
        output::print_error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}
