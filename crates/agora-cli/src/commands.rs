//! CLI command implementations.

use agora_types::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::output::*;
use crate::session::{resolve_principal, run_session, SessionScript};
use crate::telemetry;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(about = "Agora - run administrator-driven voting sessions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter (overrides the config file)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a session script end-to-end and print the result
    Run {
        /// Session script (TOML)
        session: PathBuf,
    },
    /// Write a sample session script
    Init {
        /// Destination path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the address a label or address string resolves to
    Address {
        /// Label (e.g. "alice") or address
        principal: String,
    },
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json {
            config.output.json = true;
        }
        if self.no_color {
            config.output.color = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parse configuration, start logging and run the command.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    telemetry::init_telemetry(&config.logging.level, config.logging.json)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Run { session } => execute_run(&session, &config),
        Commands::Init { path, force } => execute_init(&path, force),
        Commands::Address { principal } => execute_address(&principal, &config),
    }
}

fn execute_run(session: &std::path::Path, config: &CliConfig) -> anyhow::Result<()> {
    let script = SessionScript::from_file(session)?;
    tracing::info!(
        voters = script.voters.len(),
        proposals = script.proposals.len(),
        votes = script.votes.len(),
        "Running session {}",
        session.display()
    );

    let report = run_session(&script)?;
    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn execute_init(path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("'{}' already exists (use --force to overwrite)", path.display());
    }
    SessionScript::sample().to_file(path)?;
    print_success(&format!("Sample session written to {}", path.display()));
    Ok(())
}

fn execute_address(principal: &str, config: &CliConfig) -> anyhow::Result<()> {
    let address: Address = resolve_principal(principal)?;
    if config.output.json {
        let value = serde_json::json!({
            "principal": principal,
            "bech32m": address.to_string(),
            "hex": format!("{:x}", address),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", address);
        println!("{:x}", address);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["agora", "run", "session.toml", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Run { ref session } if session == &PathBuf::from("session.toml")));
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[logging]\nlevel = \"info\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "agora",
            "--config",
            config_path.to_str().unwrap(),
            "--log-level",
            "debug",
            "--no-color",
            "address",
            "alice",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.output.color);
        assert!(!config.output.json);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");

        execute_init(&path, false).unwrap();
        assert!(execute_init(&path, false).is_err());
        execute_init(&path, true).unwrap();

        let report = run_session(&SessionScript::from_file(&path).unwrap()).unwrap();
        assert_eq!(report.winning_proposal_id, 3);
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["agora"]).is_err());
    }
}
