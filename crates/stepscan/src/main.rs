//! Command line front end for stepscan.
//!
//! Loads a workspace, builds the step index and answers one question about
//! it per invocation. Results go to stdout; logs go to stderr.

mod cli;
mod output;

use clap::Parser;
use tracing::info;

use stepscan::config::RuntimeConfig;
use stepscan::discovery::Workspace;
use stepscan::error::{ConfigError, StepscanError};
use stepscan::logging::init_logging;

use crate::cli::{Cli, Outcome};

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            let fallback = RuntimeConfig::default();
            init_logging(&fallback);
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting stepscan");

    let workspace = match Workspace::load(&cli.root, cli.settings.as_deref()) {
        Ok(workspace) => workspace,
        Err(e @ StepscanError::Config(_)) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load workspace");
            std::process::exit(1);
        }
    };

    match cli::run(&cli.command, &workspace) {
        Ok(Outcome::Clean) => {}
        Ok(Outcome::Findings) => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "command failed");
            std::process::exit(1);
        }
    }
}

fn build_config(cli: &Cli) -> Result<RuntimeConfig, ConfigError> {
    let config = RuntimeConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level))
}
