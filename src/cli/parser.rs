//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros. Keys, payloads and
//! the output mode are captured as raw strings and validated by the
//! command layer.

use crate::cli::output::HUMAN_OUTPUT;
use crate::gateway::{DEFAULT_ADDRESS, GatewayConfig};
use clap::{Parser, Subcommand};

/// zbctl-rs: command-line client for a workflow engine gateway.
#[derive(Parser, Debug)]
#[command(name = "zbctl-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Gateway base URL.
    #[arg(long, env = "ZEEBE_ADDRESS", default_value = DEFAULT_ADDRESS, global = true)]
    pub address: String,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format. Possible values: human, json.
    #[arg(short, long, default_value = HUMAN_OUTPUT, global = true)]
    pub output: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mark an activated job as completed.
    #[command(subcommand)]
    Complete(CompleteCommands),

    /// Mark an activated job as failed.
    #[command(subcommand)]
    Fail(FailCommands),

    /// Update the variables of a process element instance.
    #[command(subcommand)]
    Set(SetCommands),

    /// Resolve an incident so the affected element can continue.
    #[command(subcommand)]
    Resolve(ResolveCommands),
}

/// Resources that can be completed.
#[derive(Subcommand, Debug)]
pub enum CompleteCommands {
    /// Complete a job.
    Job {
        /// Job key.
        #[arg(allow_hyphen_values = true)]
        key: String,

        /// Variables as a JSON object string.
        #[arg(long, default_value = "{}")]
        variables: String,
    },
}

/// Resources that can be failed.
#[derive(Subcommand, Debug)]
pub enum FailCommands {
    /// Fail a job.
    Job {
        /// Job key.
        #[arg(allow_hyphen_values = true)]
        key: String,

        /// Remaining retries of the job.
        #[arg(long)]
        retries: u32,

        /// Message describing why the job failed.
        #[arg(long, default_value = "")]
        error_message: String,

        /// Backoff in milliseconds before the job can be retried.
        #[arg(long, default_value = "0")]
        retry_backoff: u64,

        /// Variables as a JSON object string.
        #[arg(long, default_value = "{}")]
        variables: String,
    },
}

/// Resources that can be set.
#[derive(Subcommand, Debug)]
pub enum SetCommands {
    /// Set variables of an element instance.
    Variables {
        /// Element instance key.
        #[arg(allow_hyphen_values = true)]
        key: String,

        /// Variables as a JSON object string.
        #[arg(long, default_value = "{}")]
        variables: String,

        /// Only set variables in the local scope.
        #[arg(long)]
        local: bool,
    },
}

/// Resources that can be resolved.
#[derive(Subcommand, Debug)]
pub enum ResolveCommands {
    /// Resolve an incident.
    Incident {
        /// Incident key.
        #[arg(allow_hyphen_values = true)]
        key: String,
    },
}

impl Cli {
    /// Returns the gateway connection settings.
    #[must_use]
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            address: self.address.clone(),
        }
    }
}
