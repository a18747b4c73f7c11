//! CLI command implementations.
//!
//! Every command runs the same steps: validate the key, build the request
//! from flag payloads, dispatch it under [`DEFAULT_TIMEOUT`], and hand the
//! wrapped response to the renderer resolved for this invocation.

use crate::cli::output::{Renderable, renderers};
use crate::cli::parser::{
    Cli, Commands, CompleteCommands, FailCommands, ResolveCommands, SetCommands,
};
use crate::error::{CommandError, Result};
use crate::gateway::{
    CompleteJobRequest, CompleteJobResponse, DEFAULT_TIMEOUT, FailJobRequest, FailJobResponse,
    JobGateway, ResolveIncidentRequest, ResolveIncidentResponse, SetVariablesRequest,
    SetVariablesResponse, dispatch,
};
use serde_json::Value;
use std::io::Write;
use std::time::Duration;

/// Executes the CLI command and renders its result to `out`.
///
/// The renderer is resolved before anything else, so an unknown output
/// mode never costs a remote call.
///
/// # Errors
///
/// Returns an error if the output mode is unknown, an argument or payload
/// is invalid, the gateway call fails or times out, or rendering fails.
/// Render failures happen after the remote call has taken effect.
pub async fn execute(cli: &Cli, gateway: &dyn JobGateway, out: &mut dyn Write) -> Result<()> {
    let renderer = renderers()?.resolve(&cli.output)?;

    let result: Box<dyn Renderable> = match &cli.command {
        Commands::Complete(CompleteCommands::Job { key, variables }) => {
            let invocation = CommandInvocation::start(
                key,
                CompleteJobFlags {
                    variables: variables.clone(),
                },
            )?;
            Box::new(cmd_complete_job(gateway, invocation).await?)
        }
        Commands::Fail(FailCommands::Job {
            key,
            retries,
            error_message,
            retry_backoff,
            variables,
        }) => {
            let invocation = CommandInvocation::start(
                key,
                FailJobFlags {
                    retries: *retries,
                    error_message: error_message.clone(),
                    retry_backoff_ms: *retry_backoff,
                    variables: variables.clone(),
                },
            )?;
            Box::new(cmd_fail_job(gateway, invocation).await?)
        }
        Commands::Set(SetCommands::Variables {
            key,
            variables,
            local,
        }) => {
            let invocation = CommandInvocation::start(
                key,
                SetVariablesFlags {
                    variables: variables.clone(),
                    local: *local,
                },
            )?;
            Box::new(cmd_set_variables(gateway, invocation).await?)
        }
        Commands::Resolve(ResolveCommands::Incident { key }) => {
            let invocation = CommandInvocation::start(key, ())?;
            Box::new(cmd_resolve_incident(gateway, invocation).await?)
        }
    };

    renderer.render(result.as_ref(), out)?;
    Ok(())
}

/// State captured for one command run.
///
/// `F` holds the command's flag values as given on the command line;
/// payloads inside it are only validated when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation<F> {
    /// Validated resource key.
    pub key: i64,
    /// Raw flag values.
    pub flags: F,
    /// Deadline for the remote call.
    pub deadline: Duration,
}

impl<F> CommandInvocation<F> {
    /// Validates the positional key and starts an invocation.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidArgument`] if `raw_key` is not an `i64`.
    pub fn start(raw_key: &str, flags: F) -> std::result::Result<Self, CommandError> {
        Ok(Self {
            key: parse_key(raw_key)?,
            flags,
            deadline: DEFAULT_TIMEOUT,
        })
    }
}

/// Flags of `complete job`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteJobFlags {
    /// Variables payload, a JSON object string.
    pub variables: String,
}

/// Flags of `fail job`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailJobFlags {
    /// Remaining retries.
    pub retries: u32,
    /// Failure message.
    pub error_message: String,
    /// Retry backoff in milliseconds.
    pub retry_backoff_ms: u64,
    /// Variables payload, a JSON object string.
    pub variables: String,
}

/// Flags of `set variables`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVariablesFlags {
    /// Variables payload, a JSON object string.
    pub variables: String,
    /// Restrict the update to the local scope.
    pub local: bool,
}

/// Parses a resource key.
///
/// # Errors
///
/// Returns [`CommandError::InvalidArgument`] naming the rejected value.
pub fn parse_key(raw: &str) -> std::result::Result<i64, CommandError> {
    raw.parse::<i64>()
        .map_err(|e| CommandError::InvalidArgument {
            name: "key".to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

// ==================== Command Implementations ====================

async fn cmd_complete_job(
    gateway: &dyn JobGateway,
    invocation: CommandInvocation<CompleteJobFlags>,
) -> Result<CompleteJobResult> {
    let request =
        CompleteJobRequest::new(invocation.key).variables_from_str(&invocation.flags.variables)?;
    let response = dispatch(
        "complete job",
        invocation.deadline,
        gateway.complete_job(request),
    )
    .await?;

    Ok(CompleteJobResult {
        key: invocation.key,
        variables: invocation.flags.variables,
        response,
    })
}

async fn cmd_fail_job(
    gateway: &dyn JobGateway,
    invocation: CommandInvocation<FailJobFlags>,
) -> Result<FailJobResult> {
    let flags = &invocation.flags;
    let request = FailJobRequest::new(invocation.key, flags.retries)
        .error_message(flags.error_message.as_str())
        .retry_backoff_ms(flags.retry_backoff_ms)
        .variables_from_str(&flags.variables)?;
    let response = dispatch("fail job", invocation.deadline, gateway.fail_job(request)).await?;

    Ok(FailJobResult {
        key: invocation.key,
        retries: invocation.flags.retries,
        response,
    })
}

async fn cmd_set_variables(
    gateway: &dyn JobGateway,
    invocation: CommandInvocation<SetVariablesFlags>,
) -> Result<SetVariablesResult> {
    let request = SetVariablesRequest::new(invocation.key)
        .local(invocation.flags.local)
        .variables_from_str(&invocation.flags.variables)?;
    let response = dispatch(
        "set variables",
        invocation.deadline,
        gateway.set_variables(request),
    )
    .await?;

    Ok(SetVariablesResult {
        key: invocation.key,
        variables: invocation.flags.variables,
        response,
    })
}

async fn cmd_resolve_incident(
    gateway: &dyn JobGateway,
    invocation: CommandInvocation<()>,
) -> Result<ResolveIncidentResult> {
    let request = ResolveIncidentRequest::new(invocation.key);
    let response = dispatch(
        "resolve incident",
        invocation.deadline,
        gateway.resolve_incident(request),
    )
    .await?;

    Ok(ResolveIncidentResult {
        key: invocation.key,
        response,
    })
}

// ==================== Results ====================

/// Result of `complete job`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteJobResult {
    /// Completed job key.
    pub key: i64,
    /// Variables as given on the command line.
    pub variables: String,
    /// Gateway response.
    pub response: CompleteJobResponse,
}

impl Renderable for CompleteJobResult {
    fn structured(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.response)
    }

    fn summary(&self) -> String {
        format!(
            "Completed job with key {} and variables {}",
            self.key, self.variables
        )
    }
}

/// Result of `fail job`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailJobResult {
    /// Failed job key.
    pub key: i64,
    /// Retries left on the job.
    pub retries: u32,
    /// Gateway response.
    pub response: FailJobResponse,
}

impl Renderable for FailJobResult {
    fn structured(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.response)
    }

    fn summary(&self) -> String {
        format!(
            "Failed job with key {} and set remaining retries to {}",
            self.key, self.retries
        )
    }
}

/// Result of `set variables`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVariablesResult {
    /// Element instance key.
    pub key: i64,
    /// Variables as given on the command line.
    pub variables: String,
    /// Gateway response.
    pub response: SetVariablesResponse,
}

impl Renderable for SetVariablesResult {
    fn structured(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.response)
    }

    fn summary(&self) -> String {
        format!(
            "Set the variables of element instance {} to {}",
            self.key, self.variables
        )
    }
}

/// Result of `resolve incident`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveIncidentResult {
    /// Resolved incident key.
    pub key: i64,
    /// Gateway response.
    pub response: ResolveIncidentResponse,
}

impl Renderable for ResolveIncidentResult {
    fn structured(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.response)
    }

    fn summary(&self) -> String {
        format!("Resolved an incident with key {}", self.key)
    }
}
