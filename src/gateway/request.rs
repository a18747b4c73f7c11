//! Request builders for gateway commands.
//!
//! Builders take already-validated keys and raw flag payloads. Payloads are
//! checked here, at request construction time, so a malformed `--variables`
//! value is reported as a request error rather than a flag error.

use crate::error::CommandError;
use serde_json::{Map, Value};

/// Variables document attached to a request.
pub type Variables = Map<String, Value>;

/// Request to complete an activated job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteJobRequest {
    /// Key of the job to complete.
    pub job_key: i64,
    /// Variables to merge into the process instance.
    pub variables: Variables,
}

impl CompleteJobRequest {
    /// Creates a request with no variables.
    #[must_use]
    pub fn new(job_key: i64) -> Self {
        Self {
            job_key,
            variables: Variables::new(),
        }
    }

    /// Sets the variables from a JSON object string.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::RequestConstruction`] if `raw` is not a JSON object.
    pub fn variables_from_str(mut self, raw: &str) -> Result<Self, CommandError> {
        self.variables = parse_variables(raw)?;
        Ok(self)
    }
}

/// Request to mark a job as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailJobRequest {
    /// Key of the job to fail.
    pub job_key: i64,
    /// Remaining retries; zero raises an incident.
    pub retries: u32,
    /// Message describing the failure.
    pub error_message: String,
    /// Backoff in milliseconds before the job is retried.
    pub retry_backoff_ms: u64,
    /// Variables to merge at the job's local scope.
    pub variables: Variables,
}

impl FailJobRequest {
    /// Creates a request with the given remaining retries.
    #[must_use]
    pub fn new(job_key: i64, retries: u32) -> Self {
        Self {
            job_key,
            retries,
            error_message: String::new(),
            retry_backoff_ms: 0,
            variables: Variables::new(),
        }
    }

    /// Sets the failure message.
    #[must_use]
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Sets the retry backoff.
    #[must_use]
    pub const fn retry_backoff_ms(mut self, backoff: u64) -> Self {
        self.retry_backoff_ms = backoff;
        self
    }

    /// Sets the variables from a JSON object string.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::RequestConstruction`] if `raw` is not a JSON object.
    pub fn variables_from_str(mut self, raw: &str) -> Result<Self, CommandError> {
        self.variables = parse_variables(raw)?;
        Ok(self)
    }
}

/// Request to update variables of an element instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVariablesRequest {
    /// Key of the element instance (or process instance).
    pub element_instance_key: i64,
    /// Variables to set.
    pub variables: Variables,
    /// Whether to set the variables only in the local scope.
    pub local: bool,
}

impl SetVariablesRequest {
    /// Creates a request with no variables that propagates to parent scopes.
    #[must_use]
    pub fn new(element_instance_key: i64) -> Self {
        Self {
            element_instance_key,
            variables: Variables::new(),
            local: false,
        }
    }

    /// Restricts the update to the local scope.
    #[must_use]
    pub const fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    /// Sets the variables from a JSON object string.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::RequestConstruction`] if `raw` is not a JSON object.
    pub fn variables_from_str(mut self, raw: &str) -> Result<Self, CommandError> {
        self.variables = parse_variables(raw)?;
        Ok(self)
    }
}

/// Request to resolve an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveIncidentRequest {
    /// Key of the incident.
    pub incident_key: i64,
}

impl ResolveIncidentRequest {
    /// Creates the request.
    #[must_use]
    pub const fn new(incident_key: i64) -> Self {
        Self { incident_key }
    }
}

/// Parses a variables payload, which must be a JSON object.
///
/// # Errors
///
/// Returns [`CommandError::RequestConstruction`] if the text is not valid JSON
/// or the document is not an object.
pub fn parse_variables(raw: &str) -> Result<Variables, CommandError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        CommandError::RequestConstruction(format!("variables '{raw}' are not valid JSON: {e}"))
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CommandError::RequestConstruction(format!(
            "variables '{raw}' must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
