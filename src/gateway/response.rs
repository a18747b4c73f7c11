//! Gateway response payloads.
//!
//! The gateway acknowledges these commands without a body, so each
//! response is an empty object. They are kept as distinct types so every
//! command has its own structured view.

use serde::{Deserialize, Serialize};

/// Response to a job completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteJobResponse {}

/// Response to a job failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailJobResponse {}

/// Response to a variables update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariablesResponse {}

/// Response to an incident resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveIncidentResponse {}
