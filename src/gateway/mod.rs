//! Gateway boundary.
//!
//! Defines the [`JobGateway`] trait consumed by the command layer, the
//! request and response types it exchanges, and [`dispatch`], which bounds
//! every call by a deadline.

mod http;
mod request;
mod response;

pub use http::{DEFAULT_ADDRESS, GatewayConfig, HttpGateway, MAX_BODY_BYTES};
pub use request::{
    CompleteJobRequest, FailJobRequest, ResolveIncidentRequest, SetVariablesRequest, Variables,
    parse_variables,
};
pub use response::{
    CompleteJobResponse, FailJobResponse, ResolveIncidentResponse, SetVariablesResponse,
};

use crate::error::RemoteError;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Deadline applied to every gateway call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote job-processing gateway.
///
/// Implementations perform exactly one remote call per method invocation
/// and never retry. Futures must be cancel-safe on drop: [`dispatch`] drops
/// them when the deadline elapses.
#[async_trait]
pub trait JobGateway: Send + Sync {
    /// Completes a job.
    async fn complete_job(
        &self,
        request: CompleteJobRequest,
    ) -> Result<CompleteJobResponse, RemoteError>;

    /// Fails a job.
    async fn fail_job(&self, request: FailJobRequest) -> Result<FailJobResponse, RemoteError>;

    /// Sets variables on an element instance.
    async fn set_variables(
        &self,
        request: SetVariablesRequest,
    ) -> Result<SetVariablesResponse, RemoteError>;

    /// Resolves an incident.
    async fn resolve_incident(
        &self,
        request: ResolveIncidentRequest,
    ) -> Result<ResolveIncidentResponse, RemoteError>;
}

/// Awaits a gateway call for at most `deadline`.
///
/// On expiry the call future is dropped, cancelling the in-flight request,
/// and [`RemoteError::DeadlineExceeded`] is returned.
///
/// # Errors
///
/// Returns the call's own error, or `DeadlineExceeded` if it did not finish in time.
pub async fn dispatch<T, F>(operation: &str, deadline: Duration, call: F) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    debug!(operation, ?deadline, "dispatching gateway request");

    match tokio::time::timeout(deadline, call).await {
        Ok(Ok(response)) => {
            debug!(operation, "gateway request succeeded");
            Ok(response)
        }
        Ok(Err(e)) => {
            debug!(operation, error = %e, "gateway request failed");
            Err(e)
        }
        Err(_) => {
            warn!(operation, ?deadline, "gateway request cancelled after deadline");
            Err(RemoteError::DeadlineExceeded { after: deadline })
        }
    }
}
