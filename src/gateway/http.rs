//! HTTP adapter for the gateway REST API.

use super::{
    CompleteJobRequest, CompleteJobResponse, FailJobRequest, FailJobResponse, JobGateway,
    ResolveIncidentRequest, ResolveIncidentResponse, SetVariablesRequest, SetVariablesResponse,
    Variables,
};
use crate::error::{Error, RemoteError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Gateway address used when neither `--address` nor `ZEEBE_ADDRESS` is set.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8080";

/// Upper bound on the response body bytes read from the gateway.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the gateway.
    pub address: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Parses and normalizes the base URL.
    ///
    /// The path always ends in `/` so endpoint paths join beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the address is not an absolute http(s) URL.
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.address).map_err(|e| Error::Config {
            message: format!("invalid gateway address '{}': {e}", self.address),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!(
                    "invalid gateway address '{}': scheme must be http or https",
                    self.address
                ),
            });
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

/// [`JobGateway`] over the gateway's JSON REST API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    /// Creates a gateway client.
    ///
    /// No connection is opened until the first request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the address is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let base = config.base_url()?;
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, base })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, RemoteError> {
        self.base
            .join(path)
            .map_err(|e| RemoteError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    async fn send<R>(&self, builder: RequestBuilder) -> std::result::Result<R, RemoteError>
    where
        R: DeserializeOwned + Default,
    {
        let response = builder.send().await?;
        let status = response.status();
        let (body, truncated) = read_body(response).await?;

        if !status.is_success() {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                detail: problem_detail(&body, status.canonical_reason()),
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "gateway response");

        if truncated {
            return Err(RemoteError::Transport(format!(
                "response body exceeds {MAX_BODY_BYTES} bytes"
            )));
        }

        if body.trim().is_empty() {
            return Ok(R::default());
        }

        serde_json::from_str(&body)
            .map_err(|e| RemoteError::Transport(format!("invalid response body: {e}")))
    }
}

/// Reads at most [`MAX_BODY_BYTES`] of the body, stopping early once the
/// limit is passed. The flag reports whether bytes were dropped.
async fn read_body(mut response: Response) -> std::result::Result<(String, bool), RemoteError> {
    let mut buf = Vec::new();
    let mut truncated = false;

    while let Some(chunk) = response.chunk().await? {
        let room = MAX_BODY_BYTES - buf.len();
        if chunk.len() > room {
            buf.extend_from_slice(&chunk[..room]);
            truncated = true;
            break;
        }
        buf.extend_from_slice(&chunk);
    }

    Ok((String::from_utf8_lossy(&buf).into_owned(), truncated))
}

#[derive(Serialize)]
struct CompleteJobBody<'a> {
    variables: &'a Variables,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailJobBody<'a> {
    retries: u32,
    error_message: &'a str,
    retry_back_off: u64,
    variables: &'a Variables,
}

#[derive(Serialize)]
struct SetVariablesBody<'a> {
    variables: &'a Variables,
    local: bool,
}

#[async_trait]
impl JobGateway for HttpGateway {
    async fn complete_job(
        &self,
        request: CompleteJobRequest,
    ) -> std::result::Result<CompleteJobResponse, RemoteError> {
        let url = self.endpoint(&format!("v2/jobs/{}/completion", request.job_key))?;
        let body = CompleteJobBody {
            variables: &request.variables,
        };
        self.send(self.client.post(url).json(&body)).await
    }

    async fn fail_job(
        &self,
        request: FailJobRequest,
    ) -> std::result::Result<FailJobResponse, RemoteError> {
        let url = self.endpoint(&format!("v2/jobs/{}/failure", request.job_key))?;
        let body = FailJobBody {
            retries: request.retries,
            error_message: &request.error_message,
            retry_back_off: request.retry_backoff_ms,
            variables: &request.variables,
        };
        self.send(self.client.post(url).json(&body)).await
    }

    async fn set_variables(
        &self,
        request: SetVariablesRequest,
    ) -> std::result::Result<SetVariablesResponse, RemoteError> {
        let url = self.endpoint(&format!(
            "v2/element-instances/{}/variables",
            request.element_instance_key
        ))?;
        let body = SetVariablesBody {
            variables: &request.variables,
            local: request.local,
        };
        self.send(self.client.put(url).json(&body)).await
    }

    async fn resolve_incident(
        &self,
        request: ResolveIncidentRequest,
    ) -> std::result::Result<ResolveIncidentResponse, RemoteError> {
        let url = self.endpoint(&format!("v2/incidents/{}/resolution", request.incident_key))?;
        self.send(self.client.post(url)).await
    }
}

/// Extracts a readable message from an error body.
///
/// Prefers the RFC 7807 `detail` field, then `title`, then the raw body.
fn problem_detail(body: &str, reason: Option<&str>) -> String {
    if let Ok(serde_json::Value::Object(problem)) = serde_json::from_str(body) {
        for field in ["detail", "title"] {
            if let Some(serde_json::Value::String(text)) = problem.get(field)
                && !text.is_empty()
            {
                return text.clone();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("no response body").to_string()
    } else {
        trimmed.to_string()
    }
}
