//! Typed Rust client for the MOC cloud agent.
//!
//! Covers the subset needed by the compute and admin adapters:
//! virtual machines (invoke, operate, run command) and the debug agent.
//! Every call is a JSON `POST` to `{endpoint}/{service}/{method}`.

mod auth;
mod config;
mod types;

pub use auth::{Authorizer, StaticTokenAuthorizer};
pub use config::AgentConfig;
pub use types::*;

pub use reqwest::StatusCode;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

const SUBSCRIPTION_HEADER: &str = "x-moc-subscription";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cloud agent request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("cloud agent {endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("authorization failed: {0}")]
    Unauthorized(String),

    #[error("missing env var: {0}")]
    MissingEnv(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Status of a failed cloud agent call, in the agent's own vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    Unimplemented,
    Internal,
    Unavailable,
    Unauthenticated,
}

impl Code {
    pub fn from_http_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::InvalidArgument,
            401 => Self::Unauthenticated,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            409 => Self::AlreadyExists,
            501 => Self::Unimplemented,
            503 => Self::Unavailable,
            504 => Self::DeadlineExceeded,
            500..=599 => Self::Internal,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::InvalidArgument => "InvalidArgument",
            Self::DeadlineExceeded => "DeadlineExceeded",
            Self::NotFound => "NotFound",
            Self::AlreadyExists => "AlreadyExists",
            Self::PermissionDenied => "PermissionDenied",
            Self::Unimplemented => "Unimplemented",
            Self::Internal => "Internal",
            Self::Unavailable => "Unavailable",
            Self::Unauthenticated => "Unauthenticated",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Map this error onto the agent's status codes.
    pub fn code(&self) -> Code {
        match self {
            Self::Request(e) if e.is_connect() => Code::Unavailable,
            Self::Request(e) if e.is_timeout() => Code::DeadlineExceeded,
            Self::Request(e) if e.is_decode() => Code::Internal,
            Self::Request(e) => e.status().map_or(Code::Unknown, Code::from_http_status),
            Self::Api { status, .. } => Code::from_http_status(*status),
            Self::Unauthorized(_) => Code::Unauthenticated,
            Self::MissingEnv(_) | Self::InvalidConfig(_) => Code::InvalidArgument,
        }
    }

    /// Human-readable detail, without the transport prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Api { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Client for the cloud agent's RPC surface.
#[derive(Clone)]
pub struct AgentClient {
    endpoint: String,
    subscription_id: String,
    token: String,
    http: reqwest::Client,
}

impl AgentClient {
    /// Build an authorized channel for `config.subscription_id`.
    pub fn new(config: &AgentConfig, authorizer: &dyn Authorizer) -> Result<Self> {
        let token = authorizer.token()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            subscription_id: config.subscription_id.clone(),
            token,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { endpoint, status, body });
        }
        Ok(resp)
    }

    async fn call<Req, Resp>(&self, path: &str, endpoint: &'static str, req: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.url(path))
            .header("Authorization", self.auth())
            .header(SUBSCRIPTION_HEADER, &self.subscription_id)
            .json(req)
            .send()
            .await?;

        Self::check(resp, endpoint)
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    // ── Virtual machines ─────────────────────────────────────────────

    pub async fn invoke_virtual_machine(
        &self,
        req: &VirtualMachineRequest,
    ) -> Result<VirtualMachineResponse> {
        self.call("/VirtualMachineAgent/Invoke", "virtual machine invoke", req)
            .await
    }

    pub async fn operate_virtual_machine(
        &self,
        req: &VirtualMachineOperationRequest,
    ) -> Result<VirtualMachineOperationResponse> {
        self.call("/VirtualMachineAgent/Operate", "virtual machine operate", req)
            .await
    }

    pub async fn run_command(
        &self,
        req: &VirtualMachineRunCommandRequest,
    ) -> Result<VirtualMachineRunCommandResponse> {
        self.call("/VirtualMachineAgent/RunCommand", "virtual machine run command", req)
            .await
    }

    // ── Debug ────────────────────────────────────────────────────────

    pub async fn invoke_debug(&self, req: &DebugRequest) -> Result<DebugResponse> {
        self.call("/DebugAgent/Invoke", "debug invoke", req).await
    }
}
