//! Virtual machine and debug adapters over the MOC cloud agent.
//!
//! Callers work with the domain model in [`types`]; every operation is
//! translated into a cloud agent request through a [`VirtualMachineAgent`]
//! channel and the response is translated back.

pub mod agent;
pub mod classify;
pub mod debug;
pub mod query;
pub mod resolve;
pub mod tags;
pub mod types;
pub mod virtual_machine;

mod request;
mod response;
mod run_command;

#[cfg(test)]
mod mock;

pub use agent::{DebugAgent, VirtualMachineAgent};
pub use debug::DebugClient;
pub use resolve::Resolved;
pub use virtual_machine::VirtualMachineClient;

pub use cloudagent_api::{AgentConfig, Authorizer, Code, StaticTokenAuthorizer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The cloud agent could not be reached. Callers should treat this as
    /// fatal for the process; see [`Error::is_fatal`].
    #[error("communication with cloud agent failed: {0}")]
    TransportUnavailable(#[source] cloudagent_api::Error),

    #[error("virtual machine [{name}] not found in group {group}")]
    NotFound { group: String, name: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("invalid response from cloud agent: {0}")]
    InvalidResponse(String),

    #[error("creation of virtual machine failed for unknown reason")]
    CreationFailed,

    #[error("query failed: {0}")]
    Query(String),

    #[error("cloud agent error: {0}")]
    Agent(#[source] cloudagent_api::Error),

    #[error("client configuration error: {0}")]
    Config(#[source] cloudagent_api::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// `true` when the cloud agent is unreachable. The process is expected to
    /// terminate rather than retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TransportUnavailable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Remote status code, for errors that came back from the agent.
    pub fn code(&self) -> Option<Code> {
        match self {
            Error::TransportUnavailable(e) | Error::Agent(e) => Some(e.code()),
            _ => None,
        }
    }
}
