use std::sync::Arc;

use cloudagent_api::{AgentClient, AgentConfig, Authorizer, DebugOperation, DebugRequest, StaticTokenAuthorizer};
use tracing::debug;

use crate::agent::DebugAgent;
use crate::classify::classify;
use crate::{Error, Result};

/// Diagnostics against the cloud agent's debug service.
#[derive(Clone)]
pub struct DebugClient {
    agent: Arc<dyn DebugAgent>,
}

impl DebugClient {
    pub fn new(config: &AgentConfig, authorizer: &dyn Authorizer) -> Result<Self> {
        let agent = AgentClient::new(config, authorizer).map_err(Error::Config)?;
        Ok(Self::with_agent(Arc::new(agent)))
    }

    pub fn from_env() -> Result<Self> {
        let config = AgentConfig::from_env().map_err(Error::Config)?;
        let authorizer = StaticTokenAuthorizer::from_env().map_err(Error::Config)?;
        Self::new(&config, &authorizer)
    }

    pub fn with_agent(agent: Arc<dyn DebugAgent>) -> Self {
        Self { agent }
    }

    /// Stack dump of every thread in the agent process.
    pub async fn stacktrace(&self) -> Result<String> {
        debug!("moc: requesting agent stacktrace");
        let resp = self
            .agent
            .invoke(&DebugRequest::new(DebugOperation::Stacktrace))
            .await
            .map_err(classify)?;
        Ok(resp.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAgent;
    use cloudagent_api::StatusCode;

    #[tokio::test]
    async fn test_stacktrace() {
        let agent = Arc::new(MockAgent::default());
        let client = DebugClient::with_agent(agent.clone());

        let trace = client.stacktrace().await.unwrap();
        assert!(trace.starts_with("goroutine 1"));
        assert_eq!(
            agent.debug_calls.lock().unwrap()[0],
            DebugRequest::new(DebugOperation::Stacktrace)
        );
    }

    #[tokio::test]
    async fn test_stacktrace_unreachable_agent() {
        let agent = Arc::new(MockAgent::default());
        agent.fail_with(StatusCode::SERVICE_UNAVAILABLE);

        let err = DebugClient::with_agent(agent).stacktrace().await.unwrap_err();
        assert!(err.is_fatal());
    }
}
