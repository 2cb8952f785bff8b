use std::sync::Arc;

use cloudagent_api::{
    AgentClient, AgentConfig, Authorizer, Operation, StaticTokenAuthorizer,
    VirtualMachineOperation, VirtualMachineRequest, VirtualMachineResponse,
};
use tracing::{debug, info};

use crate::agent::VirtualMachineAgent;
use crate::classify::classify;
use crate::resolve::Resolved;
use crate::types::{VirtualMachine, VirtualMachineRunCommandRequest, VirtualMachineRunCommandResponse};
use crate::{Error, Result, query, request, response, run_command};

/// Virtual machine operations against the cloud agent.
///
/// Holds nothing but the channel handle, so a single client can serve
/// concurrent callers. Every call is one resolve-then-act round trip; no VM
/// state is cached between calls.
#[derive(Clone)]
pub struct VirtualMachineClient {
    agent: Arc<dyn VirtualMachineAgent>,
}

impl VirtualMachineClient {
    /// Connect to the agent at `config.endpoint` on behalf of `config.subscription_id`.
    pub fn new(config: &AgentConfig, authorizer: &dyn Authorizer) -> Result<Self> {
        let agent = AgentClient::new(config, authorizer).map_err(Error::Config)?;
        Ok(Self::with_agent(Arc::new(agent)))
    }

    /// Create from env vars; see [`AgentConfig::from_env`] and
    /// [`StaticTokenAuthorizer::from_env`].
    pub fn from_env() -> Result<Self> {
        let config = AgentConfig::from_env().map_err(Error::Config)?;
        let authorizer = StaticTokenAuthorizer::from_env().map_err(Error::Config)?;
        Self::new(&config, &authorizer)
    }

    pub fn with_agent(agent: Arc<dyn VirtualMachineAgent>) -> Self {
        Self { agent }
    }

    /// VMs named `name` in `group`, or every VM in `group` when `name` is empty.
    pub async fn get(&self, group: &str, name: &str) -> Result<Vec<VirtualMachine>> {
        require_group(group)?;
        let req = request::virtual_machine_request(Operation::Get, group, name, None)?;
        let resp = self.invoke(&req).await?;
        Ok(response::virtual_machines(resp, group))
    }

    /// Every VM in `group` that matches the JMESPath expression `query`.
    pub async fn query(&self, group: &str, query: &str) -> Result<Vec<VirtualMachine>> {
        let listing = self.get(group, "").await?;
        query::filter(listing, query)
    }

    pub async fn create_or_update(
        &self,
        group: &str,
        name: &str,
        vm: &VirtualMachine,
    ) -> Result<VirtualMachine> {
        require_group(group)?;
        let req = request::virtual_machine_request(Operation::Post, group, name, Some(vm))?;
        let resp = self.invoke(&req).await?;

        let created = response::virtual_machines(resp, group)
            .into_iter()
            .next()
            .ok_or(Error::CreationFailed)?;

        info!(group, name, id = ?created.id, "moc: virtual machine created or updated");
        Ok(created)
    }

    pub async fn delete(&self, group: &str, name: &str) -> Result<()> {
        let resolved = self.resolve(group, name).await?;
        let req = request::delete_request(resolved)?;
        self.invoke(&req).await?;

        info!(group, name, "moc: virtual machine deleted");
        Ok(())
    }

    pub async fn start(&self, group: &str, name: &str) -> Result<()> {
        self.power(VirtualMachineOperation::Start, group, name).await?;
        info!(group, name, "moc: virtual machine started");
        Ok(())
    }

    pub async fn stop(&self, group: &str, name: &str) -> Result<()> {
        self.power(VirtualMachineOperation::Stop, group, name).await?;
        info!(group, name, "moc: virtual machine stopped");
        Ok(())
    }

    /// Run a command inside the VM and report its instance view.
    pub async fn run_command(
        &self,
        group: &str,
        name: &str,
        request: &VirtualMachineRunCommandRequest,
    ) -> Result<VirtualMachineRunCommandResponse> {
        let resolved = self.resolve(group, name).await?;
        run_command::run(self.agent.as_ref(), resolved, request).await
    }

    /// Resolve phase: the wire objects the agent currently holds for
    /// `(group, name)`, without a round trip through the domain model.
    pub async fn resolve(&self, group: &str, name: &str) -> Result<Resolved> {
        require_group(group)?;
        if name.is_empty() {
            return Err(Error::InvalidInput("virtual machine name is missing".into()));
        }
        let req = request::virtual_machine_request(Operation::Get, group, name, None)?;
        let resp = self.invoke(&req).await?;
        Ok(Resolved::new(group, name, resp.virtual_machines))
    }

    async fn power(&self, operation: VirtualMachineOperation, group: &str, name: &str) -> Result<()> {
        let resolved = self.resolve(group, name).await?;
        let req = request::operation_request(operation, resolved)?;
        debug!(group, name, ?operation, "moc: dispatching power operation");
        self.agent.operate(&req).await.map_err(classify)?;
        Ok(())
    }

    async fn invoke(&self, req: &VirtualMachineRequest) -> Result<VirtualMachineResponse> {
        debug!(
            operation = req.operation_type,
            count = req.virtual_machines.len(),
            "moc: dispatching virtual machine request"
        );
        self.agent.invoke(req).await.map_err(classify)
    }
}

fn require_group(group: &str) -> Result<()> {
    if group.is_empty() {
        return Err(Error::InvalidInput("resource group is missing".into()));
    }
    Ok(())
}
