//! Remote channels the adapters talk through.
//!
//! [`cloudagent_api::AgentClient`] implements both traits; tests substitute
//! an in-memory agent.

use async_trait::async_trait;
use cloudagent_api::{
    AgentClient, DebugRequest, DebugResponse, Result, VirtualMachineOperationRequest,
    VirtualMachineOperationResponse, VirtualMachineRequest, VirtualMachineResponse,
    VirtualMachineRunCommandRequest, VirtualMachineRunCommandResponse,
};

/// Authorized handle to the cloud agent's virtual machine service.
#[async_trait]
pub trait VirtualMachineAgent: Send + Sync + 'static {
    /// CRUD entry point: GET, POST (create or update) and DELETE.
    async fn invoke(&self, request: &VirtualMachineRequest) -> Result<VirtualMachineResponse>;

    /// Power operations.
    async fn operate(
        &self,
        request: &VirtualMachineOperationRequest,
    ) -> Result<VirtualMachineOperationResponse>;

    async fn run_command(
        &self,
        request: &VirtualMachineRunCommandRequest,
    ) -> Result<VirtualMachineRunCommandResponse>;
}

/// Authorized handle to the agent's debug service.
#[async_trait]
pub trait DebugAgent: Send + Sync + 'static {
    async fn invoke(&self, request: &DebugRequest) -> Result<DebugResponse>;
}

#[async_trait]
impl VirtualMachineAgent for AgentClient {
    async fn invoke(&self, request: &VirtualMachineRequest) -> Result<VirtualMachineResponse> {
        self.invoke_virtual_machine(request).await
    }

    async fn operate(
        &self,
        request: &VirtualMachineOperationRequest,
    ) -> Result<VirtualMachineOperationResponse> {
        self.operate_virtual_machine(request).await
    }

    async fn run_command(
        &self,
        request: &VirtualMachineRunCommandRequest,
    ) -> Result<VirtualMachineRunCommandResponse> {
        AgentClient::run_command(self, request).await
    }
}

#[async_trait]
impl DebugAgent for AgentClient {
    async fn invoke(&self, request: &DebugRequest) -> Result<DebugResponse> {
        self.invoke_debug(request).await
    }
}
