//! In-memory cloud agent for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use cloudagent_api::{
    DebugRequest, DebugResponse, ExecutionState, Operation, PowerState, Result,
    RunCommandInstanceView, StatusCode, VirtualMachine as WireVirtualMachine,
    VirtualMachineOperation, VirtualMachineOperationRequest, VirtualMachineOperationResponse,
    VirtualMachineRequest, VirtualMachineResponse, VirtualMachineRunCommandRequest,
    VirtualMachineRunCommandResponse,
};

use crate::agent::{DebugAgent, VirtualMachineAgent};

#[derive(Default)]
pub(crate) struct MockAgent {
    pub store: Mutex<Vec<WireVirtualMachine>>,
    pub invoked: Mutex<Vec<VirtualMachineRequest>>,
    pub operated: Mutex<Vec<VirtualMachineOperationRequest>>,
    pub run_commands: Mutex<Vec<VirtualMachineRunCommandRequest>>,
    pub debug_calls: Mutex<Vec<DebugRequest>>,
    /// Every call fails with this status while set.
    pub fail_with: Mutex<Option<StatusCode>>,
    /// Only DELETE invocations fail; GET still resolves.
    pub fail_delete_with: Mutex<Option<StatusCode>>,
    pub fail_operate_with: Mutex<Option<StatusCode>>,
    pub fail_run_command_with: Mutex<Option<StatusCode>>,
    /// POST succeeds but reports no VMs.
    pub create_returns_empty: Mutex<bool>,
    pub instance_view: Mutex<Option<RunCommandInstanceView>>,
}

impl MockAgent {
    pub fn with_vms(vms: Vec<WireVirtualMachine>) -> Self {
        let agent = Self::default();
        *agent.store.lock().unwrap() = vms;
        agent
    }

    pub fn fail_with(&self, status: StatusCode) {
        *self.fail_with.lock().unwrap() = Some(status);
    }

    pub fn invoked_operations(&self) -> Vec<i32> {
        self.invoked
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.operation_type)
            .collect()
    }

    fn check_failure(&self, endpoint: &'static str) -> Result<()> {
        fail(endpoint, *self.fail_with.lock().unwrap())
    }

    fn matching(&self, group: &str, name: &str) -> Vec<WireVirtualMachine> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .filter(|vm| vm.group_name == group && (name.is_empty() || vm.name == name))
            .cloned()
            .collect()
    }
}

fn fail(endpoint: &'static str, status: Option<StatusCode>) -> Result<()> {
    match status {
        Some(status) => Err(cloudagent_api::Error::Api {
            endpoint,
            status,
            body: "mock failure".into(),
        }),
        None => Ok(()),
    }
}

#[async_trait]
impl VirtualMachineAgent for MockAgent {
    async fn invoke(&self, request: &VirtualMachineRequest) -> Result<VirtualMachineResponse> {
        self.invoked.lock().unwrap().push(request.clone());
        self.check_failure("virtual machine invoke")?;
        if request.operation_type == Operation::Delete as i32 {
            fail("virtual machine invoke", *self.fail_delete_with.lock().unwrap())?;
        }

        let mut virtual_machines = Vec::new();
        for vm in &request.virtual_machines {
            match request.operation_type {
                op if op == Operation::Get as i32 => {
                    virtual_machines.extend(self.matching(&vm.group_name, &vm.name));
                }
                op if op == Operation::Post as i32 => {
                    if *self.create_returns_empty.lock().unwrap() {
                        continue;
                    }
                    let mut stored = vm.clone();
                    if stored.id.is_empty() {
                        stored.id = format!("/resourceGroups/{}/virtualMachines/{}", vm.group_name, vm.name);
                    }
                    let mut store = self.store.lock().unwrap();
                    match store
                        .iter_mut()
                        .find(|s| s.group_name == vm.group_name && s.name == vm.name)
                    {
                        Some(existing) => *existing = stored.clone(),
                        None => store.push(stored.clone()),
                    }
                    virtual_machines.push(stored);
                }
                op if op == Operation::Delete as i32 => {
                    self.store
                        .lock()
                        .unwrap()
                        .retain(|s| !(s.group_name == vm.group_name && s.name == vm.name));
                }
                _ => {}
            }
        }

        Ok(VirtualMachineResponse {
            virtual_machines,
            error: String::new(),
        })
    }

    async fn operate(
        &self,
        request: &VirtualMachineOperationRequest,
    ) -> Result<VirtualMachineOperationResponse> {
        self.operated.lock().unwrap().push(request.clone());
        self.check_failure("virtual machine operate")?;
        fail("virtual machine operate", *self.fail_operate_with.lock().unwrap())?;

        let power_state = if request.operation_type == VirtualMachineOperation::Start as i32 {
            PowerState::Running
        } else {
            PowerState::Stopped
        };
        let mut store = self.store.lock().unwrap();
        for target in &request.virtual_machines {
            for vm in store
                .iter_mut()
                .filter(|s| s.group_name == target.group_name && s.name == target.name)
            {
                vm.power_state = power_state as i32;
            }
        }

        Ok(VirtualMachineOperationResponse {
            virtual_machines: request.virtual_machines.clone(),
            error: String::new(),
        })
    }

    async fn run_command(
        &self,
        request: &VirtualMachineRunCommandRequest,
    ) -> Result<VirtualMachineRunCommandResponse> {
        self.run_commands.lock().unwrap().push(request.clone());
        self.check_failure("virtual machine run command")?;
        fail("virtual machine run command", *self.fail_run_command_with.lock().unwrap())?;

        let instance_view = self
            .instance_view
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(RunCommandInstanceView {
                execution_state: ExecutionState::Succeeded as i32,
                exit_code: 0,
                output: "ok".into(),
                error: String::new(),
            });

        Ok(VirtualMachineRunCommandResponse {
            virtual_machine: request.virtual_machine.clone(),
            instance_view: Some(instance_view),
        })
    }
}

#[async_trait]
impl DebugAgent for MockAgent {
    async fn invoke(&self, request: &DebugRequest) -> Result<DebugResponse> {
        self.debug_calls.lock().unwrap().push(request.clone());
        self.check_failure("debug invoke")?;
        Ok(DebugResponse {
            result: "goroutine 1 [running]:\nmain.main()".into(),
        })
    }
}
