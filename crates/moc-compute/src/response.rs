//! Translating cloud agent responses into domain objects.

use std::collections::BTreeMap;

use cloudagent_api::{
    self as wire, PowerState, VirtualMachine as WireVirtualMachine, VirtualMachineResponse,
};

use crate::tags;
use crate::types::{
    CustomSize, DiskReference, ExecutionState, HardwareProfile, NetworkInterfaceReference,
    NetworkProfile, OsProfile, StorageProfile, VirtualMachine, VirtualMachineProperties,
    VirtualMachineRunCommandInstanceView, VirtualMachineRunCommandResponse,
};
use crate::{Error, Result};

/// Every returned VM, translated independently, in response order.
pub(crate) fn virtual_machines(response: VirtualMachineResponse, group: &str) -> Vec<VirtualMachine> {
    response
        .virtual_machines
        .into_iter()
        .map(|vm| from_wire(vm, group))
        .collect()
}

pub(crate) fn from_wire(vm: WireVirtualMachine, group: &str) -> VirtualMachine {
    let tags = tags::from_wire(vm.tags.as_ref());
    let power_state = vm.power_state_type().unwrap_or(PowerState::Unknown);
    let status = vm.status.unwrap_or_default();

    VirtualMachine {
        name: non_empty(vm.name),
        id: non_empty(vm.id),
        resource_group: Some(group.to_string()),
        location: non_empty(vm.location_name),
        tags: (!tags.is_empty()).then_some(tags),
        properties: Some(VirtualMachineProperties {
            hardware_profile: vm.hardware.map(hardware_from_wire),
            os_profile: vm.os.map(os_from_wire),
            storage_profile: vm.storage.map(storage_from_wire),
            network_profile: vm.network.map(network_from_wire),
            power_state: Some(power_state.as_str().to_string()),
            provisioning_state: non_empty(status.provisioning_state),
            statuses: statuses(&status.health_state, &status.last_error),
            disable_high_availability: Some(vm.disable_high_availability),
        }),
    }
}

/// Closed mapping: anything outside UNKNOWN/SUCCEEDED/FAILED is protocol
/// drift and is rejected instead of read as `Unknown`.
pub(crate) fn execution_state(value: i32) -> Result<ExecutionState> {
    match wire::ExecutionState::from_i32(value) {
        Some(wire::ExecutionState::Unknown) => Ok(ExecutionState::Unknown),
        Some(wire::ExecutionState::Succeeded) => Ok(ExecutionState::Succeeded),
        Some(wire::ExecutionState::Failed) => Ok(ExecutionState::Failed),
        None => Err(Error::NotSupported(format!(
            "unknown execution state {value} reported for virtual machine run command"
        ))),
    }
}

pub(crate) fn run_command_response(
    response: wire::VirtualMachineRunCommandResponse,
) -> Result<VirtualMachineRunCommandResponse> {
    let view = response.instance_view.ok_or_else(|| {
        Error::InvalidResponse("run command response carried no instance view".into())
    })?;

    Ok(VirtualMachineRunCommandResponse {
        instance_view: VirtualMachineRunCommandInstanceView {
            execution_state: execution_state(view.execution_state)?,
            exit_code: view.exit_code,
            output: view.output,
            error: view.error,
        },
    })
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn statuses(health_state: &str, last_error: &str) -> Option<BTreeMap<String, Option<String>>> {
    let mut statuses = BTreeMap::new();
    if !health_state.is_empty() {
        statuses.insert("HealthState".to_string(), Some(health_state.to_string()));
    }
    if !last_error.is_empty() {
        statuses.insert("LastError".to_string(), Some(last_error.to_string()));
    }
    (!statuses.is_empty()).then_some(statuses)
}

fn hardware_from_wire(hw: wire::HardwareConfiguration) -> HardwareProfile {
    HardwareProfile {
        vm_size: non_empty(hw.vm_size),
        custom_size: hw.custom_size.map(|c| CustomSize {
            cpu_count: Some(c.cpu_count),
            memory_mb: Some(c.memory_mb),
        }),
    }
}

fn os_from_wire(os: wire::OperatingSystemConfiguration) -> OsProfile {
    OsProfile {
        computer_name: non_empty(os.computer_name),
        admin_username: non_empty(os.administrator_username),
        admin_password: non_empty(os.administrator_password),
        os_type: non_empty(os.os_type),
    }
}

fn storage_from_wire(storage: wire::StorageConfiguration) -> StorageProfile {
    let disk = |d: wire::Disk| DiskReference {
        name: non_empty(d.diskname),
    };
    StorageProfile {
        image_reference: non_empty(storage.image_reference),
        os_disk: storage.os_disk.map(disk),
        data_disks: (!storage.data_disks.is_empty())
            .then(|| storage.data_disks.into_iter().map(disk).collect()),
    }
}

fn network_from_wire(network: wire::NetworkConfiguration) -> NetworkProfile {
    NetworkProfile {
        network_interfaces: (!network.interfaces.is_empty()).then(|| {
            network
                .interfaces
                .into_iter()
                .map(|nic| NetworkInterfaceReference {
                    id: non_empty(nic.network_interface_name),
                })
                .collect()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudagent_api::{RunCommandInstanceView, Status};

    #[test]
    fn test_listing_keeps_response_order() {
        let response = VirtualMachineResponse {
            virtual_machines: vec![
                WireVirtualMachine::identity("rg1", "zeta"),
                WireVirtualMachine::identity("rg1", "alpha"),
                WireVirtualMachine::identity("rg1", "mid"),
            ],
            error: String::new(),
        };
        let names: Vec<_> = virtual_machines(response, "rg1")
            .into_iter()
            .map(|vm| vm.name.unwrap())
            .collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_from_wire_fields() {
        let mut vm = WireVirtualMachine::identity("rg1", "vm1");
        vm.id = "/subscriptions/s/vm1".into();
        vm.power_state = PowerState::Stopped as i32;
        vm.status = Some(Status {
            provisioning_state: "Succeeded".into(),
            health_state: "OK".into(),
            last_error: String::new(),
        });

        let domain = from_wire(vm, "rg1");
        assert_eq!(domain.name.as_deref(), Some("vm1"));
        assert_eq!(domain.resource_group.as_deref(), Some("rg1"));
        assert_eq!(domain.tags, None);
        let props = domain.properties.unwrap();
        assert_eq!(props.power_state.as_deref(), Some("Stopped"));
        assert_eq!(props.provisioning_state.as_deref(), Some("Succeeded"));
        assert_eq!(
            props.statuses.unwrap().get("HealthState"),
            Some(&Some("OK".to_string()))
        );
    }

    #[test]
    fn test_execution_state_mapping() {
        assert_eq!(execution_state(0).unwrap(), ExecutionState::Unknown);
        assert_eq!(execution_state(1).unwrap(), ExecutionState::Succeeded);
        assert_eq!(execution_state(2).unwrap(), ExecutionState::Failed);
    }

    #[test]
    fn test_unrecognized_execution_state_rejected() {
        for value in [3, 99, -1] {
            assert!(matches!(execution_state(value), Err(Error::NotSupported(_))));
        }
    }

    #[test]
    fn test_run_command_response() {
        let response = wire::VirtualMachineRunCommandResponse {
            virtual_machine: None,
            instance_view: Some(RunCommandInstanceView {
                execution_state: 2,
                exit_code: 127,
                output: String::new(),
                error: "command not found".into(),
            }),
        };
        let view = run_command_response(response).unwrap().instance_view;
        assert_eq!(view.execution_state, ExecutionState::Failed);
        assert_eq!(view.exit_code, 127);
        assert_eq!(view.error, "command not found");

        let missing = wire::VirtualMachineRunCommandResponse::default();
        assert!(matches!(run_command_response(missing), Err(Error::InvalidResponse(_))));
    }
}
