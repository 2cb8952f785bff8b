//! Building cloud agent requests from domain objects.

use cloudagent_api::{
    Disk, HardwareConfiguration, NetworkConfiguration, NetworkInterface, Operation,
    OperatingSystemConfiguration, PowerState, StorageConfiguration, VirtualMachineCustomSize,
    VirtualMachineOperation, VirtualMachineOperationRequest, VirtualMachineRequest,
};
use cloudagent_api::VirtualMachine as WireVirtualMachine;

use crate::resolve::Resolved;
use crate::tags;
use crate::types::{
    DiskReference, HardwareProfile, NetworkProfile, OsProfile, StorageProfile, VirtualMachine,
};
use crate::{Error, Result};

/// CRUD request for `(group, name)`. Without `vm` the request carries an
/// identity-only object; with `vm` it carries the full translation.
pub(crate) fn virtual_machine_request(
    operation: Operation,
    group: &str,
    name: &str,
    vm: Option<&VirtualMachine>,
) -> Result<VirtualMachineRequest> {
    let wire = match vm {
        Some(vm) => to_wire(vm, group, name)?,
        None => WireVirtualMachine::identity(group, name),
    };
    Ok(VirtualMachineRequest::new(operation, vec![wire]))
}

/// DELETE carrying the object the agent reported during resolution.
pub(crate) fn delete_request(resolved: Resolved) -> Result<VirtualMachineRequest> {
    let vm = resolved.require_first()?;
    Ok(VirtualMachineRequest::new(Operation::Delete, vec![vm]))
}

/// Power operation carrying every resolved object.
pub(crate) fn operation_request(
    operation: VirtualMachineOperation,
    resolved: Resolved,
) -> Result<VirtualMachineOperationRequest> {
    let vms = resolved.require_any()?;
    Ok(VirtualMachineOperationRequest::new(operation, vms))
}

/// Translate a domain VM into its wire form within `group`.
///
/// The object's own name wins; `fallback_name` fills in when it has none.
pub(crate) fn to_wire(
    vm: &VirtualMachine,
    group: &str,
    fallback_name: &str,
) -> Result<WireVirtualMachine> {
    let name = vm
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback_name);
    if name.is_empty() {
        return Err(Error::InvalidInput("virtual machine name is missing".into()));
    }

    let mut wire = WireVirtualMachine::identity(group, name);
    wire.id = vm.id.clone().unwrap_or_default();
    wire.location_name = vm.location.clone().unwrap_or_default();
    wire.tags = vm.tags.as_ref().map(tags::to_wire);

    if let Some(props) = &vm.properties {
        wire.hardware = props.hardware_profile.as_ref().map(hardware_to_wire);
        wire.os = props.os_profile.as_ref().map(os_to_wire);
        wire.storage = props.storage_profile.as_ref().map(storage_to_wire);
        wire.network = props.network_profile.as_ref().map(network_to_wire);
        wire.power_state = props
            .power_state
            .as_deref()
            .and_then(PowerState::from_name)
            .unwrap_or(PowerState::Unknown) as i32;
        wire.disable_high_availability = props.disable_high_availability.unwrap_or(false);
    }

    Ok(wire)
}

fn hardware_to_wire(profile: &HardwareProfile) -> HardwareConfiguration {
    HardwareConfiguration {
        vm_size: profile.vm_size.clone().unwrap_or_default(),
        custom_size: profile.custom_size.as_ref().map(|c| VirtualMachineCustomSize {
            cpu_count: c.cpu_count.unwrap_or_default(),
            memory_mb: c.memory_mb.unwrap_or_default(),
        }),
    }
}

fn os_to_wire(profile: &OsProfile) -> OperatingSystemConfiguration {
    OperatingSystemConfiguration {
        computer_name: profile.computer_name.clone().unwrap_or_default(),
        administrator_username: profile.admin_username.clone().unwrap_or_default(),
        administrator_password: profile.admin_password.clone().unwrap_or_default(),
        os_type: profile.os_type.clone().unwrap_or_default(),
    }
}

fn storage_to_wire(profile: &StorageProfile) -> StorageConfiguration {
    let disk = |d: &DiskReference| Disk {
        diskname: d.name.clone().unwrap_or_default(),
    };
    StorageConfiguration {
        image_reference: profile.image_reference.clone().unwrap_or_default(),
        os_disk: profile.os_disk.as_ref().map(disk),
        data_disks: profile
            .data_disks
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(disk)
            .collect(),
    }
}

fn network_to_wire(profile: &NetworkProfile) -> NetworkConfiguration {
    NetworkConfiguration {
        interfaces: profile
            .network_interfaces
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|nic| NetworkInterface {
                network_interface_name: nic.id.clone().unwrap_or_default(),
            })
            .collect(),
    }
}
