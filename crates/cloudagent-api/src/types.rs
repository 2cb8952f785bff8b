use serde::{Deserialize, Serialize};

// ── Enumerations ─────────────────────────────────────────────────────
//
// Enum-typed fields travel as integers so that values this client does not
// know about still decode. Use the `*_type()` accessors to interpret them.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get = 0,
    Post = 1,
    Delete = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualMachineOperation {
    Start = 0,
    Stop = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionState {
    Unknown = 0,
    Succeeded = 1,
    Failed = 2,
}

impl ExecutionState {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Succeeded),
            2 => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    Unknown = 0,
    Running = 1,
    Off = 2,
    Stopped = 3,
    Paused = 4,
    Starting = 5,
    Stopping = 6,
}

impl PowerState {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Running),
            2 => Some(Self::Off),
            3 => Some(Self::Stopped),
            4 => Some(Self::Paused),
            5 => Some(Self::Starting),
            6 => Some(Self::Stopping),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Unknown" => Some(Self::Unknown),
            "Running" => Some(Self::Running),
            "Off" => Some(Self::Off),
            "Stopped" => Some(Self::Stopped),
            "Paused" => Some(Self::Paused),
            "Starting" => Some(Self::Starting),
            "Stopping" => Some(Self::Stopping),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Running => "Running",
            Self::Off => "Off",
            Self::Stopped => "Stopped",
            Self::Paused => "Paused",
            Self::Starting => "Starting",
            Self::Stopping => "Stopping",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugOperation {
    Stacktrace = 0,
}

// ── Tags ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

// ── Virtual machine ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HardwareConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OperatingSystemConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkConfiguration>,
    #[serde(default)]
    pub power_state: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub disable_high_availability: bool,
}

impl VirtualMachine {
    /// Identity-only object, used when a request names a VM without carrying
    /// its full definition.
    pub fn identity(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_name: group.into(),
            ..Default::default()
        }
    }

    pub fn power_state_type(&self) -> Option<PowerState> {
        PowerState::from_i32(self.power_state)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareConfiguration {
    #[serde(default)]
    pub vm_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_size: Option<VirtualMachineCustomSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineCustomSize {
    #[serde(default)]
    pub cpu_count: i32,
    #[serde(default)]
    pub memory_mb: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemConfiguration {
    #[serde(default)]
    pub computer_name: String,
    #[serde(default)]
    pub administrator_username: String,
    #[serde(default)]
    pub administrator_password: String,
    #[serde(default)]
    pub os_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfiguration {
    #[serde(default)]
    pub image_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_disk: Option<Disk>,
    #[serde(default)]
    pub data_disks: Vec<Disk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    #[serde(default)]
    pub diskname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfiguration {
    #[serde(default)]
    pub interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    #[serde(default)]
    pub network_interface_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub provisioning_state: String,
    #[serde(default)]
    pub health_state: String,
    #[serde(default)]
    pub last_error: String,
}

// ── CRUD + power operations ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineRequest {
    #[serde(default)]
    pub operation_type: i32,
    #[serde(default)]
    pub virtual_machines: Vec<VirtualMachine>,
}

impl VirtualMachineRequest {
    pub fn new(operation: Operation, virtual_machines: Vec<VirtualMachine>) -> Self {
        Self {
            operation_type: operation as i32,
            virtual_machines,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineResponse {
    #[serde(default)]
    pub virtual_machines: Vec<VirtualMachine>,
    #[serde(default)]
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineOperationRequest {
    #[serde(default)]
    pub operation_type: i32,
    #[serde(default)]
    pub virtual_machines: Vec<VirtualMachine>,
}

impl VirtualMachineOperationRequest {
    pub fn new(operation: VirtualMachineOperation, virtual_machines: Vec<VirtualMachine>) -> Self {
        Self {
            operation_type: operation as i32,
            virtual_machines,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineOperationResponse {
    #[serde(default)]
    pub virtual_machines: Vec<VirtualMachine>,
    #[serde(default)]
    pub error: String,
}

// ── Run command ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandInputParameter {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandScriptSource {
    #[serde(default)]
    pub script: String,
    #[serde(default, rename = "scriptURI")]
    pub script_uri: String,
    #[serde(default, rename = "commandID")]
    pub command_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineRunCommandRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_machine: Option<VirtualMachine>,
    #[serde(default)]
    pub run_command_input_parameters: Vec<RunCommandInputParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RunCommandScriptSource>,
    #[serde(default)]
    pub run_as_user: String,
    #[serde(default)]
    pub run_as_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandInstanceView {
    #[serde(default)]
    pub execution_state: i32,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: String,
}

impl RunCommandInstanceView {
    pub fn execution_state_type(&self) -> Option<ExecutionState> {
        ExecutionState::from_i32(self.execution_state)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineRunCommandResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_machine: Option<VirtualMachine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_view: Option<RunCommandInstanceView>,
}

// ── Debug agent ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugRequest {
    #[serde(default)]
    pub operation_type: i32,
}

impl DebugRequest {
    pub fn new(operation: DebugOperation) -> Self {
        Self {
            operation_type: operation as i32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    #[serde(default)]
    pub result: String,
}
