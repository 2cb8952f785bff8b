//! Run-command flow: resolved target in, decoded instance view out.

use cloudagent_api::{self as wire, RunCommandScriptSource};
use tracing::info;

use crate::agent::VirtualMachineAgent;
use crate::classify::classify;
use crate::resolve::Resolved;
use crate::response;
use crate::types::{VirtualMachineRunCommandRequest, VirtualMachineRunCommandResponse};
use crate::Result;

/// Build the wire request for the single resolved target.
pub(crate) fn build_request(
    resolved: Resolved,
    request: &VirtualMachineRunCommandRequest,
) -> Result<wire::VirtualMachineRunCommandRequest> {
    let vm = resolved.require_one()?;

    let parameters = request
        .parameters
        .iter()
        .flatten()
        .map(|p| wire::RunCommandInputParameter {
            name: p.name.clone(),
            value: p.value.clone(),
        })
        .collect();

    // Copied as given; at most one should be set.
    let source = RunCommandScriptSource {
        script: request.source.script.clone().unwrap_or_default(),
        script_uri: request.source.script_uri.clone().unwrap_or_default(),
        command_id: request.source.command_id.clone().unwrap_or_default(),
    };

    Ok(wire::VirtualMachineRunCommandRequest {
        virtual_machine: Some(vm),
        run_command_input_parameters: parameters,
        source: Some(source),
        run_as_user: request.run_as_user.clone().unwrap_or_default(),
        run_as_password: request.run_as_password.clone().unwrap_or_default(),
    })
}

pub(crate) async fn run(
    agent: &dyn VirtualMachineAgent,
    resolved: Resolved,
    request: &VirtualMachineRunCommandRequest,
) -> Result<VirtualMachineRunCommandResponse> {
    let group = resolved.group().to_string();
    let name = resolved.name().to_string();

    let wire_request = build_request(resolved, request)?;
    let wire_response = agent.run_command(&wire_request).await.map_err(classify)?;
    let response = response::run_command_response(wire_response)?;

    info!(
        group = %group,
        name = %name,
        state = ?response.instance_view.execution_state,
        exit_code = response.instance_view.exit_code,
        "moc: run command finished"
    );
    Ok(response)
}
