//! Resolve phase of the resolve-then-act operations.
//!
//! Delete, power and run-command operations first look the target up on the
//! agent and then act on the objects the agent returned, never on an object
//! synthesized by the caller. [`Resolved`] is what passes between the two
//! phases.

use cloudagent_api::VirtualMachine as WireVirtualMachine;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    group: String,
    name: String,
    virtual_machines: Vec<WireVirtualMachine>,
}

impl Resolved {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        virtual_machines: Vec<WireVirtualMachine>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            virtual_machines,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.virtual_machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.virtual_machines.is_empty()
    }

    fn not_found(&self) -> Error {
        Error::NotFound {
            group: self.group.clone(),
            name: self.name.clone(),
        }
    }

    /// All matches; fails with `NotFound` when there are none.
    pub fn require_any(self) -> Result<Vec<WireVirtualMachine>> {
        if self.is_empty() {
            return Err(self.not_found());
        }
        Ok(self.virtual_machines)
    }

    /// First match in agent order; fails with `NotFound` when there is none.
    pub fn require_first(self) -> Result<WireVirtualMachine> {
        if self.is_empty() {
            return Err(self.not_found());
        }
        Ok(self.virtual_machines.into_iter().next().unwrap_or_default())
    }

    /// The single match. Zero or several matches are invalid input.
    pub fn require_one(self) -> Result<WireVirtualMachine> {
        if self.virtual_machines.len() != 1 {
            return Err(Error::InvalidInput(format!(
                "expected exactly one virtual machine in group {} with name {}, found {}",
                self.group,
                self.name,
                self.virtual_machines.len()
            )));
        }
        Ok(self.virtual_machines.into_iter().next().unwrap_or_default())
    }
}
