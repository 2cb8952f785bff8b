//! In-process filtering of VM listings.
//!
//! The listing is serialized to JSON, the JMESPath expression is applied to
//! it, and the result is parsed back into VMs. An expression whose result
//! is not a list of VMs is a query failure.

use crate::types::VirtualMachine;
use crate::{Error, Result};

pub fn filter(listing: Vec<VirtualMachine>, query: &str) -> Result<Vec<VirtualMachine>> {
    if query.trim().is_empty() {
        return Ok(listing);
    }

    let expression = jmespath::compile(query)
        .map_err(|e| Error::Query(format!("invalid expression {query:?}: {e}")))?;

    let serialized = serde_json::to_value(&listing).map_err(|e| Error::Query(e.to_string()))?;
    let result = expression
        .search(serialized)
        .map_err(|e| Error::Query(e.to_string()))?;

    let filtered = serde_json::to_vec(&*result).map_err(|e| Error::Query(e.to_string()))?;
    serde_json::from_slice(&filtered)
        .map_err(|e| Error::Query(format!("result is not a virtual machine list: {e}")))
}
