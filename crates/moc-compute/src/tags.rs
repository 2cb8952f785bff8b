//! Conversion between domain tag maps and the agent's tag list.

use cloudagent_api::{Tag, Tags as WireTags};

use crate::types::Tags;

/// Every wire tag becomes a `Some` entry; a missing tag list yields an empty map.
pub fn from_wire(tags: Option<&WireTags>) -> Tags {
    tags.map(|t| {
        t.tags
            .iter()
            .map(|tag| (tag.key.clone(), Some(tag.value.clone())))
            .collect()
    })
    .unwrap_or_default()
}

/// `None` values travel as empty strings. Output is ordered by key.
pub fn to_wire(tags: &Tags) -> WireTags {
    WireTags {
        tags: tags
            .iter()
            .map(|(key, value)| Tag {
                key: key.clone(),
                value: value.clone().unwrap_or_default(),
            })
            .collect(),
    }
}
