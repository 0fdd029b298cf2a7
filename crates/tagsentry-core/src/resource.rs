use crate::error::{Result, TagsentryError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// The fixed universe of checkable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Instance,
    Volume,
    Snapshot,
}

impl ResourceKind {
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Instance,
            ResourceKind::Volume,
            ResourceKind::Snapshot,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Instance => "instance",
            ResourceKind::Volume => "volume",
            ResourceKind::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = TagsentryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "instance" => Ok(ResourceKind::Instance),
            "volume" => Ok(ResourceKind::Volume),
            "snapshot" => Ok(ResourceKind::Snapshot),
            other => Err(TagsentryError::InvalidResourceKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Kind selection
// ---------------------------------------------------------------------------

/// Validate the `resource` option against the kind universe.
///
/// Absent means "check everything", as does the literal `ALL`
/// (case-insensitive). Otherwise the value is a comma-separated list of
/// exact kind names; any unrecognized element fails the whole selection,
/// partial acceptance is not allowed. The result is deduplicated and
/// returned in universe order.
pub fn select_kinds(requested: Option<&str>) -> Result<Vec<ResourceKind>> {
    let requested = match requested {
        None => return Ok(ResourceKind::all().to_vec()),
        Some(r) => r,
    };
    if requested.eq_ignore_ascii_case("ALL") {
        return Ok(ResourceKind::all().to_vec());
    }

    let mut selected = Vec::new();
    for element in requested.split(',') {
        selected.push(element.parse::<ResourceKind>()?);
    }
    Ok(ResourceKind::all()
        .iter()
        .copied()
        .filter(|kind| selected.contains(kind))
        .collect())
}

// ---------------------------------------------------------------------------
// ResourceDescriptor
// ---------------------------------------------------------------------------

/// A single resource as reported by the resource directory. Consumed
/// read-only; never retained past its own evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub id: String,
    pub kind: ResourceKind,
    pub region: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
