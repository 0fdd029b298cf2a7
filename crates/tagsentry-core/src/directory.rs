use crate::error::{Result, TagsentryError};
use crate::resource::{ResourceDescriptor, ResourceKind};
use serde::Deserialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// ResourceDirectory
// ---------------------------------------------------------------------------

/// Access to the cloud provider's resource listings. Implementations own
/// authentication, transport, and any retry policy; the check runner
/// treats every call as a bounded, blocking round trip and surfaces
/// failures as-is.
pub trait ResourceDirectory {
    /// The regions available for an "ALL" run, in provider order. The
    /// provider may withhold regions it considers not yet public.
    fn list_regions(&self) -> Result<Vec<String>>;

    /// The resources of one kind in one region.
    fn list_resources(&self, kind: ResourceKind, region: &str) -> Result<Vec<ResourceDescriptor>>;

    /// Whether a region may be named explicitly. Covers regions withheld
    /// from [`list_regions`](Self::list_regions).
    fn has_region(&self, name: &str) -> Result<bool> {
        Ok(self.list_regions()?.iter().any(|r| r == name))
    }
}

// ---------------------------------------------------------------------------
// InventoryDirectory
// ---------------------------------------------------------------------------

/// A directory backed by a JSON inventory document. This is the bundled
/// implementation; a live provider client plugs in behind the same trait.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryDirectory {
    regions: Vec<String>,
    /// Regions that exist but are withheld from the "ALL" listing. They
    /// may still be named explicitly.
    #[serde(default)]
    restricted_regions: Vec<String>,
    #[serde(default)]
    resources: Vec<ResourceDescriptor>,
}

impl InventoryDirectory {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TagsentryError::DirectoryUnavailable(format!(
                "cannot read inventory {}: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            TagsentryError::DirectoryUnavailable(format!(
                "malformed inventory {}: {e}",
                path.display()
            ))
        })
    }
}

impl ResourceDirectory for InventoryDirectory {
    fn list_regions(&self) -> Result<Vec<String>> {
        Ok(self.regions.clone())
    }

    fn list_resources(&self, kind: ResourceKind, region: &str) -> Result<Vec<ResourceDescriptor>> {
        Ok(self
            .resources
            .iter()
            .filter(|r| r.kind == kind && r.region == region)
            .cloned()
            .collect())
    }

    fn has_region(&self, name: &str) -> Result<bool> {
        Ok(self.regions.iter().any(|r| r == name)
            || self.restricted_regions.iter().any(|r| r == name))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
