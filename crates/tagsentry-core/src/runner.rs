use crate::check::lookup_check;
use crate::directory::ResourceDirectory;
use crate::error::{Result, TagsentryError};
use crate::ledger::FindingLedger;
use crate::resource::select_kinds;
use crate::thresholds::ThresholdSet;
use std::collections::BTreeMap;

/// Region selector meaning "every region the directory lists".
pub const ALL_REGIONS: &str = "ALL";

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// Validated configuration for one check run, as produced by the
/// configuration source (the CLI). Immutable once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the check to run, resolved against the closed registry.
    pub check: String,
    /// Comma-separated warning-tier tag list, absent for none.
    pub warning: Option<String>,
    /// Comma-separated critical-tier tag list, absent for none.
    pub critical: Option<String>,
    /// A single region name, or [`ALL_REGIONS`].
    pub region: String,
    /// Open-ended check options; `resource` selects the kinds checked.
    pub options: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Drive one check run: resolve configuration, walk every selected kind
/// in every target region, and merge per-region ledgers into the
/// aggregate in region order.
///
/// Configuration is resolved in full before the first resource listing,
/// so a bad kind or check name never costs a directory round trip. A
/// directory failure aborts the in-progress region immediately; there is
/// no retry and no partial-credit reporting.
///
/// Zero target regions or zero matching resources is not an error: the
/// empty aggregate resolves to OK, since absence of findings is absence
/// of evidence of non-compliance.
pub fn run_check(directory: &dyn ResourceDirectory, config: &RunConfig) -> Result<FindingLedger> {
    let thresholds = ThresholdSet::parse(config.warning.as_deref(), config.critical.as_deref());
    let kinds = select_kinds(config.options.get("resource").map(String::as_str))?;
    let check = lookup_check(&config.check, &thresholds)?;
    let regions = resolve_regions(directory, &config.region)?;
    tracing::debug!(check = %config.check, ?kinds, ?regions, "configuration resolved");

    let mut aggregate = FindingLedger::new();
    for region in &regions {
        let mut regional = FindingLedger::new();
        let mut resources_seen = 0usize;
        for kind in &kinds {
            let resources = directory.list_resources(*kind, region)?;
            resources_seen += resources.len();
            for resource in &resources {
                check.evaluate(resource, &mut regional);
            }
        }
        regional.set_metric("resources", resources_seen as f64);
        tracing::debug!(%region, resources = resources_seen, status = %regional.status(), "region evaluated");
        aggregate.merge(regional);
    }

    Ok(aggregate)
}

/// Expand the region selector into the list of regions to evaluate, in
/// the order the directory produced them. Regions the directory withholds
/// from its listing may still be named explicitly; whether any region is
/// withheld is the directory's policy, not ours.
fn resolve_regions(directory: &dyn ResourceDirectory, selector: &str) -> Result<Vec<String>> {
    if selector == ALL_REGIONS {
        return directory.list_regions();
    }
    if directory.has_region(selector)? {
        Ok(vec![selector.to_string()])
    } else {
        Err(TagsentryError::UnknownRegion(selector.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
