use crate::error::{Result, TagsentryError};
use crate::ledger::FindingLedger;
use crate::resource::ResourceDescriptor;
use crate::thresholds::ThresholdSet;

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// A per-resource compliance check. The runner drives one check over
/// every selected resource; findings accumulate in the ledger, never in
/// the error channel.
pub trait Check: std::fmt::Debug {
    /// Evaluate one resource, appending findings into the ledger.
    fn evaluate(&self, resource: &ResourceDescriptor, ledger: &mut FindingLedger);

    /// Usage guidance printed alongside configuration errors.
    fn usage(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// TagComplianceCheck
// ---------------------------------------------------------------------------

/// Verifies that a resource carries every required tag. Presence is an
/// exact string match on the tag key; the tag value is never inspected.
#[derive(Debug)]
pub struct TagComplianceCheck {
    thresholds: ThresholdSet,
}

impl TagComplianceCheck {
    pub fn new(thresholds: ThresholdSet) -> Self {
        Self { thresholds }
    }
}

impl Check for TagComplianceCheck {
    fn evaluate(&self, resource: &ResourceDescriptor, ledger: &mut FindingLedger) {
        let mut compliant = true;

        // The two tiers are independent obligations: a resource missing a
        // critical-tier tag and a warning-tier tag gets a finding in each.
        for tag in &self.thresholds.critical {
            if !resource.tags.contains_key(tag) {
                compliant = false;
                ledger.record_critical(missing_tag_message(resource, tag));
            }
        }
        for tag in &self.thresholds.warning {
            if !resource.tags.contains_key(tag) {
                compliant = false;
                ledger.record_warning(missing_tag_message(resource, tag));
            }
        }

        if compliant {
            ledger.record_ok(format!(
                "{} {} in {} carries all required tags",
                resource.kind, resource.id, resource.region
            ));
        }
    }

    fn usage(&self) -> &'static str {
        "tagcheck: --warning and --critical take comma-separated lists of required tag names; \
         pass '--resource instance,volume,snapshot' (or ALL) to limit the kinds checked"
    }
}

fn missing_tag_message(resource: &ResourceDescriptor, tag: &str) -> String {
    format!(
        "{} {} in {} is missing tag '{}'",
        resource.kind, resource.id, resource.region, tag
    )
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The closed registry of recognized checks. Dispatch is by configured
/// name; unknown names fail before any directory call.
const CHECK_NAMES: &[&str] = &["tagcheck"];

pub fn lookup_check(name: &str, thresholds: &ThresholdSet) -> Result<Box<dyn Check>> {
    match name {
        "tagcheck" => Ok(Box::new(TagComplianceCheck::new(thresholds.clone()))),
        other => Err(TagsentryError::UnknownCheck(other.to_string())),
    }
}

pub fn known_checks() -> &'static [&'static str] {
    CHECK_NAMES
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
