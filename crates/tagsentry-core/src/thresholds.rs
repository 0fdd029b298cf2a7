// ---------------------------------------------------------------------------
// ThresholdSet
// ---------------------------------------------------------------------------

/// The tag names a resource must carry, split into the two severity
/// tiers. The tiers are independent obligations: a tag listed in both
/// fires in both. Immutable for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSet {
    pub critical: Vec<String>,
    pub warning: Vec<String>,
}

impl ThresholdSet {
    /// Parse the `--warning` / `--critical` comma-separated tag lists.
    /// An absent value means that tier requires nothing.
    pub fn parse(warning: Option<&str>, critical: Option<&str>) -> Self {
        Self {
            critical: split_tags(critical),
            warning: split_tags(warning),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.warning.is_empty()
    }
}

fn split_tags(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
