use crate::status::Status;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Metric names derived from the finding counts. [`FindingLedger::summary`]
/// always emits these, so explicit metrics may not reuse them.
pub const RESERVED_METRICS: &[&str] = &["OKs", "warnings", "criticals", "unknowns"];

// ---------------------------------------------------------------------------
// FindingLedger
// ---------------------------------------------------------------------------

/// Accumulator for one check run (or one per-region sub-run).
///
/// The four message sequences are append-only and keep insertion order.
/// The resolved [`Status`] is a pure function of the sequence lengths,
/// so recording a message can never lower the outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindingLedger {
    criticals: Vec<String>,
    warnings: Vec<String>,
    unknowns: Vec<String>,
    oks: Vec<String>,
    metrics: BTreeMap<String, f64>,
}

impl FindingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_critical(&mut self, message: impl Into<String>) {
        self.criticals.push(message.into());
    }

    pub fn record_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn record_unknown(&mut self, message: impl Into<String>) {
        self.unknowns.push(message.into());
    }

    pub fn record_ok(&mut self, message: impl Into<String>) {
        self.oks.push(message.into());
    }

    /// Upsert a named metric. Names listed in [`RESERVED_METRICS`] belong
    /// to the derived counters and are skipped.
    pub fn set_metric(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if RESERVED_METRICS.contains(&name.as_str()) {
            tracing::warn!(metric = %name, "ignoring metric with reserved name");
            return;
        }
        self.metrics.insert(name, value);
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn criticals(&self) -> &[String] {
        &self.criticals
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn unknowns(&self) -> &[String] {
        &self.unknowns
    }

    pub fn oks(&self) -> &[String] {
        &self.oks
    }

    /// Fold another ledger into this one. Sequences concatenate self-then-
    /// other, each side keeping its internal order; metrics sum on key
    /// collision and union otherwise. Used to fold one region's results
    /// into the running aggregate, in region-processing order.
    pub fn merge(&mut self, other: FindingLedger) {
        self.criticals.extend(other.criticals);
        self.warnings.extend(other.warnings);
        self.unknowns.extend(other.unknowns);
        self.oks.extend(other.oks);
        for (name, value) in other.metrics {
            *self.metrics.entry(name).or_insert(0.0) += value;
        }
    }

    /// Resolve the overall status. Criticals dominate everything; unknowns
    /// ("could not fully evaluate") dominate warnings so a partial
    /// evaluation is never silently downgraded. The system fails toward
    /// caution.
    pub fn status(&self) -> Status {
        if !self.criticals.is_empty() {
            Status::Critical
        } else if !self.unknowns.is_empty() {
            Status::Unknown
        } else if !self.warnings.is_empty() {
            Status::Warning
        } else {
            Status::Ok
        }
    }

    /// Explicit metrics plus the derived counters.
    pub fn summary(&self) -> BTreeMap<String, f64> {
        let mut summary = self.metrics.clone();
        summary.insert("OKs".to_string(), self.oks.len() as f64);
        summary.insert("warnings".to_string(), self.warnings.len() as f64);
        summary.insert("criticals".to_string(), self.criticals.len() as f64);
        summary.insert("unknowns".to_string(), self.unknowns.len() as f64);
        summary
    }

    /// Report lines grouped critical-first, then warnings, then unknowns,
    /// honoring within-group insertion order. OK lines are verbose-level
    /// detail and never affect the resolved status.
    pub fn report(&self, verbose: bool) -> Vec<(Status, String)> {
        let mut lines = Vec::new();
        for message in &self.criticals {
            lines.push((Status::Critical, message.clone()));
        }
        for message in &self.warnings {
            lines.push((Status::Warning, message.clone()));
        }
        for message in &self.unknowns {
            lines.push((Status::Unknown, message.clone()));
        }
        if verbose {
            for message in &self.oks {
                lines.push((Status::Ok, message.clone()));
            }
        }
        lines
    }

    /// Performance-data line in the supervisor's `|k=v, k=v` form,
    /// deterministic by metric name.
    pub fn perf_data(&self) -> String {
        let mut line = String::from("|");
        for (i, (name, value)) in self.summary().iter().enumerate() {
            if i > 0 {
                line.push_str(", ");
            }
            let _ = write!(line, "{}={}", name, format_metric(*value));
        }
        line
    }
}

/// Integral metric values print without a decimal point.
fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
