use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Check outcome, declared in ascending severity order so the derived
/// `Ord` matches the resolution rule: a critical finding outranks an
/// unknown one, and an unknown finding outranks a warning.
///
/// Note the severity order is not the exit-code order (`Unknown` exits
/// with 3 but sits below `Critical`), so the wire value lives in
/// [`Status::exit_code`] rather than in the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Warning,
    Unknown,
    Critical,
}

impl Status {
    /// Process exit code consumed by the monitoring supervisor.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
