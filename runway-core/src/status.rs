//! Outcome of a pipeline run, reported as data rather than as an error

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Computation ran and produced output
    #[serde(rename = "complete")]
    Complete,
    /// Input had fewer than two rows; nothing computed
    #[serde(rename = "empty")]
    Empty,
    /// A required aggregate row was missing; nothing computed
    #[serde(rename = "incomplete")]
    Incomplete,
    /// Computation was skipped because its result would be trivial
    #[serde(rename = "degenerate")]
    Degenerate,
}

impl Status {
    pub fn is_complete(&self) -> bool {
        matches!(self, Status::Complete)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Status::Complete => "computed",
            Status::Empty => "input has no data rows",
            Status::Incomplete => "required total rows are missing",
            Status::Degenerate => "nothing to project",
        }
    }
}
