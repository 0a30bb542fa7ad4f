//! Result types returned by the top-level engine operations.
//!
//! Both results always carry created/imported counts alongside the errors and
//! warnings arrays, even for runs that are overall successful — callers render
//! them as JSON or tables without re-deriving anything.

use crate::errors::RecordError;
use crate::sheet::WorkspaceInfo;
use serde::{Deserialize, Serialize};

/// Outcome of one full migration run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    /// Whether the run completed its stage sequence.
    pub success: bool,
    /// Whether load-side mutations were suppressed.
    pub dry_run: bool,
    /// Destination workspace, once container creation has happened.
    pub workspace: Option<WorkspaceInfo>,
    /// Created/imported item counts.
    pub counts: ImportCounts,
    /// Per-record errors accumulated across stages. Non-empty errors do not
    /// imply failure: rejected records leave the rest of the batch intact.
    pub errors: Vec<RecordError>,
    /// Non-fatal degradations (dropped links, clamped depths, level jumps).
    pub warnings: Vec<String>,
    /// Stage-level failure that aborted the run, when `success` is false.
    pub failure: Option<String>,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}

/// Created/imported item counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCounts {
    pub sheets_created: u32,
    pub columns_created: u32,
    pub reference_values_added: u32,
    pub rows_created: u32,
    pub tasks_imported: u32,
    pub resources_imported: u32,
    pub assignments_imported: u32,
}

/// Outcome of validating a source export without touching the target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when every record passed validation.
    pub valid: bool,
    /// Number of valid task records.
    pub tasks: usize,
    /// Number of valid resource records.
    pub resources: usize,
    /// Number of valid assignment records.
    pub assignments: usize,
    /// Per-record validation errors.
    pub errors: Vec<RecordError>,
}
