//! Source record types: raw extraction payloads and validated records.
//!
//! The extraction collaborator hands back *raw* records — loosely typed, every
//! field optional, mirroring the source system's export. Raw records cross the
//! parse-and-validate boundary exactly once (in `lift-engine::validate`) and
//! become the fully typed records the transformers consume. Malformed records
//! are rejected individually at that boundary; nothing downstream re-checks
//! field presence.

use crate::enums::DependencyType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw records (extraction payload)
// ---------------------------------------------------------------------------

/// One project export fetched from the source system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Project-level record.
    pub project: RawProject,
    /// Flat, depth-annotated task sequence in source document order.
    #[serde(default)]
    pub tasks: Vec<RawTask>,
    /// Resource pool records.
    #[serde(default)]
    pub resources: Vec<RawResource>,
    /// Task-resource assignment records.
    #[serde(default)]
    pub assignments: Vec<RawAssignment>,
}

/// Raw project-level record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub finish: Option<DateTime<Utc>>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
}

/// Raw task record with its depth indicator and predecessor links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTask {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Nesting depth, 1 = top level.
    pub outline_level: Option<u32>,
    pub start: Option<DateTime<Utc>>,
    pub finish: Option<DateTime<Utc>>,
    /// Scheduled duration in hours.
    pub duration_hours: Option<f64>,
    /// Planned effort in hours.
    pub work_hours: Option<f64>,
    /// Completion ratio in `[0, 1]`.
    pub percent_complete: Option<f64>,
    /// Source priority on the fixed 0-1000 scale.
    pub priority: Option<i64>,
    pub milestone: Option<bool>,
    pub notes: Option<String>,
    #[serde(default)]
    pub predecessors: Vec<RawPredecessor>,
}

/// Raw predecessor link on a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPredecessor {
    pub predecessor_id: Option<String>,
    /// Two-letter link type token (`FS`, `SS`, `FF`, `SF`).
    pub link_type: Option<String>,
    /// Lag in days; negative values are leads.
    pub lag_days: Option<i64>,
}

/// Raw resource pool record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Source category tag deciding the resource family.
    pub category: Option<String>,
}

/// Raw assignment record linking a task to a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAssignment {
    pub task_id: Option<String>,
    pub resource_id: Option<String>,
    /// Allocation ratio, 1.0 = full time.
    pub units: Option<f64>,
    pub work_hours: Option<f64>,
}

// ---------------------------------------------------------------------------
// Validated records (post-boundary)
// ---------------------------------------------------------------------------

/// Validated project record.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProject {
    pub id: String,
    pub name: String,
    pub start: Option<DateTime<Utc>>,
    pub finish: Option<DateTime<Utc>>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
}

/// Validated task record.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTask {
    pub id: String,
    pub name: String,
    /// Nesting depth, 1 = top level. Guaranteed >= 1.
    pub outline_level: u32,
    pub start: Option<DateTime<Utc>>,
    pub finish: Option<DateTime<Utc>>,
    pub duration_hours: Option<f64>,
    pub work_hours: Option<f64>,
    pub percent_complete: Option<f64>,
    pub priority: Option<i64>,
    pub milestone: bool,
    pub notes: Option<String>,
    pub predecessors: Vec<PredecessorLink>,
}

/// Validated predecessor link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredecessorLink {
    pub predecessor_id: String,
    pub link_type: DependencyType,
    pub lag_days: i64,
}

/// Validated resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResource {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub category: Option<String>,
}

/// Validated assignment record.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAssignment {
    pub task_id: String,
    pub resource_id: String,
    pub units: Option<f64>,
    pub work_hours: Option<f64>,
}
