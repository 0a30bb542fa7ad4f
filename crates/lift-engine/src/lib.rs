//! # lift-engine
//!
//! The migration core of Planlift. Takes one project export from a source
//! planning system and rebuilds it as structured sheets on a target
//! worksheet platform:
//!
//! - [`validate`] — the parse-and-validate boundary, raw records to typed
//!   ones with per-record rejection
//! - [`reference`] — shared picklist value sets, hosted idempotently
//! - [`hierarchy`] — ancestor-stack placement of the flat task sequence
//! - [`dependency`] — predecessor links to row-number dependency tokens
//! - [`family`] — People/Material/Cost resource dispatch
//! - [`transform`] — per-entity transformers writing destination rows
//! - [`pipeline`] — the staged orchestrator tying it all together
//!
//! All structural writes go through [`upsert::get_or_create`], which is what
//! makes re-running a migration safe.

pub mod dependency;
pub mod error;
pub mod family;
pub mod hierarchy;
pub mod pipeline;
pub mod reference;
pub mod transform;
pub mod upsert;
pub mod validate;

pub use error::{EngineError, EngineResult};
pub use pipeline::{MigrationPipeline, NullProgress, PipelineOptions, ProgressSink, Stage};
