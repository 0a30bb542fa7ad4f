//! # lift-core
//!
//! Core types, field conversions, and error types for Planlift.
//!
//! This crate provides the foundational types shared across all Planlift
//! crates:
//! - Source record structs (raw and validated) for projects, tasks,
//!   resources, and assignments
//! - Target-side sheet/column/row/cell model
//! - Dependency type, resource family, and entity kind enums
//! - Field conversion helpers (dates, durations, percentages, priority
//!   labels, contact values)
//! - Per-record error type and migration result/report types

pub mod convert;
pub mod enums;
pub mod errors;
pub mod records;
pub mod responses;
pub mod sheet;
