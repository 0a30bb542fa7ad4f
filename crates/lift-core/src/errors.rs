//! Cross-cutting error types for Planlift.
//!
//! Domain-specific errors (`ConfigError`, `ClientError`, `EngineError`) are
//! defined in their respective crates. This module holds the per-record error
//! shape shared by the validation boundary, the transformers, and the final
//! migration report.

use crate::enums::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A problem with one individual source record.
///
/// Record errors are aggregated, never thrown: a malformed record is rejected
/// on its own while the rest of the batch proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    /// Which entity the record belongs to.
    pub entity: EntityKind,
    /// Stable source identifier, when one could be read off the record.
    pub source_id: Option<String>,
    /// Field that failed validation.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl RecordError {
    /// Build a record error for a record whose identifier is known.
    #[must_use]
    pub fn new(
        entity: EntityKind,
        source_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            source_id: Some(source_id.into()),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a record error for a record with no usable identifier.
    #[must_use]
    pub fn anonymous(
        entity: EntityKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            source_id: None,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_id {
            Some(id) => write!(
                f,
                "{} {}: {}: {}",
                self.entity, id, self.field, self.message
            ),
            None => write!(f, "{}: {}: {}", self.entity, self.field, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_source_id_when_present() {
        let err = RecordError::new(EntityKind::Task, "42", "name", "missing required field");
        assert_eq!(err.to_string(), "task 42: name: missing required field");
    }

    #[test]
    fn display_omits_source_id_when_absent() {
        let err = RecordError::anonymous(EntityKind::Resource, "name", "missing required field");
        assert_eq!(err.to_string(), "resource: name: missing required field");
    }
}
