//! Dependency type, resource family, and entity kind enums.
//!
//! All enums use `snake_case` serialization via
//! `#[serde(rename_all = "snake_case")]` except [`DependencyType`], whose
//! canonical form is the two-letter uppercase token used in dependency cells.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DependencyType
// ---------------------------------------------------------------------------

/// Relationship type carried by a predecessor link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    /// Finish-to-start: successor starts after predecessor finishes.
    FS,
    /// Start-to-start: successor starts after predecessor starts.
    SS,
    /// Finish-to-finish: successor finishes after predecessor finishes.
    FF,
    /// Start-to-finish: successor finishes after predecessor starts.
    SF,
}

impl DependencyType {
    /// Return the two-letter token used in dependency cells.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FS => "FS",
            Self::SS => "SS",
            Self::FF => "FF",
            Self::SF => "SF",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a dependency type token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dependency type: {0}")]
pub struct ParseDependencyTypeError(pub String);

impl TryFrom<&str> for DependencyType {
    type Error = ParseDependencyTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FS" => Ok(Self::FS),
            "SS" => Ok(Self::SS),
            "FF" => Ok(Self::FF),
            "SF" => Ok(Self::SF),
            _ => Err(ParseDependencyTypeError(value.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// ResourceFamily
// ---------------------------------------------------------------------------

/// Mutually exclusive resource category.
///
/// Every resource maps to exactly one family. [`ResourceFamily::People`] is
/// the default for resources whose category attribute is absent or
/// unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceFamily {
    People,
    Material,
    Cost,
}

impl ResourceFamily {
    /// Return the string representation used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Material => "material",
            Self::Cost => "cost",
        }
    }

    /// All families in canonical order.
    pub const ALL: [Self; 3] = [Self::People, Self::Material, Self::Cost];
}

impl fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Source entity kind, used to attribute per-record errors and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Task,
    Resource,
    Assignment,
}

impl EntityKind {
    /// Return the string representation used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::Resource => "resource",
            Self::Assignment => "assignment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dependency_type_round_trips_through_token() {
        for ty in [
            DependencyType::FS,
            DependencyType::SS,
            DependencyType::FF,
            DependencyType::SF,
        ] {
            assert_eq!(DependencyType::try_from(ty.as_str()), Ok(ty));
        }
    }

    #[test]
    fn dependency_type_parses_lowercase_and_padded() {
        assert_eq!(DependencyType::try_from(" fs "), Ok(DependencyType::FS));
    }

    #[test]
    fn dependency_type_rejects_unknown_token() {
        let err = DependencyType::try_from("XX").unwrap_err();
        assert_eq!(err.0, "XX");
    }

    #[test]
    fn family_order_is_people_material_cost() {
        assert_eq!(
            ResourceFamily::ALL,
            [
                ResourceFamily::People,
                ResourceFamily::Material,
                ResourceFamily::Cost
            ]
        );
    }
}
