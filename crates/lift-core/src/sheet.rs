//! Target-side model: workspaces, sheets, columns, rows, and cells.
//!
//! These types shape every request the engine hands to the load collaborator.
//! A [`ColumnSpec`] may constrain its input domain with picklist options
//! (values of a reference value set) or source selectable values from another
//! sheet's column via a [`SourceLink`]. Within one sheet, column titles are
//! unique — the load layer upserts columns by title.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workspace identifier on the target platform.
pub type WorkspaceId = u64;
/// Sheet identifier on the target platform.
pub type SheetId = u64;
/// Column identifier on the target platform.
pub type ColumnId = u64;
/// Row identifier on the target platform.
pub type RowId = u64;

/// A destination workspace grouping sheets for one migrated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub id: WorkspaceId,
    pub name: String,
}

/// A destination sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    pub id: SheetId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Typed destination column kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Date,
    Checkbox,
    /// Single-select from a fixed option list.
    Picklist,
    /// Multi-select from a fixed option list or a cross-sheet source.
    MultiPicklist,
    /// Single contact.
    ContactList,
    /// Multi-select contacts, optionally sourced from another sheet.
    MultiContactList,
}

impl ColumnKind {
    /// Return the wire representation used in column requests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Picklist => "picklist",
            Self::MultiPicklist => "multi_picklist",
            Self::ContactList => "contact_list",
            Self::MultiContactList => "multi_contact_list",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-sheet source for a multi-valued column's selectable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub sheet_id: SheetId,
    pub column_id: ColumnId,
}

/// Specification for creating or reconfiguring one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub title: String,
    pub kind: ColumnKind,
    /// Fixed option list (picklist kinds only). Typically the values of a
    /// reference value set.
    #[serde(default)]
    pub options: Vec<String>,
    /// Selectable values sourced from another sheet's column.
    #[serde(default)]
    pub source_link: Option<SourceLink>,
    /// Whether this is the sheet's primary column.
    #[serde(default)]
    pub primary: bool,
}

impl ColumnSpec {
    /// A plain text column.
    #[must_use]
    pub fn text(title: impl Into<String>) -> Self {
        Self::plain(title, ColumnKind::Text)
    }

    /// The sheet's primary (text) column.
    #[must_use]
    pub fn primary(title: impl Into<String>) -> Self {
        Self {
            primary: true,
            ..Self::plain(title, ColumnKind::Text)
        }
    }

    /// A date column.
    #[must_use]
    pub fn date(title: impl Into<String>) -> Self {
        Self::plain(title, ColumnKind::Date)
    }

    /// A checkbox column.
    #[must_use]
    pub fn checkbox(title: impl Into<String>) -> Self {
        Self::plain(title, ColumnKind::Checkbox)
    }

    /// A single contact column.
    #[must_use]
    pub fn contact(title: impl Into<String>) -> Self {
        Self::plain(title, ColumnKind::ContactList)
    }

    /// A single-select picklist constrained to `options`.
    #[must_use]
    pub fn picklist(title: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            options,
            ..Self::plain(title, ColumnKind::Picklist)
        }
    }

    /// A multi-valued column whose selectable values come from another
    /// sheet's column.
    #[must_use]
    pub fn sourced(title: impl Into<String>, kind: ColumnKind, link: SourceLink) -> Self {
        Self {
            source_link: Some(link),
            ..Self::plain(title, kind)
        }
    }

    fn plain(title: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            title: title.into(),
            kind,
            options: Vec::new(),
            source_link: None,
            primary: false,
        }
    }
}

/// A column as it exists on the target platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub kind: ColumnKind,
}

// ---------------------------------------------------------------------------
// Rows and cells
// ---------------------------------------------------------------------------

/// Addressable identity: display name plus optional address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactValue {
    pub name: String,
    pub email: Option<String>,
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Date(NaiveDate),
    Number(f64),
    Checkbox(bool),
    Contact(ContactValue),
    /// Multi-valued text cell (multi-picklist columns).
    TextList(Vec<String>),
    /// Multi-valued contact cell (multi-contact columns).
    ContactList(Vec<ContactValue>),
}

impl CellValue {
    /// Text content of the cell, when it has a single textual rendering.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Contact(contact) => Some(&contact.name),
            _ => None,
        }
    }
}

/// One cell within a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub column_id: ColumnId,
    pub value: CellValue,
}

/// Where a new row lands in the destination sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPlacement {
    /// Appended at the end of the top level.
    Bottom,
    /// Appended under an existing parent row, indented one level deeper.
    Child { parent_row_id: RowId },
}

/// Specification for creating one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    pub cells: Vec<Cell>,
    pub placement: RowPlacement,
}

impl RowSpec {
    /// A row appended at the bottom of the sheet's top level.
    #[must_use]
    pub fn bottom(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            placement: RowPlacement::Bottom,
        }
    }

    /// A row appended under `parent_row_id`.
    #[must_use]
    pub fn child_of(parent_row_id: RowId, cells: Vec<Cell>) -> Self {
        Self {
            cells,
            placement: RowPlacement::Child { parent_row_id },
        }
    }
}

/// A row as it exists on the target platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowInfo {
    pub id: RowId,
    /// 1-based position within the sheet.
    pub row_number: u32,
    pub cells: Vec<Cell>,
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Derive a deterministic, sanitized workspace name from a project name.
///
/// Collapses whitespace runs to single spaces, strips characters the platform
/// rejects in container names, and truncates to 50 characters. The same
/// project name always yields the same workspace name, which is what makes
/// workspace lookup-by-name on re-runs stable.
#[must_use]
pub fn sanitize_container_name(project_name: &str) -> String {
    let cleaned: String = project_name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_strips_reserved_characters() {
        assert_eq!(
            sanitize_container_name("Q3: Rollout / Phase* 2"),
            "Q3 Rollout Phase 2"
        );
    }

    #[test]
    fn sanitize_collapses_whitespace() {
        assert_eq!(sanitize_container_name("  Alpha   Build  "), "Alpha Build");
    }

    #[test]
    fn sanitize_truncates_long_names() {
        let long = "x".repeat(80);
        assert_eq!(sanitize_container_name(&long).len(), 50);
    }

    #[test]
    fn sanitize_is_deterministic() {
        let a = sanitize_container_name("Website Redesign");
        let b = sanitize_container_name("Website Redesign");
        assert_eq!(a, b);
    }

    #[test]
    fn column_spec_builders_set_kind() {
        assert_eq!(ColumnSpec::date("Start").kind, ColumnKind::Date);
        assert!(ColumnSpec::primary("Name").primary);
        let pick = ColumnSpec::picklist("Priority", vec!["Low".into(), "High".into()]);
        assert_eq!(pick.kind, ColumnKind::Picklist);
        assert_eq!(pick.options.len(), 2);
    }
}
