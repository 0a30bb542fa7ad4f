//! Entity transformers: validated source records to destination rows.
//!
//! Each transformer owns one destination sheet, validates nothing (the
//! boundary already did), and is strictly additive — rows are appended,
//! never moved or deleted. The one deletion in the whole engine,
//! [`clear_placeholder_rows`], is a separate operation a caller invokes
//! explicitly before the first population of a pre-structured template.

pub mod assignment;
pub mod project;
pub mod resource;
pub mod task;

use lift_client::LoadClient;
use lift_core::errors::RecordError;
use lift_core::responses::ImportResult;
use lift_core::sheet::{Column, ColumnId, ColumnSpec, RowId, SheetId, SheetInfo, WorkspaceId};

use crate::error::{EngineError, EngineResult};
use crate::upsert::get_or_create;

/// What one transformer did to its sheet.
#[derive(Debug, Default)]
pub struct TransformOutcome {
    pub sheets_created: u32,
    pub columns_created: u32,
    pub rows_created: u32,
    pub errors: Vec<RecordError>,
    pub warnings: Vec<String>,
}

impl TransformOutcome {
    /// Fold this outcome into the run result.
    pub fn absorb_into(self, result: &mut ImportResult) {
        result.counts.sheets_created += self.sheets_created;
        result.counts.columns_created += self.columns_created;
        result.counts.rows_created += self.rows_created;
        result.errors.extend(self.errors);
        result.warnings.extend(self.warnings);
    }
}

/// Resolve a sheet by name, creating it with `columns` on miss.
pub(crate) async fn ensure_sheet(
    load: &dyn LoadClient,
    workspace_id: WorkspaceId,
    name: &str,
    columns: &[ColumnSpec],
    outcome: &mut TransformOutcome,
) -> EngineResult<SheetInfo> {
    let fetched = get_or_create(
        || load.find_sheet(workspace_id, name),
        || load.create_sheet(workspace_id, name, columns),
    )
    .await?;
    if fetched.was_created() {
        tracing::info!(sheet = name, "created sheet");
        outcome.sheets_created += 1;
        outcome.columns_created += columns.len() as u32;
    }
    Ok(fetched.into_inner())
}

/// Look up a column id by title, as a hard integrity requirement.
pub(crate) fn require_column(columns: &[Column], title: &str) -> EngineResult<ColumnId> {
    columns
        .iter()
        .find(|c| c.title == title)
        .map(|c| c.id)
        .ok_or_else(|| {
            EngineError::DataIntegrity(format!("destination sheet is missing column '{title}'"))
        })
}

/// Delete every row currently on a sheet.
///
/// Pre-structured templates sometimes ship with placeholder rows; this
/// clears them in one pass so the first population starts from an empty
/// sheet. Never called by the transformers themselves.
///
/// # Errors
///
/// Returns a connectivity error from the load client.
pub async fn clear_placeholder_rows(
    load: &dyn LoadClient,
    sheet_id: SheetId,
) -> EngineResult<u32> {
    let row_ids: Vec<RowId> = load
        .list_rows(sheet_id)
        .await?
        .iter()
        .map(|row| row.id)
        .collect();

    if !row_ids.is_empty() {
        load.delete_rows(sheet_id, &row_ids).await?;
        tracing::info!(sheet_id, cleared = row_ids.len(), "cleared placeholder rows");
    }
    Ok(row_ids.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_client::MemoryLoad;
    use lift_core::sheet::{Cell, CellValue, RowSpec};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn ensure_sheet_counts_only_fresh_creation() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let specs = [ColumnSpec::primary("Name"), ColumnSpec::date("Start")];

        let mut outcome = TransformOutcome::default();
        let first = ensure_sheet(&load, ws.id, "Tasks", &specs, &mut outcome)
            .await
            .unwrap();
        assert_eq!(outcome.sheets_created, 1);
        assert_eq!(outcome.columns_created, 2);

        let mut outcome = TransformOutcome::default();
        let second = ensure_sheet(&load, ws.id, "Tasks", &specs, &mut outcome)
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(outcome.sheets_created, 0);
        assert_eq!(outcome.columns_created, 0);
    }

    #[tokio::test]
    async fn clear_placeholder_rows_empties_the_sheet() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let sheet = load.create_sheet(ws.id, "S", &[]).await.unwrap();
        for text in ["a", "b"] {
            load.add_row(
                sheet.id,
                &RowSpec::bottom(vec![Cell {
                    column_id: 1,
                    value: CellValue::Text(text.into()),
                }]),
            )
            .await
            .unwrap();
        }

        let cleared = clear_placeholder_rows(&load, sheet.id).await.unwrap();
        assert_eq!(cleared, 2);
        assert!(load.rows_of(sheet.id).is_empty());

        // Clearing an already-empty sheet is a no-op.
        assert_eq!(clear_placeholder_rows(&load, sheet.id).await.unwrap(), 0);
    }
}
