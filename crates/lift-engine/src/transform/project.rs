//! Project summary transformer: one sheet, one row of project-level fields.

use lift_client::LoadClient;
use lift_core::convert::{contact_value, date_only};
use lift_core::records::SourceProject;
use lift_core::sheet::{Cell, CellValue, ColumnSpec, RowSpec, SheetInfo, WorkspaceId};

use super::{TransformOutcome, ensure_sheet, require_column};
use crate::error::EngineResult;

/// Name of the summary sheet.
pub const SUMMARY_SHEET: &str = "Project Summary";

pub const NAME_COLUMN: &str = "Project Name";
pub const START_COLUMN: &str = "Start Date";
pub const FINISH_COLUMN: &str = "Finish Date";
pub const MANAGER_COLUMN: &str = "Manager";

/// Result of the summary import.
#[derive(Debug)]
pub struct SummaryImport {
    pub sheet: SheetInfo,
    pub outcome: TransformOutcome,
}

fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::primary(NAME_COLUMN),
        ColumnSpec::date(START_COLUMN),
        ColumnSpec::date(FINISH_COLUMN),
        ColumnSpec::contact(MANAGER_COLUMN),
    ]
}

/// Ensure the summary sheet and its single project row.
///
/// On re-runs the row is matched by project name and left untouched.
///
/// # Errors
///
/// Returns a connectivity error from the load client, or a data-integrity
/// error when an existing sheet is missing expected columns.
pub async fn import_summary(
    load: &dyn LoadClient,
    workspace_id: WorkspaceId,
    project: &SourceProject,
) -> EngineResult<SummaryImport> {
    let mut outcome = TransformOutcome::default();
    let sheet = ensure_sheet(load, workspace_id, SUMMARY_SHEET, &column_specs(), &mut outcome)
        .await?;

    let columns = load.list_columns(sheet.id).await?;
    let name_col = require_column(&columns, NAME_COLUMN)?;
    let start_col = require_column(&columns, START_COLUMN)?;
    let finish_col = require_column(&columns, FINISH_COLUMN)?;
    let manager_col = require_column(&columns, MANAGER_COLUMN)?;

    let already_present = load.list_rows(sheet.id).await?.iter().any(|row| {
        row.cells
            .iter()
            .any(|c| c.column_id == name_col && c.value.as_text() == Some(project.name.as_str()))
    });

    if !already_present {
        let mut cells = vec![Cell {
            column_id: name_col,
            value: CellValue::Text(project.name.clone()),
        }];
        if let Some(start) = project.start {
            cells.push(Cell {
                column_id: start_col,
                value: CellValue::Date(date_only(start)),
            });
        }
        if let Some(finish) = project.finish {
            cells.push(Cell {
                column_id: finish_col,
                value: CellValue::Date(date_only(finish)),
            });
        }
        if let Some(manager) = &project.manager_name {
            cells.push(Cell {
                column_id: manager_col,
                value: contact_value(manager, project.manager_email.as_deref()),
            });
        }

        load.add_row(sheet.id, &RowSpec::bottom(cells)).await?;
        outcome.rows_created += 1;
    }

    Ok(SummaryImport { sheet, outcome })
}
