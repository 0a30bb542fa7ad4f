//! Task transformer: flat depth-annotated tasks to a hierarchical sheet.
//!
//! Two passes, as the dependency cells demand. First the hierarchy builder
//! assigns every task its placement and the row map fixes row numbers
//! (1-based insertion order — children follow their parents contiguously, so
//! insertion order and sheet order agree). Only then are rows rendered,
//! dependency tokens included, and inserted one by one so each child can name
//! its parent's fresh row id.

use lift_client::LoadClient;
use lift_core::convert::{
    date_only, hours_to_day_count, hours_to_effort, priority_label, ratio_to_percent,
};
use lift_core::records::SourceTask;
use lift_core::sheet::{
    Cell, CellValue, ColumnId, ColumnSpec, RowId, RowSpec, SheetInfo, WorkspaceId,
};
use std::collections::HashMap;

use super::{TransformOutcome, ensure_sheet, require_column};
use crate::error::{EngineError, EngineResult};
use crate::reference::STATUS_VALUES;
use crate::{dependency, hierarchy};

/// Name of the task sheet.
pub const TASK_SHEET: &str = "Tasks";

pub const NAME_COLUMN: &str = "Task Name";
pub const START_COLUMN: &str = "Start Date";
pub const FINISH_COLUMN: &str = "Finish Date";
pub const DURATION_COLUMN: &str = "Duration";
pub const EFFORT_COLUMN: &str = "Effort";
pub const PERCENT_COLUMN: &str = "% Complete";
pub const STATUS_COLUMN: &str = "Status";
pub const PRIORITY_COLUMN: &str = "Priority";
pub const PREDECESSORS_COLUMN: &str = "Predecessors";
pub const MILESTONE_COLUMN: &str = "Milestone";
pub const NOTES_COLUMN: &str = "Notes";

/// Resolved column ids of the task sheet.
#[derive(Debug, Clone, Copy)]
pub struct TaskColumns {
    pub name: ColumnId,
    pub start: ColumnId,
    pub finish: ColumnId,
    pub duration: ColumnId,
    pub effort: ColumnId,
    pub percent: ColumnId,
    pub status: ColumnId,
    pub priority: ColumnId,
    pub predecessors: ColumnId,
    pub milestone: ColumnId,
    pub notes: ColumnId,
}

/// Result of the task import.
#[derive(Debug)]
pub struct TaskImport {
    pub sheet: SheetInfo,
    pub columns: TaskColumns,
    /// Destination row of each task, by source task id. Populated for
    /// reused rows too, so assignment configuration works on re-runs.
    pub row_ids: HashMap<String, RowId>,
    pub tasks_imported: u32,
    pub outcome: TransformOutcome,
}

fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::primary(NAME_COLUMN),
        ColumnSpec::date(START_COLUMN),
        ColumnSpec::date(FINISH_COLUMN),
        ColumnSpec::text(DURATION_COLUMN),
        ColumnSpec::text(EFFORT_COLUMN),
        ColumnSpec::text(PERCENT_COLUMN),
        // Options come later from the reference sets, once they exist.
        ColumnSpec::picklist(STATUS_COLUMN, Vec::new()),
        ColumnSpec::picklist(PRIORITY_COLUMN, Vec::new()),
        ColumnSpec::text(PREDECESSORS_COLUMN),
        ColumnSpec::checkbox(MILESTONE_COLUMN),
        ColumnSpec::text(NOTES_COLUMN),
    ]
}

/// Status derived from the completion ratio.
fn status_label(percent_complete: Option<f64>) -> &'static str {
    match percent_complete {
        Some(p) if p >= 1.0 => STATUS_VALUES[2],
        Some(p) if p > 0.0 => STATUS_VALUES[1],
        _ => STATUS_VALUES[0],
    }
}

fn render_cells(
    task: &SourceTask,
    columns: TaskColumns,
    dependency_cell: Option<String>,
    hours_per_day: f64,
) -> Vec<Cell> {
    let mut cells = vec![
        Cell {
            column_id: columns.name,
            value: CellValue::Text(task.name.clone()),
        },
        Cell {
            column_id: columns.status,
            value: CellValue::Text(status_label(task.percent_complete).to_owned()),
        },
    ];

    if let Some(start) = task.start {
        cells.push(Cell {
            column_id: columns.start,
            value: CellValue::Date(date_only(start)),
        });
    }
    if let Some(finish) = task.finish {
        cells.push(Cell {
            column_id: columns.finish,
            value: CellValue::Date(date_only(finish)),
        });
    }
    if let Some(hours) = task.duration_hours {
        cells.push(Cell {
            column_id: columns.duration,
            value: CellValue::Text(hours_to_day_count(hours, hours_per_day)),
        });
    }
    if let Some(hours) = task.work_hours {
        cells.push(Cell {
            column_id: columns.effort,
            value: CellValue::Text(hours_to_effort(hours)),
        });
    }
    if let Some(ratio) = task.percent_complete {
        cells.push(Cell {
            column_id: columns.percent,
            value: CellValue::Text(ratio_to_percent(ratio)),
        });
    }
    if let Some(priority) = task.priority {
        cells.push(Cell {
            column_id: columns.priority,
            value: CellValue::Text(priority_label(priority).to_owned()),
        });
    }
    if let Some(tokens) = dependency_cell {
        cells.push(Cell {
            column_id: columns.predecessors,
            value: CellValue::Text(tokens),
        });
    }
    if task.milestone {
        cells.push(Cell {
            column_id: columns.milestone,
            value: CellValue::Checkbox(true),
        });
    }
    if let Some(notes) = &task.notes {
        cells.push(Cell {
            column_id: columns.notes,
            value: CellValue::Text(notes.clone()),
        });
    }

    cells
}

/// Import the task sequence into the task sheet.
///
/// On re-runs, rows are matched by task name and reused; only tasks without
/// a matching row are inserted.
///
/// # Errors
///
/// Returns a connectivity error from the load client, or a data-integrity
/// error when an existing sheet is missing expected columns.
pub async fn import_tasks(
    load: &dyn LoadClient,
    workspace_id: WorkspaceId,
    tasks: &[SourceTask],
    hours_per_day: f64,
    max_indent: u32,
) -> EngineResult<TaskImport> {
    let mut outcome = TransformOutcome::default();
    let sheet = ensure_sheet(load, workspace_id, TASK_SHEET, &column_specs(), &mut outcome).await?;

    let listed = load.list_columns(sheet.id).await?;
    let columns = TaskColumns {
        name: require_column(&listed, NAME_COLUMN)?,
        start: require_column(&listed, START_COLUMN)?,
        finish: require_column(&listed, FINISH_COLUMN)?,
        duration: require_column(&listed, DURATION_COLUMN)?,
        effort: require_column(&listed, EFFORT_COLUMN)?,
        percent: require_column(&listed, PERCENT_COLUMN)?,
        status: require_column(&listed, STATUS_COLUMN)?,
        priority: require_column(&listed, PRIORITY_COLUMN)?,
        predecessors: require_column(&listed, PREDECESSORS_COLUMN)?,
        milestone: require_column(&listed, MILESTONE_COLUMN)?,
        notes: require_column(&listed, NOTES_COLUMN)?,
    };

    // Pass one: placements and row numbers for the whole sequence.
    let levels: Vec<u32> = tasks.iter().map(|t| t.outline_level).collect();
    let plan = hierarchy::build(&levels, max_indent);
    outcome.warnings.extend(plan.warnings);
    let row_map = dependency::build_row_map(tasks.iter().map(|t| t.id.as_str()));

    let existing_by_name: HashMap<String, RowId> = load
        .list_rows(sheet.id)
        .await?
        .iter()
        .filter_map(|row| {
            row.cells
                .iter()
                .find(|c| c.column_id == columns.name)
                .and_then(|c| c.value.as_text())
                .map(|name| (name.to_owned(), row.id))
        })
        .collect();

    // Pass two: render and insert, parents strictly before children.
    let mut row_ids: HashMap<String, RowId> = HashMap::with_capacity(tasks.len());
    let mut tasks_imported = 0;
    for (index, task) in tasks.iter().enumerate() {
        let (dependency_cell, link_warnings) =
            dependency::render_tokens(&task.id, &task.predecessors, &row_map);
        outcome.warnings.extend(link_warnings);

        if let Some(&existing) = existing_by_name.get(&task.name) {
            row_ids.insert(task.id.clone(), existing);
            continue;
        }

        let cells = render_cells(task, columns, dependency_cell, hours_per_day);
        let spec = match plan.placements[index] {
            hierarchy::Placement::Root => RowSpec::bottom(cells),
            hierarchy::Placement::Child { parent_index, .. } => {
                let parent_id = &tasks[parent_index].id;
                let parent_row = row_ids.get(parent_id).copied().ok_or_else(|| {
                    EngineError::DataIntegrity(format!(
                        "task {}: parent task {parent_id} has no destination row",
                        task.id
                    ))
                })?;
                RowSpec::child_of(parent_row, cells)
            }
        };

        let row_id = load.add_row(sheet.id, &spec).await?;
        row_ids.insert(task.id.clone(), row_id);
        outcome.rows_created += 1;
        tasks_imported += 1;
    }

    tracing::info!(imported = tasks_imported, total = tasks.len(), "task import finished");

    Ok(TaskImport {
        sheet,
        columns,
        row_ids,
        tasks_imported,
        outcome,
    })
}

/// Apply reference-set options to the status and priority picklists.
///
/// Runs as its own stage once the reference sets exist; column ids are
/// stable by then. Titles and kinds stay untouched.
///
/// # Errors
///
/// Returns a connectivity error from the load client.
pub async fn configure_task_columns(
    load: &dyn LoadClient,
    import: &TaskImport,
    status_values: Vec<String>,
    priority_values: Vec<String>,
) -> EngineResult<()> {
    load.update_column(
        import.sheet.id,
        import.columns.status,
        &ColumnSpec::picklist(STATUS_COLUMN, status_values),
    )
    .await?;
    load.update_column(
        import.sheet.id,
        import.columns.priority,
        &ColumnSpec::picklist(PRIORITY_COLUMN, priority_values),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lift_client::MemoryLoad;
    use lift_core::enums::DependencyType;
    use lift_core::records::PredecessorLink;
    use pretty_assertions::assert_eq;

    const HOURS_PER_DAY: f64 = 8.0;
    const MAX_INDENT: u32 = 10;

    fn task(id: &str, name: &str, level: u32) -> SourceTask {
        SourceTask {
            id: id.into(),
            name: name.into(),
            outline_level: level,
            start: None,
            finish: None,
            duration_hours: None,
            work_hours: None,
            percent_complete: None,
            priority: None,
            milestone: false,
            notes: None,
            predecessors: Vec::new(),
        }
    }

    fn cell_text(load: &MemoryLoad, sheet: u64, row: RowId, column: ColumnId) -> Option<String> {
        load.rows_of(sheet)
            .iter()
            .find(|r| r.id == row)
            .and_then(|r| r.cells.iter().find(|c| c.column_id == column))
            .and_then(|c| c.value.as_text().map(str::to_owned))
    }

    #[tokio::test]
    async fn hierarchy_lands_as_nested_rows() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let tasks = vec![
            task("t1", "Phase One", 1),
            task("t2", "Design", 2),
            task("t3", "Build", 2),
            task("t4", "Phase Two", 1),
        ];

        let import = import_tasks(&load, ws.id, &tasks, HOURS_PER_DAY, MAX_INDENT)
            .await
            .unwrap();

        assert_eq!(import.tasks_imported, 4);
        assert_eq!(load.indent_of(import.sheet.id, import.row_ids["t1"]), 0);
        assert_eq!(load.indent_of(import.sheet.id, import.row_ids["t2"]), 1);
        assert_eq!(load.indent_of(import.sheet.id, import.row_ids["t3"]), 1);
        assert_eq!(load.indent_of(import.sheet.id, import.row_ids["t4"]), 0);
    }

    #[tokio::test]
    async fn dependency_cell_uses_final_row_numbers() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let mut dependent = task("t3", "Launch", 1);
        dependent.predecessors = vec![PredecessorLink {
            predecessor_id: "t2".into(),
            link_type: DependencyType::FS,
            lag_days: 2,
        }];
        let tasks = vec![task("t1", "Design", 1), task("t2", "Build", 1), dependent];

        let import = import_tasks(&load, ws.id, &tasks, HOURS_PER_DAY, MAX_INDENT)
            .await
            .unwrap();

        assert_eq!(
            cell_text(
                &load,
                import.sheet.id,
                import.row_ids["t3"],
                import.columns.predecessors
            )
            .as_deref(),
            Some("2FS+2d")
        );
    }

    #[tokio::test]
    async fn field_conversions_apply_per_cell() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let mut t = task("t1", "Kickoff", 1);
        t.start = Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        t.duration_hours = Some(20.0);
        t.work_hours = Some(12.0);
        t.percent_complete = Some(0.5);
        t.priority = Some(950);
        t.milestone = true;

        let import = import_tasks(&load, ws.id, &[t], HOURS_PER_DAY, MAX_INDENT)
            .await
            .unwrap();
        let row = import.row_ids["t1"];

        let get = |col| cell_text(&load, import.sheet.id, row, col);
        assert_eq!(get(import.columns.duration).as_deref(), Some("2.5d"));
        assert_eq!(get(import.columns.effort).as_deref(), Some("12h"));
        assert_eq!(get(import.columns.percent).as_deref(), Some("50%"));
        assert_eq!(get(import.columns.priority).as_deref(), Some("Highest"));
        assert_eq!(get(import.columns.status).as_deref(), Some("In Progress"));

        let milestone = load
            .rows_of(import.sheet.id)
            .iter()
            .find(|r| r.id == row)
            .and_then(|r| {
                r.cells
                    .iter()
                    .find(|c| c.column_id == import.columns.milestone)
                    .map(|c| c.value.clone())
            });
        assert_eq!(milestone, Some(CellValue::Checkbox(true)));
    }

    #[tokio::test]
    async fn rerun_reuses_rows_by_name() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let tasks = vec![task("t1", "Phase One", 1), task("t2", "Design", 2)];

        let first = import_tasks(&load, ws.id, &tasks, HOURS_PER_DAY, MAX_INDENT)
            .await
            .unwrap();
        let second = import_tasks(&load, ws.id, &tasks, HOURS_PER_DAY, MAX_INDENT)
            .await
            .unwrap();

        assert_eq!(second.tasks_imported, 0);
        assert_eq!(second.row_ids, first.row_ids);
        assert_eq!(load.rows_of(first.sheet.id).len(), 2);
    }

    #[tokio::test]
    async fn configure_fills_picklist_options() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let import = import_tasks(&load, ws.id, &[task("t1", "A", 1)], HOURS_PER_DAY, MAX_INDENT)
            .await
            .unwrap();

        configure_task_columns(
            &load,
            &import,
            STATUS_VALUES.iter().map(|s| (*s).to_owned()).collect(),
            vec!["Lowest".into(), "Highest".into()],
        )
        .await
        .unwrap();

        let stored = load.columns_of(import.sheet.id);
        let status = stored
            .iter()
            .find(|c| c.spec.title == STATUS_COLUMN)
            .unwrap();
        assert_eq!(status.spec.options, STATUS_VALUES);
    }

    #[test]
    fn status_follows_completion_ratio() {
        assert_eq!(status_label(None), "Not Started");
        assert_eq!(status_label(Some(0.0)), "Not Started");
        assert_eq!(status_label(Some(0.4)), "In Progress");
        assert_eq!(status_label(Some(1.0)), "Complete");
    }
}
