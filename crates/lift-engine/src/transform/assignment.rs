//! Assignment transformer: task-resource links as multi-valued task cells.
//!
//! Assignments do not get their own sheet. Instead the task sheet grows one
//! multi-valued column per resource family present in the pool, each sourcing
//! its selectable values from the resource sheet (contacts for People, text
//! for Material and Cost), and every task row lists its assigned resources in
//! those columns. This is the only stage that needs both sheets' column ids,
//! which is why it runs last.

use lift_client::LoadClient;
use lift_core::enums::{EntityKind, ResourceFamily};
use lift_core::records::{SourceAssignment, SourceResource};
use lift_core::sheet::{Cell, CellValue, ColumnId, ContactValue, RowId};
use std::collections::HashMap;

use super::TransformOutcome;
use crate::error::EngineResult;
use crate::family::{
    ResourceColumnRefs, assignment_column_spec, assignment_column_title, classify,
    families_present,
};
use crate::transform::task::TaskImport;
use crate::upsert::get_or_create;

/// Result of the assignment configuration.
#[derive(Debug)]
pub struct AssignmentConfig {
    pub assignments_imported: u32,
    pub outcome: TransformOutcome,
}

/// Per-task accumulation of assigned resources, split by family.
#[derive(Debug, Default)]
struct TaskAssignments {
    people: Vec<ContactValue>,
    materials: Vec<String>,
    costs: Vec<String>,
}

/// Grow the task sheet's assignment columns and fill them per task.
///
/// Assignments referencing an unknown task or resource degrade to warnings;
/// the rest proceed.
///
/// # Errors
///
/// Returns a connectivity error from the load client.
pub async fn configure_assignments(
    load: &dyn LoadClient,
    task_import: &TaskImport,
    refs: ResourceColumnRefs,
    resources: &[SourceResource],
    assignments: &[SourceAssignment],
) -> EngineResult<AssignmentConfig> {
    let mut outcome = TransformOutcome::default();

    // One column per family present, created only on miss.
    let mut family_columns: HashMap<ResourceFamily, ColumnId> = HashMap::new();
    for family in families_present(resources) {
        let title = assignment_column_title(family);
        let spec = assignment_column_spec(family, refs);
        let fetched = get_or_create(
            || async {
                let columns = load.list_columns(task_import.sheet.id).await?;
                Ok(columns.into_iter().find(|c| c.title == title))
            },
            || async move { load.add_column(task_import.sheet.id, &spec).await },
        )
        .await?;
        if fetched.was_created() {
            outcome.columns_created += 1;
        }
        family_columns.insert(family, fetched.into_inner().id);
    }

    let resources_by_id: HashMap<&str, &SourceResource> =
        resources.iter().map(|r| (r.id.as_str(), r)).collect();

    // Accumulate per destination row so each row is updated once.
    let mut per_row: HashMap<RowId, TaskAssignments> = HashMap::new();
    let mut assignments_imported = 0;
    for assignment in assignments {
        let Some(&row_id) = task_import.row_ids.get(&assignment.task_id) else {
            outcome.warnings.push(format!(
                "{} for task {}: task has no destination row; assignment skipped",
                EntityKind::Assignment,
                assignment.task_id
            ));
            continue;
        };
        let Some(resource) = resources_by_id.get(assignment.resource_id.as_str()) else {
            outcome.warnings.push(format!(
                "{} for task {}: resource {} is not in the pool; assignment skipped",
                EntityKind::Assignment,
                assignment.task_id,
                assignment.resource_id
            ));
            continue;
        };

        let entry = per_row.entry(row_id).or_default();
        match classify(resource) {
            ResourceFamily::People => entry.people.push(ContactValue {
                name: resource.name.clone(),
                email: resource.email.clone(),
            }),
            ResourceFamily::Material => entry.materials.push(resource.name.clone()),
            ResourceFamily::Cost => entry.costs.push(resource.name.clone()),
        }
        assignments_imported += 1;
    }

    for (row_id, gathered) in per_row {
        let mut cells = Vec::new();
        if !gathered.people.is_empty() {
            cells.push(Cell {
                column_id: family_columns[&ResourceFamily::People],
                value: CellValue::ContactList(gathered.people),
            });
        }
        if !gathered.materials.is_empty() {
            cells.push(Cell {
                column_id: family_columns[&ResourceFamily::Material],
                value: CellValue::TextList(gathered.materials),
            });
        }
        if !gathered.costs.is_empty() {
            cells.push(Cell {
                column_id: family_columns[&ResourceFamily::Cost],
                value: CellValue::TextList(gathered.costs),
            });
        }
        load.update_row_cells(task_import.sheet.id, row_id, &cells)
            .await?;
    }

    tracing::info!(
        imported = assignments_imported,
        total = assignments.len(),
        "assignment configuration finished"
    );

    Ok(AssignmentConfig {
        assignments_imported,
        outcome,
    })
}
