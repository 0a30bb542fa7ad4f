//! Resource transformer: the resource pool to the resource sheet.
//!
//! One row per resource. Besides the identifying name column, each row
//! populates exactly one of the three family columns — contact for People,
//! plain text for Material and Cost — and leaves the other two empty. The
//! family columns double as the source of selectable values for the task
//! sheet's assignment columns.

use lift_client::LoadClient;
use lift_core::convert::contact_value;
use lift_core::enums::ResourceFamily;
use lift_core::records::SourceResource;
use lift_core::sheet::{Cell, CellValue, ColumnSpec, RowId, RowSpec, SheetInfo, WorkspaceId};
use std::collections::HashMap;

use super::{TransformOutcome, ensure_sheet, require_column};
use crate::error::EngineResult;
use crate::family::{ResourceColumnRefs, classify};

/// Name of the resource sheet.
pub const RESOURCE_SHEET: &str = "Resources";

pub const NAME_COLUMN: &str = "Resource Name";
/// People family column.
pub const CONTACT_COLUMN: &str = "Contact";
/// Material family column.
pub const MATERIAL_COLUMN: &str = "Material";
/// Cost family column.
pub const COST_COLUMN: &str = "Cost Center";
pub const CATEGORY_COLUMN: &str = "Category";

/// Result of the resource import.
#[derive(Debug)]
pub struct ResourceImport {
    pub sheet: SheetInfo,
    /// Family columns, for the assignment-column source links.
    pub refs: ResourceColumnRefs,
    /// Destination row of each resource, by source resource id.
    pub row_ids: HashMap<String, RowId>,
    pub resources_imported: u32,
    pub outcome: TransformOutcome,
}

fn column_specs(category_options: &[String]) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::primary(NAME_COLUMN),
        ColumnSpec::contact(CONTACT_COLUMN),
        ColumnSpec::text(MATERIAL_COLUMN),
        ColumnSpec::text(COST_COLUMN),
        ColumnSpec::picklist(CATEGORY_COLUMN, category_options.to_vec()),
    ]
}

/// Import the resource pool into the resource sheet.
///
/// `category_options` is the discovered resource-category value set,
/// constraining the category picklist.
///
/// # Errors
///
/// Returns a connectivity error from the load client, or a data-integrity
/// error when an existing sheet is missing expected columns.
pub async fn import_resources(
    load: &dyn LoadClient,
    workspace_id: WorkspaceId,
    resources: &[SourceResource],
    category_options: &[String],
) -> EngineResult<ResourceImport> {
    let mut outcome = TransformOutcome::default();
    let sheet = ensure_sheet(
        load,
        workspace_id,
        RESOURCE_SHEET,
        &column_specs(category_options),
        &mut outcome,
    )
    .await?;

    let listed = load.list_columns(sheet.id).await?;
    let name_col = require_column(&listed, NAME_COLUMN)?;
    let contact_col = require_column(&listed, CONTACT_COLUMN)?;
    let material_col = require_column(&listed, MATERIAL_COLUMN)?;
    let cost_col = require_column(&listed, COST_COLUMN)?;
    let category_col = require_column(&listed, CATEGORY_COLUMN)?;

    let existing_by_name: HashMap<String, RowId> = load
        .list_rows(sheet.id)
        .await?
        .iter()
        .filter_map(|row| {
            row.cells
                .iter()
                .find(|c| c.column_id == name_col)
                .and_then(|c| c.value.as_text())
                .map(|name| (name.to_owned(), row.id))
        })
        .collect();

    let mut row_ids = HashMap::with_capacity(resources.len());
    let mut resources_imported = 0;
    for resource in resources {
        if let Some(&existing) = existing_by_name.get(&resource.name) {
            row_ids.insert(resource.id.clone(), existing);
            continue;
        }

        let mut cells = vec![Cell {
            column_id: name_col,
            value: CellValue::Text(resource.name.clone()),
        }];

        // Exactly one family column per row.
        match classify(resource) {
            ResourceFamily::People => cells.push(Cell {
                column_id: contact_col,
                value: contact_value(&resource.name, resource.email.as_deref()),
            }),
            ResourceFamily::Material => cells.push(Cell {
                column_id: material_col,
                value: CellValue::Text(resource.name.clone()),
            }),
            ResourceFamily::Cost => cells.push(Cell {
                column_id: cost_col,
                value: CellValue::Text(resource.name.clone()),
            }),
        }

        if let Some(category) = resource
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            cells.push(Cell {
                column_id: category_col,
                value: CellValue::Text(category.to_owned()),
            });
        }

        let row_id = load.add_row(sheet.id, &RowSpec::bottom(cells)).await?;
        row_ids.insert(resource.id.clone(), row_id);
        outcome.rows_created += 1;
        resources_imported += 1;
    }

    tracing::info!(
        imported = resources_imported,
        total = resources.len(),
        "resource import finished"
    );

    Ok(ResourceImport {
        sheet: sheet.clone(),
        refs: ResourceColumnRefs {
            sheet_id: sheet.id,
            contact: contact_col,
            material: material_col,
            cost: cost_col,
        },
        row_ids,
        resources_imported,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_client::MemoryLoad;
    use lift_core::sheet::ContactValue;
    use pretty_assertions::assert_eq;

    fn resource(id: &str, name: &str, category: Option<&str>) -> SourceResource {
        SourceResource {
            id: id.into(),
            name: name.into(),
            email: None,
            category: category.map(str::to_owned),
        }
    }

    fn row_cells(load: &MemoryLoad, sheet: u64, row: RowId) -> Vec<Cell> {
        load.rows_of(sheet)
            .into_iter()
            .find(|r| r.id == row)
            .map(|r| r.cells)
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn material_resource_populates_only_its_family_column() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let pool = vec![resource("r1", "Concrete Mix", Some("Material"))];

        let import = import_resources(&load, ws.id, &pool, &["Material".into()])
            .await
            .unwrap();

        let cells = row_cells(&load, import.sheet.id, import.row_ids["r1"]);
        assert!(cells.iter().any(|c| c.column_id == import.refs.material));
        assert!(!cells.iter().any(|c| c.column_id == import.refs.contact));
        assert!(!cells.iter().any(|c| c.column_id == import.refs.cost));
    }

    #[tokio::test]
    async fn people_resource_gets_a_contact_cell() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let mut person = resource("r1", "Dana Cruz", None);
        person.email = Some("dana@example.com".into());

        let import = import_resources(&load, ws.id, &[person], &[]).await.unwrap();

        let cells = row_cells(&load, import.sheet.id, import.row_ids["r1"]);
        let contact = cells
            .iter()
            .find(|c| c.column_id == import.refs.contact)
            .unwrap();
        assert_eq!(
            contact.value,
            CellValue::Contact(ContactValue {
                name: "Dana Cruz".into(),
                email: Some("dana@example.com".into())
            })
        );
    }

    #[tokio::test]
    async fn category_picklist_carries_discovered_options() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let options = vec!["Cost".to_owned(), "Material".to_owned()];

        let import = import_resources(&load, ws.id, &[], &options).await.unwrap();

        let stored = load.columns_of(import.sheet.id);
        let category = stored
            .iter()
            .find(|c| c.spec.title == CATEGORY_COLUMN)
            .unwrap();
        assert_eq!(category.spec.options, options);
    }

    #[tokio::test]
    async fn rerun_reuses_rows_by_name() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("W").await.unwrap();
        let pool = vec![
            resource("r1", "Dana Cruz", None),
            resource("r2", "Concrete Mix", Some("Material")),
        ];

        let first = import_resources(&load, ws.id, &pool, &[]).await.unwrap();
        let second = import_resources(&load, ws.id, &pool, &[]).await.unwrap();

        assert_eq!(second.resources_imported, 0);
        assert_eq!(second.row_ids, first.row_ids);
        assert_eq!(load.rows_of(first.sheet.id).len(), 2);
    }
}
