//! Reference data: shared value sets hosted in their own workspace.
//!
//! Picklist columns across migrated projects draw their options from small
//! per-set sheets inside one reference workspace, each holding a single
//! `Value` column. Three sets are fixed (task status, priority, dependency
//! type); one is discovered per run from the source resource pool (resource
//! category).
//!
//! Everything here is idempotent. Sheets are created only on miss; seed
//! values are appended at the bottom only when absent by exact string match,
//! and existing values are never mutated or reordered — cells elsewhere may
//! already reference them.

use lift_client::LoadClient;
use lift_core::convert::PRIORITY_LABELS;
use lift_core::enums::DependencyType;
use lift_core::sheet::{
    Cell, CellValue, ColumnId, ColumnSpec, RowSpec, SheetId, WorkspaceId, WorkspaceInfo,
};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::upsert::get_or_create;

/// Name of the workspace hosting the value sets.
pub const REFERENCE_WORKSPACE_NAME: &str = "Planlift Reference Data";
/// Title of the single column on every value-set sheet.
pub const VALUE_COLUMN: &str = "Value";

/// Fixed set: task status labels.
pub const STATUS_SET: &str = "Task Status";
/// Status labels in progression order.
pub const STATUS_VALUES: [&str; 3] = ["Not Started", "In Progress", "Complete"];

/// Fixed set: the seven priority labels.
pub const PRIORITY_SET: &str = "Priority";

/// Fixed set: dependency type tokens.
pub const DEPENDENCY_TYPE_SET: &str = "Dependency Type";

/// Discovered set: resource categories observed in the source.
pub const RESOURCE_CATEGORY_SET: &str = "Resource Category";

/// Handle to one hosted value set.
#[derive(Debug, Clone)]
pub struct ValueSetHandle {
    pub sheet_id: SheetId,
    pub column_id: ColumnId,
    /// Current values in sheet order, seeds included.
    pub values: Vec<String>,
}

/// The reference workspace and its value sets.
#[derive(Debug)]
pub struct ReferenceLibrary {
    workspace: WorkspaceInfo,
    sets: HashMap<String, ValueSetHandle>,
    sheets_created: u32,
    values_added: u32,
}

impl ReferenceLibrary {
    /// Resolve or create the reference workspace and seed the fixed sets.
    ///
    /// When `existing_id` is given, that workspace must resolve — a
    /// configured-but-unreachable container is a configuration error, never
    /// a silent fallback to creating a parallel one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for an unresolvable
    /// `existing_id`, or a connectivity error from the load client.
    pub async fn setup(
        load: &dyn LoadClient,
        existing_id: Option<WorkspaceId>,
    ) -> EngineResult<Self> {
        let workspace = match existing_id {
            Some(id) => load.get_workspace(id).await?.ok_or_else(|| {
                EngineError::Configuration(format!(
                    "configured reference workspace {id} does not resolve; \
                     refusing to create a parallel container"
                ))
            })?,
            None => {
                let fetched = get_or_create(
                    || load.find_workspace_by_name(REFERENCE_WORKSPACE_NAME),
                    || load.create_workspace(REFERENCE_WORKSPACE_NAME),
                )
                .await?;
                if fetched.was_created() {
                    tracing::info!(name = REFERENCE_WORKSPACE_NAME, "created reference workspace");
                }
                fetched.into_inner()
            }
        };

        let mut library = Self {
            workspace,
            sets: HashMap::new(),
            sheets_created: 0,
            values_added: 0,
        };

        library
            .ensure_value_set(load, STATUS_SET, STATUS_VALUES.iter().copied())
            .await?;
        library
            .ensure_value_set(load, PRIORITY_SET, PRIORITY_LABELS.iter().copied())
            .await?;
        library
            .ensure_value_set(
                load,
                DEPENDENCY_TYPE_SET,
                [
                    DependencyType::FS,
                    DependencyType::SS,
                    DependencyType::FF,
                    DependencyType::SF,
                ]
                .iter()
                .map(|ty| ty.as_str()),
            )
            .await?;

        Ok(library)
    }

    /// Idempotently host a value set: create its sheet on miss, then append
    /// any seed value not already present. Appends always land at the
    /// bottom; existing values keep their rows.
    ///
    /// # Errors
    ///
    /// Returns a connectivity error from the load client, or
    /// [`EngineError::DataIntegrity`] when an existing set sheet lacks its
    /// `Value` column.
    pub async fn ensure_value_set<'a>(
        &mut self,
        load: &dyn LoadClient,
        name: &str,
        seeds: impl IntoIterator<Item = &'a str>,
    ) -> EngineResult<&ValueSetHandle> {
        let value_column = [ColumnSpec::primary(VALUE_COLUMN)];
        let fetched = get_or_create(
            || load.find_sheet(self.workspace.id, name),
            || load.create_sheet(self.workspace.id, name, &value_column),
        )
        .await?;
        if fetched.was_created() {
            self.sheets_created += 1;
        }
        let sheet = fetched.into_inner();

        let column_id = load
            .list_columns(sheet.id)
            .await?
            .iter()
            .find(|c| c.title == VALUE_COLUMN)
            .map(|c| c.id)
            .ok_or_else(|| {
                EngineError::DataIntegrity(format!(
                    "value set sheet '{name}' has no '{VALUE_COLUMN}' column"
                ))
            })?;

        let mut values: Vec<String> = load
            .list_rows(sheet.id)
            .await?
            .iter()
            .filter_map(|row| {
                row.cells
                    .iter()
                    .find(|c| c.column_id == column_id)
                    .and_then(|c| c.value.as_text())
                    .map(str::to_owned)
            })
            .collect();

        for seed in seeds {
            if values.iter().any(|v| v == seed) {
                continue;
            }
            load.add_row(
                sheet.id,
                &RowSpec::bottom(vec![Cell {
                    column_id,
                    value: CellValue::Text(seed.to_owned()),
                }]),
            )
            .await?;
            values.push(seed.to_owned());
            self.values_added += 1;
        }

        let handle = ValueSetHandle {
            sheet_id: sheet.id,
            column_id,
            values,
        };
        self.sets.insert(name.to_owned(), handle);
        Ok(&self.sets[name])
    }

    /// The hosted set with the given name, when it has been ensured.
    #[must_use]
    pub fn set(&self, name: &str) -> Option<&ValueSetHandle> {
        self.sets.get(name)
    }

    /// Current values of a set, empty when the set is unknown.
    #[must_use]
    pub fn values(&self, name: &str) -> Vec<String> {
        self.sets
            .get(name)
            .map(|set| set.values.clone())
            .unwrap_or_default()
    }

    /// The reference workspace.
    #[must_use]
    pub const fn workspace(&self) -> &WorkspaceInfo {
        &self.workspace
    }

    /// Value-set sheets created by this library instance.
    #[must_use]
    pub const fn sheets_created(&self) -> u32 {
        self.sheets_created
    }

    /// Values appended by this library instance.
    #[must_use]
    pub const fn values_added(&self) -> u32 {
        self.values_added
    }
}

/// Collect a discovered value set from source records: trimmed, non-empty,
/// deduplicated, sorted.
pub fn discover_values<T>(records: &[T], selector: impl Fn(&T) -> Option<&str>) -> Vec<String> {
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|record| selector(record))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_client::MemoryLoad;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn setup_creates_all_fixed_sets() {
        let load = MemoryLoad::new();
        let library = ReferenceLibrary::setup(&load, None).await.unwrap();

        assert_eq!(
            load.sheet_names(library.workspace().id),
            vec![STATUS_SET, PRIORITY_SET, DEPENDENCY_TYPE_SET]
        );
        assert_eq!(library.values(PRIORITY_SET).len(), 7);
        assert_eq!(library.values(DEPENDENCY_TYPE_SET), ["FS", "SS", "FF", "SF"]);
        assert_eq!(library.sheets_created(), 3);
        assert_eq!(library.values_added(), 3 + 7 + 4);
    }

    #[tokio::test]
    async fn second_setup_reuses_everything() {
        let load = MemoryLoad::new();
        let first = ReferenceLibrary::setup(&load, None).await.unwrap();
        let second = ReferenceLibrary::setup(&load, None).await.unwrap();

        assert_eq!(load.workspace_count(), 1);
        assert_eq!(second.sheets_created(), 0);
        assert_eq!(second.values_added(), 0);
        assert_eq!(second.values(STATUS_SET), first.values(STATUS_SET));
    }

    #[tokio::test]
    async fn configured_id_is_reused_not_recreated() {
        let load = MemoryLoad::new();
        let ws = load.create_workspace("Shared Reference").await.unwrap();
        let library = ReferenceLibrary::setup(&load, Some(ws.id)).await.unwrap();

        assert_eq!(library.workspace().id, ws.id);
        assert_eq!(load.workspace_count(), 1);
    }

    #[tokio::test]
    async fn unresolvable_configured_id_is_fatal() {
        let load = MemoryLoad::new();
        let err = ReferenceLibrary::setup(&load, Some(999)).await.unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        // No fallback container was created.
        assert_eq!(load.workspace_count(), 0);
    }

    #[tokio::test]
    async fn new_seed_appends_without_touching_existing_values() {
        let load = MemoryLoad::new();
        let mut library = ReferenceLibrary::setup(&load, None).await.unwrap();

        let handle = library
            .ensure_value_set(&load, RESOURCE_CATEGORY_SET, ["Engineering", "Material"])
            .await
            .unwrap();
        let sheet_id = handle.sheet_id;
        assert_eq!(handle.values, ["Engineering", "Material"]);

        let handle = library
            .ensure_value_set(&load, RESOURCE_CATEGORY_SET, ["Material", "Cost"])
            .await
            .unwrap();
        assert_eq!(handle.values, ["Engineering", "Material", "Cost"]);

        let rows = load.rows_of(sheet_id);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn discovery_sorts_trims_and_dedups() {
        struct Rec(Option<&'static str>);
        let records = [
            Rec(Some(" Material ")),
            Rec(Some("Engineering")),
            Rec(None),
            Rec(Some("Material")),
            Rec(Some("")),
        ];
        assert_eq!(
            discover_values(&records, |r| r.0),
            vec!["Engineering".to_owned(), "Material".to_owned()]
        );
    }
}
