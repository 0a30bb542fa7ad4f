//! In-memory load client.
//!
//! Implements the full [`LoadClient`] port against plain vectors. Used by the
//! engine's unit and integration tests, and as the sink behind dry-run
//! rehearsals when no target connection is configured. Enforces the same
//! invariants the platform does — unique column titles within a sheet, unique
//! sheet names within a workspace — so idempotency bugs surface as errors
//! instead of silent duplicates.

use crate::error::ClientError;
use crate::ports::{ClientResult, LoadClient};
use async_trait::async_trait;
use lift_core::sheet::{
    Cell, Column, ColumnId, ColumnSpec, RowId, RowInfo, RowSpec, SheetId, SheetInfo, WorkspaceId,
    WorkspaceInfo,
};
use std::sync::Mutex;

/// A column as stored in memory, keeping the full creation spec so tests can
/// assert on options and source links.
#[derive(Debug, Clone)]
pub struct StoredColumn {
    pub id: ColumnId,
    pub spec: ColumnSpec,
}

/// A row as stored in memory.
#[derive(Debug, Clone)]
pub struct StoredRow {
    pub id: RowId,
    /// Parent row for child placements, `None` for top-level rows.
    pub parent: Option<RowId>,
    pub cells: Vec<Cell>,
}

#[derive(Debug)]
struct SheetState {
    id: SheetId,
    workspace_id: WorkspaceId,
    name: String,
    columns: Vec<StoredColumn>,
    rows: Vec<StoredRow>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    workspaces: Vec<WorkspaceInfo>,
    sheets: Vec<SheetState>,
}

impl State {
    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn sheet_mut(&mut self, sheet_id: SheetId) -> ClientResult<&mut SheetState> {
        self.sheets
            .iter_mut()
            .find(|s| s.id == sheet_id)
            .ok_or(ClientError::Api {
                status: 404,
                message: format!("no such sheet: {sheet_id}"),
            })
    }

    fn sheet(&self, sheet_id: SheetId) -> ClientResult<&SheetState> {
        self.sheets
            .iter()
            .find(|s| s.id == sheet_id)
            .ok_or(ClientError::Api {
                status: 404,
                message: format!("no such sheet: {sheet_id}"),
            })
    }
}

/// In-memory [`LoadClient`] implementation.
#[derive(Debug, Default)]
pub struct MemoryLoad {
    state: Mutex<State>,
}

impl MemoryLoad {
    /// Create an empty in-memory target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Number of workspaces, for duplicate-detection assertions.
    #[must_use]
    pub fn workspace_count(&self) -> usize {
        self.lock().workspaces.len()
    }

    /// Names of the sheets in a workspace, in creation order.
    #[must_use]
    pub fn sheet_names(&self, workspace_id: WorkspaceId) -> Vec<String> {
        self.lock()
            .sheets
            .iter()
            .filter(|s| s.workspace_id == workspace_id)
            .map(|s| s.name.clone())
            .collect()
    }

    /// Full column state of a sheet, in creation order.
    #[must_use]
    pub fn columns_of(&self, sheet_id: SheetId) -> Vec<StoredColumn> {
        self.lock()
            .sheets
            .iter()
            .find(|s| s.id == sheet_id)
            .map(|s| s.columns.clone())
            .unwrap_or_default()
    }

    /// Full row state of a sheet, in insertion order.
    #[must_use]
    pub fn rows_of(&self, sheet_id: SheetId) -> Vec<StoredRow> {
        self.lock()
            .sheets
            .iter()
            .find(|s| s.id == sheet_id)
            .map(|s| s.rows.clone())
            .unwrap_or_default()
    }

    /// Nesting depth of a row: 0 for top level, parents counted upward.
    #[must_use]
    pub fn indent_of(&self, sheet_id: SheetId, row_id: RowId) -> u32 {
        let state = self.lock();
        let Some(sheet) = state.sheets.iter().find(|s| s.id == sheet_id) else {
            return 0;
        };

        let mut depth = 0;
        let mut current = sheet.rows.iter().find(|r| r.id == row_id);
        while let Some(row) = current {
            match row.parent {
                Some(parent_id) => {
                    depth += 1;
                    current = sheet.rows.iter().find(|r| r.id == parent_id);
                }
                None => break,
            }
        }
        depth
    }
}

#[async_trait]
impl LoadClient for MemoryLoad {
    async fn find_workspace_by_name(&self, name: &str) -> ClientResult<Option<WorkspaceInfo>> {
        Ok(self
            .lock()
            .workspaces
            .iter()
            .find(|w| w.name == name)
            .cloned())
    }

    async fn get_workspace(&self, id: WorkspaceId) -> ClientResult<Option<WorkspaceInfo>> {
        Ok(self.lock().workspaces.iter().find(|w| w.id == id).cloned())
    }

    async fn create_workspace(&self, name: &str) -> ClientResult<WorkspaceInfo> {
        let mut state = self.lock();
        let id = state.fresh_id();
        let ws = WorkspaceInfo {
            id,
            name: name.to_owned(),
        };
        state.workspaces.push(ws.clone());
        Ok(ws)
    }

    async fn find_sheet(
        &self,
        workspace_id: WorkspaceId,
        name: &str,
    ) -> ClientResult<Option<SheetInfo>> {
        Ok(self
            .lock()
            .sheets
            .iter()
            .find(|s| s.workspace_id == workspace_id && s.name == name)
            .map(|s| SheetInfo {
                id: s.id,
                name: s.name.clone(),
            }))
    }

    async fn create_sheet(
        &self,
        workspace_id: WorkspaceId,
        name: &str,
        columns: &[ColumnSpec],
    ) -> ClientResult<SheetInfo> {
        let mut state = self.lock();

        if state
            .sheets
            .iter()
            .any(|s| s.workspace_id == workspace_id && s.name == name)
        {
            return Err(ClientError::Api {
                status: 400,
                message: format!("duplicate sheet name: {name}"),
            });
        }

        let id = state.fresh_id();
        let stored_columns = columns
            .iter()
            .map(|spec| StoredColumn {
                id: {
                    state.next_id += 1;
                    state.next_id
                },
                spec: spec.clone(),
            })
            .collect();

        state.sheets.push(SheetState {
            id,
            workspace_id,
            name: name.to_owned(),
            columns: stored_columns,
            rows: Vec::new(),
        });

        Ok(SheetInfo {
            id,
            name: name.to_owned(),
        })
    }

    async fn list_columns(&self, sheet_id: SheetId) -> ClientResult<Vec<Column>> {
        let state = self.lock();
        let sheet = state.sheet(sheet_id)?;
        Ok(sheet
            .columns
            .iter()
            .map(|c| Column {
                id: c.id,
                title: c.spec.title.clone(),
                kind: c.spec.kind,
            })
            .collect())
    }

    async fn add_column(&self, sheet_id: SheetId, spec: &ColumnSpec) -> ClientResult<Column> {
        let mut state = self.lock();
        let id = state.fresh_id();
        let sheet = state.sheet_mut(sheet_id)?;

        if sheet.columns.iter().any(|c| c.spec.title == spec.title) {
            return Err(ClientError::Api {
                status: 400,
                message: format!("duplicate column title: {}", spec.title),
            });
        }

        sheet.columns.push(StoredColumn {
            id,
            spec: spec.clone(),
        });
        Ok(Column {
            id,
            title: spec.title.clone(),
            kind: spec.kind,
        })
    }

    async fn update_column(
        &self,
        sheet_id: SheetId,
        column_id: ColumnId,
        spec: &ColumnSpec,
    ) -> ClientResult<Column> {
        let mut state = self.lock();
        let sheet = state.sheet_mut(sheet_id)?;
        let column = sheet
            .columns
            .iter_mut()
            .find(|c| c.id == column_id)
            .ok_or(ClientError::Api {
                status: 404,
                message: format!("no such column: {column_id}"),
            })?;

        // Title and kind stay fixed; only options and source link move.
        column.spec.options = spec.options.clone();
        column.spec.source_link = spec.source_link;

        Ok(Column {
            id: column.id,
            title: column.spec.title.clone(),
            kind: column.spec.kind,
        })
    }

    async fn list_rows(&self, sheet_id: SheetId) -> ClientResult<Vec<RowInfo>> {
        let state = self.lock();
        let sheet = state.sheet(sheet_id)?;
        Ok(sheet
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| RowInfo {
                id: row.id,
                row_number: idx as u32 + 1,
                cells: row.cells.clone(),
            })
            .collect())
    }

    async fn add_row(&self, sheet_id: SheetId, row: &RowSpec) -> ClientResult<RowId> {
        let ids = self.add_rows(sheet_id, std::slice::from_ref(row)).await?;
        ids.into_iter().next().ok_or(ClientError::Api {
            status: 500,
            message: "row insertion yielded no id".into(),
        })
    }

    async fn add_rows(&self, sheet_id: SheetId, rows: &[RowSpec]) -> ClientResult<Vec<RowId>> {
        let mut state = self.lock();
        let mut ids = Vec::with_capacity(rows.len());

        for row in rows {
            let id = state.fresh_id();
            let sheet = state.sheet_mut(sheet_id)?;
            let parent = match row.placement {
                lift_core::sheet::RowPlacement::Bottom => None,
                lift_core::sheet::RowPlacement::Child { parent_row_id } => {
                    if !sheet.rows.iter().any(|r| r.id == parent_row_id) {
                        return Err(ClientError::Api {
                            status: 400,
                            message: format!("no such parent row: {parent_row_id}"),
                        });
                    }
                    Some(parent_row_id)
                }
            };

            sheet.rows.push(StoredRow {
                id,
                parent,
                cells: row.cells.clone(),
            });
            ids.push(id);
        }

        Ok(ids)
    }

    async fn update_row_cells(
        &self,
        sheet_id: SheetId,
        row_id: RowId,
        cells: &[Cell],
    ) -> ClientResult<()> {
        let mut state = self.lock();
        let sheet = state.sheet_mut(sheet_id)?;
        let row = sheet
            .rows
            .iter_mut()
            .find(|r| r.id == row_id)
            .ok_or(ClientError::Api {
                status: 404,
                message: format!("no such row: {row_id}"),
            })?;

        for cell in cells {
            match row.cells.iter_mut().find(|c| c.column_id == cell.column_id) {
                Some(existing) => existing.value = cell.value.clone(),
                None => row.cells.push(cell.clone()),
            }
        }
        Ok(())
    }

    async fn delete_rows(&self, sheet_id: SheetId, row_ids: &[RowId]) -> ClientResult<()> {
        let mut state = self.lock();
        let sheet = state.sheet_mut(sheet_id)?;
        sheet.rows.retain(|r| !row_ids.contains(&r.id));
        Ok(())
    }
}
