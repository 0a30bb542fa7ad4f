//! Collaborator ports: the extraction and load contracts the engine depends
//! on.
//!
//! The engine never talks HTTP directly. It sees exactly these two traits;
//! the HTTP implementations and the in-memory double are interchangeable
//! behind them.

use crate::error::ClientError;
use async_trait::async_trait;
use lift_core::records::ProjectSnapshot;
use lift_core::sheet::{
    Cell, Column, ColumnId, ColumnSpec, RowId, RowInfo, RowSpec, SheetId, SheetInfo, WorkspaceId,
    WorkspaceInfo,
};

/// Result type for collaborator calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Fetches raw source records for one project.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Fetch the full export of the project identified by `source_ref`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the export cannot be fetched or parsed.
    async fn fetch_snapshot(&self, source_ref: &str) -> ClientResult<ProjectSnapshot>;
}

/// Performs create/lookup/update calls against the target platform.
///
/// All mutations are additive; nothing here deletes a workspace or sheet.
/// `delete_rows` exists solely for the explicit clear-placeholder-rows step.
#[async_trait]
pub trait LoadClient: Send + Sync {
    /// Find a workspace by exact name.
    async fn find_workspace_by_name(&self, name: &str) -> ClientResult<Option<WorkspaceInfo>>;

    /// Fetch a workspace by id. Returns `None` when it does not exist.
    async fn get_workspace(&self, id: WorkspaceId) -> ClientResult<Option<WorkspaceInfo>>;

    /// Create a workspace.
    async fn create_workspace(&self, name: &str) -> ClientResult<WorkspaceInfo>;

    /// Find a sheet by exact name within a workspace.
    async fn find_sheet(
        &self,
        workspace_id: WorkspaceId,
        name: &str,
    ) -> ClientResult<Option<SheetInfo>>;

    /// Create a sheet with its initial columns.
    async fn create_sheet(
        &self,
        workspace_id: WorkspaceId,
        name: &str,
        columns: &[ColumnSpec],
    ) -> ClientResult<SheetInfo>;

    /// List the columns of a sheet.
    async fn list_columns(&self, sheet_id: SheetId) -> ClientResult<Vec<Column>>;

    /// Add one column to a sheet.
    async fn add_column(&self, sheet_id: SheetId, spec: &ColumnSpec) -> ClientResult<Column>;

    /// Reconfigure an existing column (picklist options, cross-sheet source
    /// link). Title and kind are left unchanged.
    async fn update_column(
        &self,
        sheet_id: SheetId,
        column_id: ColumnId,
        spec: &ColumnSpec,
    ) -> ClientResult<Column>;

    /// List the rows of a sheet in display order.
    async fn list_rows(&self, sheet_id: SheetId) -> ClientResult<Vec<RowInfo>>;

    /// Add one row, honoring its placement. Returns the new row id.
    async fn add_row(&self, sheet_id: SheetId, row: &RowSpec) -> ClientResult<RowId>;

    /// Add a batch of rows in order. Returns the new row ids, same order.
    async fn add_rows(&self, sheet_id: SheetId, rows: &[RowSpec]) -> ClientResult<Vec<RowId>>;

    /// Set cells on an existing row. Cells not listed are left untouched.
    async fn update_row_cells(
        &self,
        sheet_id: SheetId,
        row_id: RowId,
        cells: &[Cell],
    ) -> ClientResult<()>;

    /// Delete rows by id. Used only by the explicit placeholder-clearing
    /// step, never by the transformers.
    async fn delete_rows(&self, sheet_id: SheetId, row_ids: &[RowId]) -> ClientResult<()>;
}
