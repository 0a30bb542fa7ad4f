//! HTTP load client for the target worksheet platform.
//!
//! Thin request wrappers: every call goes through the shared resilience
//! policy and [`check_response`]. The wire shapes reuse the `lift-core`
//! sheet model directly; only the response envelopes are local.

use crate::error::ClientError;
use crate::http::check_response;
use crate::ports::{ClientResult, LoadClient};
use crate::resilience::ResiliencePolicy;
use async_trait::async_trait;
use lift_core::sheet::{
    Cell, Column, ColumnId, ColumnSpec, RowId, RowInfo, RowSpec, SheetId, SheetInfo, WorkspaceId,
    WorkspaceInfo,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct WorkspaceList {
    workspaces: Vec<WorkspaceInfo>,
}

#[derive(Deserialize)]
struct SheetList {
    sheets: Vec<SheetInfo>,
}

#[derive(Deserialize)]
struct ColumnList {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct RowList {
    rows: Vec<RowInfo>,
}

#[derive(Deserialize)]
struct RowIdList {
    row_ids: Vec<RowId>,
}

#[derive(Serialize)]
struct CreateWorkspaceRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct CreateSheetRequest<'a> {
    name: &'a str,
    columns: &'a [ColumnSpec],
}

#[derive(Serialize)]
struct AddRowsRequest<'a> {
    rows: &'a [RowSpec],
}

#[derive(Serialize)]
struct UpdateCellsRequest<'a> {
    cells: &'a [Cell],
}

/// HTTP client for the target platform API.
pub struct HttpLoad {
    http: reqwest::Client,
    base_url: String,
    token: String,
    policy: ResiliencePolicy,
}

impl HttpLoad {
    /// Create a load client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: &str, token: &str, policy: ResiliencePolicy) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("planlift/0.1")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            policy,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> ClientResult<T> {
        self.policy
            .run(|| {
                let req = self.http.get(&url).bearer_auth(&self.token);
                async move {
                    let resp = check_response(req.send().await?).await?;
                    resp.json::<T>()
                        .await
                        .map_err(|e| ClientError::Parse(e.to_string()))
                }
            })
            .await
    }

    async fn send_json<B: Serialize + Sync, T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: String,
        body: &B,
    ) -> ClientResult<T> {
        self.policy
            .run(|| {
                let req = self
                    .http
                    .request(method.clone(), &url)
                    .bearer_auth(&self.token)
                    .json(body);
                async move {
                    let resp = check_response(req.send().await?).await?;
                    resp.json::<T>()
                        .await
                        .map_err(|e| ClientError::Parse(e.to_string()))
                }
            })
            .await
    }
}

#[async_trait]
impl LoadClient for HttpLoad {
    async fn find_workspace_by_name(&self, name: &str) -> ClientResult<Option<WorkspaceInfo>> {
        let url = format!("{}/workspaces", self.base_url);
        let list: WorkspaceList = self.get_json(url).await?;
        Ok(list.workspaces.into_iter().find(|w| w.name == name))
    }

    async fn get_workspace(&self, id: WorkspaceId) -> ClientResult<Option<WorkspaceInfo>> {
        let url = format!("{}/workspaces/{id}", self.base_url);
        match self.get_json::<WorkspaceInfo>(url).await {
            Ok(ws) => Ok(Some(ws)),
            Err(ClientError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_workspace(&self, name: &str) -> ClientResult<WorkspaceInfo> {
        let url = format!("{}/workspaces", self.base_url);
        self.send_json(reqwest::Method::POST, url, &CreateWorkspaceRequest { name })
            .await
    }

    async fn find_sheet(
        &self,
        workspace_id: WorkspaceId,
        name: &str,
    ) -> ClientResult<Option<SheetInfo>> {
        let url = format!("{}/workspaces/{workspace_id}/sheets", self.base_url);
        let list: SheetList = self.get_json(url).await?;
        Ok(list.sheets.into_iter().find(|s| s.name == name))
    }

    async fn create_sheet(
        &self,
        workspace_id: WorkspaceId,
        name: &str,
        columns: &[ColumnSpec],
    ) -> ClientResult<SheetInfo> {
        let url = format!("{}/workspaces/{workspace_id}/sheets", self.base_url);
        self.send_json(
            reqwest::Method::POST,
            url,
            &CreateSheetRequest { name, columns },
        )
        .await
    }

    async fn list_columns(&self, sheet_id: SheetId) -> ClientResult<Vec<Column>> {
        let url = format!("{}/sheets/{sheet_id}/columns", self.base_url);
        let list: ColumnList = self.get_json(url).await?;
        Ok(list.columns)
    }

    async fn add_column(&self, sheet_id: SheetId, spec: &ColumnSpec) -> ClientResult<Column> {
        let url = format!("{}/sheets/{sheet_id}/columns", self.base_url);
        self.send_json(reqwest::Method::POST, url, spec).await
    }

    async fn update_column(
        &self,
        sheet_id: SheetId,
        column_id: ColumnId,
        spec: &ColumnSpec,
    ) -> ClientResult<Column> {
        let url = format!("{}/sheets/{sheet_id}/columns/{column_id}", self.base_url);
        self.send_json(reqwest::Method::PUT, url, spec).await
    }

    async fn list_rows(&self, sheet_id: SheetId) -> ClientResult<Vec<RowInfo>> {
        let url = format!("{}/sheets/{sheet_id}/rows", self.base_url);
        let list: RowList = self.get_json(url).await?;
        Ok(list.rows)
    }

    async fn add_row(&self, sheet_id: SheetId, row: &RowSpec) -> ClientResult<RowId> {
        let ids = self.add_rows(sheet_id, std::slice::from_ref(row)).await?;
        ids.into_iter()
            .next()
            .ok_or_else(|| ClientError::Parse("platform returned no row id".into()))
    }

    async fn add_rows(&self, sheet_id: SheetId, rows: &[RowSpec]) -> ClientResult<Vec<RowId>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/sheets/{sheet_id}/rows", self.base_url);
        let list: RowIdList = self
            .send_json(reqwest::Method::POST, url, &AddRowsRequest { rows })
            .await?;
        Ok(list.row_ids)
    }

    async fn update_row_cells(
        &self,
        sheet_id: SheetId,
        row_id: RowId,
        cells: &[Cell],
    ) -> ClientResult<()> {
        if cells.is_empty() {
            return Ok(());
        }
        let url = format!("{}/sheets/{sheet_id}/rows/{row_id}", self.base_url);
        let _: serde_json::Value = self
            .send_json(reqwest::Method::PUT, url, &UpdateCellsRequest { cells })
            .await?;
        Ok(())
    }

    async fn delete_rows(&self, sheet_id: SheetId, row_ids: &[RowId]) -> ClientResult<()> {
        if row_ids.is_empty() {
            return Ok(());
        }
        let ids = row_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/sheets/{sheet_id}/rows?ids={ids}", self.base_url);

        self.policy
            .run(|| {
                let req = self.http.delete(&url).bearer_auth(&self.token);
                async move {
                    check_response(req.send().await?).await?;
                    Ok(())
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_core::sheet::{CellValue, ColumnKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn column_list_envelope_deserializes() {
        let list: ColumnList = serde_json::from_str(
            r#"{
                "columns": [
                    {"id": 11, "title": "Task Name", "kind": "text"},
                    {"id": 12, "title": "Priority", "kind": "picklist"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(list.columns.len(), 2);
        assert_eq!(list.columns[1].kind, ColumnKind::Picklist);
    }

    #[test]
    fn row_list_envelope_deserializes_cells() {
        let list: RowList = serde_json::from_str(
            r#"{
                "rows": [
                    {
                        "id": 501,
                        "row_number": 1,
                        "cells": [
                            {"column_id": 11, "value": {"text": "Kickoff"}},
                            {"column_id": 13, "value": {"checkbox": true}}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(list.rows[0].row_number, 1);
        assert_eq!(
            list.rows[0].cells[0].value,
            CellValue::Text("Kickoff".into())
        );
        assert_eq!(list.rows[0].cells[1].value, CellValue::Checkbox(true));
    }

    #[test]
    fn add_rows_request_serializes_placement() {
        let rows = vec![RowSpec::child_of(
            501,
            vec![lift_core::sheet::Cell {
                column_id: 11,
                value: CellValue::Text("Design".into()),
            }],
        )];
        let json = serde_json::to_value(AddRowsRequest { rows: &rows }).unwrap();
        assert_eq!(json["rows"][0]["placement"]["child"]["parent_row_id"], 501);
    }
}
