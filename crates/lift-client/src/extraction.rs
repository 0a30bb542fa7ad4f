//! Extraction clients for the source planning system.
//!
//! Two implementations of the [`ExtractionClient`] port:
//! - [`HttpExtraction`] fetches the project export from the source system's
//!   API, through the shared resilience policy.
//! - [`FileExtraction`] reads an export already saved to disk as JSON. This
//!   is the fixture path for tests and the offline path for `validate`.

use crate::error::ClientError;
use crate::http::check_response;
use crate::ports::{ClientResult, ExtractionClient};
use crate::resilience::ResiliencePolicy;
use async_trait::async_trait;
use lift_core::records::ProjectSnapshot;

/// HTTP extraction client for the source system's export API.
pub struct HttpExtraction {
    http: reqwest::Client,
    base_url: String,
    token: String,
    policy: ResiliencePolicy,
}

impl HttpExtraction {
    /// Create an extraction client.
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
}

#[async_trait]
impl ExtractionClient for HttpExtraction {
    async fn fetch_snapshot(&self, source_ref: &str) -> ClientResult<ProjectSnapshot> {
        let url = format!("{}/projects/{source_ref}/export", self.base_url);

        self.policy
            .run(|| {
                let req = self.http.get(&url).bearer_auth(&self.token);
                async move {
                    let resp = check_response(req.send().await?).await?;
                    resp.json::<ProjectSnapshot>()
                        .await
                        .map_err(|e| ClientError::Parse(e.to_string()))
                }
            })
            .await
    }
}

/// File-based extraction client reading a JSON export from disk.
///
/// `source_ref` is interpreted as a filesystem path.
pub struct FileExtraction;

#[async_trait]
impl ExtractionClient for FileExtraction {
    async fn fetch_snapshot(&self, source_ref: &str) -> ClientResult<ProjectSnapshot> {
        let bytes = tokio::fs::read(source_ref).await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(format!("{source_ref}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn file_extraction_reads_snapshot_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(
            &path,
            r#"{
                "project": {"id": "p1", "name": "Website Redesign"},
                "tasks": [
                    {"id": "t1", "name": "Kickoff", "outline_level": 1}
                ]
            }"#,
        )
        .unwrap();

        let snapshot = FileExtraction
            .fetch_snapshot(path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(snapshot.project.name.as_deref(), Some("Website Redesign"));
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.resources.len(), 0);
    }

    #[tokio::test]
    async fn file_extraction_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileExtraction
            .fetch_snapshot(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[tokio::test]
    async fn file_extraction_reports_missing_files() {
        let err = FileExtraction
            .fetch_snapshot("/no/such/export.json")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
