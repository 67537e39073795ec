//! HTTP file-transfer channel of the research backend.
//!
//! Independent of the streaming session: documents uploaded here become
//! available to "local" and "hybrid" research runs.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SessionError;

/// Files previously uploaded to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub files: Vec<String>,
}

/// Request/response client for `/upload/` and `/files/`.
#[derive(Clone)]
pub struct TransferClient {
    base_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for TransferClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TransferClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Transfer(e.to_string()))?;
        Ok(Self {
            base_url: http_base(base_url),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a file from disk under its own file name.
    pub async fn upload_file(&self, path: &Path) -> Result<serde_json::Value, SessionError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SessionError::UploadFailed(format!("no file name in {}", path.display()))
            })?
            .to_string();
        let data = tokio::fs::read(path).await?;
        self.upload_bytes(&filename, data).await
    }

    /// Upload in-memory content as a multipart `file` field.
    pub async fn upload_bytes(
        &self,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<serde_json::Value, SessionError> {
        debug!(filename, size = data.len(), "upload request");

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))
            .map_err(|e| SessionError::Transfer(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload/", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SessionError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::UploadFailed(status_text(status)));
        }
        response
            .json()
            .await
            .map_err(|e| SessionError::Transfer(e.to_string()))
    }

    pub async fn list_files(&self) -> Result<FileListing, SessionError> {
        let response = self
            .http
            .get(format!("{}/files/", self.base_url))
            .send()
            .await
            .map_err(|e| SessionError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::ListFailed(status_text(status)));
        }
        response
            .json()
            .await
            .map_err(|e| SessionError::Transfer(e.to_string()))
    }

    pub async fn delete_file(&self, filename: &str) -> Result<serde_json::Value, SessionError> {
        debug!(filename, "delete request");
        let response = self
            .http
            .delete(format!(
                "{}/files/{}",
                self.base_url,
                urlencoding::encode(filename)
            ))
            .send()
            .await
            .map_err(|e| SessionError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::DeleteFailed(status_text(status)));
        }
        response
            .json()
            .await
            .map_err(|e| SessionError::Transfer(e.to_string()))
    }
}

/// Normalise a configured base address to `http(s)://host[:port][/prefix]`.
pub(crate) fn http_base(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if let Some(rest) = trimmed.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("ws://") {
        format!("http://{rest}")
    } else if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// The HTTP reason phrase, falling back to the numeric code.
fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(String::from)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "txt" || ext == "md" => "text/plain",
        Some(ext) if ext == "csv" => "text/csv",
        Some(ext) if ext == "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}
