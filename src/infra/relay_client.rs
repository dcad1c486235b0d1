//! Client side of the pin relay
//!
//! Used by the minting CLI to push a compressed image through the relay
//! without ever holding pinning credentials.

use serde::Deserialize;

use crate::domain::UploadRecord;
use crate::infra::{MinterError, Result};

/// Failure body of the relay (`error` + stable `code` + optional
/// upstream `message`).
#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Success body of `POST /api/upload`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayUploadBody {
    #[allow(dead_code)]
    success: bool,
    ipfs_hash: String,
    ipfs_url: String,
    gateway_url: String,
    size: u64,
    timestamp: String,
}

/// Body of `GET /health`.
#[derive(Debug, Deserialize)]
pub struct RelayHealth {
    pub status: String,
    pub message: String,
}

/// HTTP client for the relay service.
pub struct RelayClient {
    base_url: String,
    http: reqwest::Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Probe the relay's health endpoint.
    pub async fn health(&self) -> Result<RelayHealth> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| MinterError::PinningUnavailable(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| MinterError::PinningUnavailable(e.to_string()))
    }

    /// Upload one image and return the canonical record.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<UploadRecord> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| MinterError::UnsupportedMediaType(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MinterError::PinningUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: RelayErrorBody = response.json().await.unwrap_or(RelayErrorBody {
                error: format!("relay returned {status}"),
                code: None,
                message: None,
            });
            let detail = match body.message {
                Some(message) => format!("{}: {}", body.error, message),
                None => body.error,
            };
            return Err(match body.code.as_deref() {
                Some("PINNING_AUTH_FAILED") => MinterError::PinningAuth,
                Some("PINNING_REJECTED") => MinterError::PinningRejected(detail),
                _ if status.is_client_error() => MinterError::PinningRejected(detail),
                _ => MinterError::PinningUnavailable(detail),
            });
        }

        let body: RelayUploadBody = response
            .json()
            .await
            .map_err(|e| MinterError::PinningUnavailable(e.to_string()))?;

        Ok(UploadRecord {
            ipfs_hash: body.ipfs_hash,
            ipfs_url: body.ipfs_url,
            gateway_url: body.gateway_url,
            size: body.size,
            timestamp: body.timestamp,
        })
    }
}
