//! Pinning service client
//!
//! The relay forwards each accepted image to the pinning service with a
//! credential pair that only this process holds. Callers never see the
//! credentials, and error messages never echo them.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::UploadRecord;
use crate::infra::{MinterError, Result};

/// Default pinning endpoint (Pinata-compatible).
pub const DEFAULT_PIN_API_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

/// Default HTTP gateway host used for the gateway URL representation.
pub const DEFAULT_GATEWAY_HOST: &str = "gateway.pinata.cloud";

/// Classification tag attached to every pinned file's metadata.
const PIN_TYPE_TAG: &str = "snapmint-nft";

/// Pinning service configuration.
#[derive(Debug, Clone)]
pub struct PinningConfig {
    /// Pinning endpoint URL
    pub api_url: String,
    /// Credential pair; held by the relay process only. Absence is not
    /// validated at startup — a missing pair surfaces as an upstream
    /// auth failure on the first upload.
    pub api_key: String,
    pub secret_key: String,
    /// Gateway host for the HTTP URL representation
    pub gateway_host: String,
}

impl PinningConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("PIN_API_URL").unwrap_or_else(|_| DEFAULT_PIN_API_URL.into()),
            api_key: std::env::var("PINATA_API_KEY").unwrap_or_default(),
            secret_key: std::env::var("PINATA_SECRET_KEY").unwrap_or_default(),
            gateway_host: std::env::var("PIN_GATEWAY_HOST")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_HOST.into()),
        }
    }
}

/// A single image payload to pin.
#[derive(Debug, Clone)]
pub struct PinPayload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

/// Receipt returned by the pinning service.
#[derive(Debug, Clone)]
pub struct PinReceipt {
    pub hash: String,
    pub pinned_size: u64,
    pub timestamp: String,
}

/// Seam over the pinning service, so the relay can be exercised against
/// a fake in tests.
#[async_trait]
pub trait PinningClient: Send + Sync {
    async fn pin_image(&self, payload: PinPayload) -> Result<PinReceipt>;
}

/// Success body of a Pinata-compatible pin endpoint.
#[derive(Debug, Deserialize)]
struct PinServiceResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
    #[serde(rename = "PinSize")]
    pin_size: u64,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

/// HTTP implementation of [`PinningClient`].
pub struct HttpPinningClient {
    config: PinningConfig,
    http: reqwest::Client,
}

impl HttpPinningClient {
    pub fn new(config: PinningConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn gateway_host(&self) -> &str {
        &self.config.gateway_host
    }
}

#[async_trait]
impl PinningClient for HttpPinningClient {
    async fn pin_image(&self, payload: PinPayload) -> Result<PinReceipt> {
        let metadata = serde_json::json!({
            "name": payload.file_name,
            "keyvalues": {
                "uploadedAt": chrono::Utc::now().to_rfc3339(),
                "type": PIN_TYPE_TAG,
            }
        });
        let options = serde_json::json!({ "cidVersion": 0 });

        let part = reqwest::multipart::Part::bytes(payload.bytes)
            .file_name(payload.file_name.clone())
            .mime_str(&payload.mime_type)
            .map_err(|e| MinterError::UnsupportedMediaType(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("pinataMetadata", metadata.to_string())
            .text("pinataOptions", options.to_string());

        // No body-size cap on the outbound leg; the relay's inbound leg
        // already enforced it.
        let response = self
            .http
            .post(&self.config.api_url)
            .header("pinata_api_key", &self.config.api_key)
            .header("pinata_secret_api_key", &self.config.secret_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MinterError::PinningUnavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MinterError::PinningAuth);
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(MinterError::PinningRejected(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MinterError::PinningUnavailable(format!(
                "pinning service returned {status}: {body}"
            )));
        }

        let body: PinServiceResponse = response
            .json()
            .await
            .map_err(|e| MinterError::PinningUnavailable(e.to_string()))?;

        tracing::info!(hash = %body.ipfs_hash, size = body.pin_size, "image pinned");

        Ok(PinReceipt {
            hash: body.ipfs_hash,
            pinned_size: body.pin_size,
            timestamp: body.timestamp,
        })
    }
}

/// Normalize a pin receipt into the canonical upload record.
pub fn normalize_receipt(receipt: &PinReceipt, gateway_host: &str) -> UploadRecord {
    UploadRecord::new(
        receipt.hash.clone(),
        gateway_host,
        receipt.pinned_size,
        receipt.timestamp.clone(),
    )
}
