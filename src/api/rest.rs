//! REST endpoints for the pin relay.

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ErrorCode};
use crate::infra::{normalize_receipt, MinterError, PinPayload};
use crate::server::AppState;

/// Build the `/api` router.
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload_image))
}

/// Success body of `POST /api/upload`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub ipfs_hash: String,
    pub ipfs_url: String,
    pub gateway_url: String,
    pub size: u64,
    pub timestamp: String,
}

/// POST /api/upload - pin one image through the relay.
///
/// The multipart body must carry a single `image` field. Every input
/// check (presence, media type, size cap) runs before the outbound
/// pinning call is attempted.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut payload: Option<PinPayload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::new(ErrorCode::InvalidRequestBody, "Malformed multipart body")
            .with_message(e.to_string())
    })? {
        if field.name() != Some("image") {
            continue;
        }

        let mime_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "photo.jpg".to_string());

        if !mime_type.starts_with("image/") {
            return Err(MinterError::UnsupportedMediaType(mime_type).into());
        }

        let bytes = field.bytes().await.map_err(|e| {
            ApiError::new(ErrorCode::InvalidRequestBody, "Could not read image field")
                .with_message(e.to_string())
        })?;

        payload = Some(PinPayload {
            bytes: bytes.to_vec(),
            file_name,
            mime_type,
        });
        break;
    }

    let payload = payload.ok_or(MinterError::MissingFile)?;
    if payload.bytes.is_empty() {
        return Err(MinterError::MissingFile.into());
    }
    if payload.bytes.len() > state.max_upload_bytes {
        return Err(MinterError::FileTooLarge {
            size: payload.bytes.len(),
            limit: state.max_upload_bytes,
        }
        .into());
    }

    info!(
        file_name = %payload.file_name,
        mime_type = %payload.mime_type,
        size = payload.bytes.len(),
        "received upload"
    );

    let receipt = state.pinning.pin_image(payload).await?;
    let record = normalize_receipt(&receipt, &state.gateway_host);

    Ok(Json(UploadResponse {
        success: true,
        ipfs_hash: record.ipfs_hash,
        ipfs_url: record.ipfs_url,
        gateway_url: record.gateway_url,
        size: record.size,
        timestamp: record.timestamp,
    }))
}
