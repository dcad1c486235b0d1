//! Upload records produced by the pin relay

use serde::{Deserialize, Serialize};

/// Canonical descriptor of a pinned image.
///
/// Immutable once created; owned by the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Content address reported by the pinning service
    pub ipfs_hash: String,
    /// Protocol-native URL (`ipfs://<hash>`)
    pub ipfs_url: String,
    /// HTTP gateway URL (`https://<gateway-host>/ipfs/<hash>`)
    pub gateway_url: String,
    /// Pinned size in bytes
    pub size: u64,
    /// Upload timestamp reported by the pinning service
    pub timestamp: String,
}

impl UploadRecord {
    /// Construct both URL representations from a content hash.
    pub fn new(
        ipfs_hash: impl Into<String>,
        gateway_host: &str,
        size: u64,
        timestamp: impl Into<String>,
    ) -> Self {
        let ipfs_hash = ipfs_hash.into();
        Self {
            ipfs_url: format!("ipfs://{ipfs_hash}"),
            gateway_url: format!("https://{gateway_host}/ipfs/{ipfs_hash}"),
            ipfs_hash,
            size,
            timestamp: timestamp.into(),
        }
    }
}
