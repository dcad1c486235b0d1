//! Infrastructure layer for the snapmint pipeline
//!
//! Contains the error taxonomy and the upstream HTTP clients:
//! - Pinning service client (credential-holding outbound leg of the relay)
//! - Relay client (used by the minting CLI)

mod error;
mod pinning;
mod relay_client;

pub use error::*;
pub use pinning::{
    normalize_receipt, HttpPinningClient, PinPayload, PinReceipt, PinningClient, PinningConfig,
    DEFAULT_GATEWAY_HOST, DEFAULT_PIN_API_URL,
};
pub use relay_client::{RelayClient, RelayHealth};
