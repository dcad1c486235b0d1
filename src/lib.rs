//! Snapmint library
//!
//! Team-minting pipeline for soulbound event NFTs: bounded image
//! compression, a credential-hiding IPFS pin relay, recipient name
//! resolution, and a privileged mint submitter with a tracked request
//! lifecycle.
//!
//! ## Modules
//!
//! - [`domain`] - Core pipeline types (images, uploads, resolutions, mint requests)
//! - [`media`] - Image compression and scoped camera capture
//! - [`infra`] - Error taxonomy, pinning client, relay client
//! - [`resolve`] - Recipient classification and debounced name resolution
//! - [`mint`] - Mint gateway and submitter
//! - [`session`] - Explicit per-operator session state
//! - [`api`] - REST surface of the pin relay
//! - [`server`] - Relay bootstrap

pub mod api;
pub mod domain;
pub mod infra;
pub mod media;
pub mod mint;
pub mod resolve;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use domain::{
    CompressionResult, ImageAsset, MintConfirmation, MintReceipt, MintRequest, MintStatus,
    RecipientResolution, ResolutionStatus, UploadRecord,
};

pub use infra::{MinterError, PinningClient, Result};
