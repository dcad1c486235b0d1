//! Privileged mint dispatch
//!
//! The contract ABI is a fixed external interface; this module wraps it
//! behind a gateway seam, checks the client-side preconditions, and
//! drives the request lifecycle.

mod gateway;
mod submitter;

pub use gateway::{EvmMintGateway, MintConfig, MintGateway};
pub use submitter::MintSubmitter;
