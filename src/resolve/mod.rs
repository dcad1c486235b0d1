//! Recipient classification and name resolution
//!
//! A recipient string is either a literal chain address (accepted with
//! no external call), a domain-style name (resolved through an
//! ENS-compatible registry), or invalid. Name lookups are debounced and
//! version-tagged so rapid edits cause exactly one upstream call and a
//! stale in-flight result can never overwrite a newer attempt.

mod classify;
mod ens;
mod session;

pub use classify::{classify_recipient, RecipientKind};
pub use ens::{namehash, AddressResolver, EnsResolver, ResolverConfig, ENS_REGISTRY_ADDRESS};
pub use session::{ResolverSession, DEFAULT_QUIET_PERIOD};
