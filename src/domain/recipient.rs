//! Recipient resolution state

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Lifecycle of one recipient input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStatus {
    /// No input, or input not yet examined
    Unresolved,
    /// A name lookup is pending (debounce window or in flight)
    Resolving,
    /// A chain address is known
    Resolved,
    /// The resolution service had no match or was unreachable
    NotFound,
    /// Input matches neither the address nor the name shape
    Invalid,
}

/// Resolution state for a user-entered recipient string.
///
/// Mutated only by the resolver session; consumed read-only by the mint
/// submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientResolution {
    /// The raw input string as last entered
    pub input: String,
    /// Resolved chain address, populated only in the `Resolved` state
    pub resolved: Option<Address>,
    /// Current lifecycle state
    pub status: ResolutionStatus,
}

impl RecipientResolution {
    pub fn is_resolved(&self) -> bool {
        self.status == ResolutionStatus::Resolved && self.resolved.is_some()
    }
}

impl Default for RecipientResolution {
    fn default() -> Self {
        Self {
            input: String::new(),
            resolved: None,
            status: ResolutionStatus::Unresolved,
        }
    }
}
