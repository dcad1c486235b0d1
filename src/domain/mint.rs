//! Mint request lifecycle types

use std::fmt;

use alloy::primitives::{Address, TxHash};
use uuid::Uuid;

use crate::infra::{MinterError, Result};

/// Lifecycle of a mint request.
///
/// `building -> submitted` on dispatch, then `-> confirmed` on chain
/// inclusion or `-> failed` on dispatch rejection or inclusion failure.
/// `confirmed` and `failed` are terminal; a failed mint is retried by
/// building a fresh request, never by reusing this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintStatus {
    Building,
    Submitted,
    Confirmed,
    Failed,
}

impl MintStatus {
    fn can_transition(self, to: MintStatus) -> bool {
        matches!(
            (self, to),
            (MintStatus::Building, MintStatus::Submitted)
                | (MintStatus::Building, MintStatus::Failed)
                | (MintStatus::Submitted, MintStatus::Confirmed)
                | (MintStatus::Submitted, MintStatus::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, MintStatus::Confirmed | MintStatus::Failed)
    }
}

impl fmt::Display for MintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MintStatus::Building => "building",
            MintStatus::Submitted => "submitted",
            MintStatus::Confirmed => "confirmed",
            MintStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// One privileged mint call, assembled from the session once every
/// precondition holds.
#[derive(Debug, Clone)]
pub struct MintRequest {
    /// Request identifier, for log correlation
    pub id: Uuid,
    /// Resolved recipient address
    pub recipient: Address,
    /// Pinned content URL; empty string means "use the contract's
    /// default image"
    pub content_url: String,
    /// Free-text personal message
    pub custom_text: String,
    /// Event name (required, non-empty)
    pub event_name: String,
    /// Event timestamp, unix seconds
    pub event_date: u64,
    /// Current lifecycle state
    pub status: MintStatus,
}

impl MintRequest {
    /// Advance the lifecycle, rejecting illegal transitions.
    pub fn transition(&mut self, to: MintStatus) -> Result<()> {
        if !self.status.can_transition(to) {
            return Err(MinterError::InvalidStateTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Confirmation data for an included mint transaction.
#[derive(Debug, Clone, Copy)]
pub struct MintConfirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Returned to the caller after a confirmed mint.
#[derive(Debug, Clone, Copy)]
pub struct MintReceipt {
    pub request_id: Uuid,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MintRequest {
        MintRequest {
            id: Uuid::new_v4(),
            recipient: Address::ZERO,
            content_url: String::new(),
            custom_text: "hello".to_string(),
            event_name: "Test Event".to_string(),
            event_date: 1_700_000_000,
            status: MintStatus::Building,
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut req = request();
        req.transition(MintStatus::Submitted).unwrap();
        req.transition(MintStatus::Confirmed).unwrap();
        assert!(req.status.is_terminal());
    }

    #[test]
    fn test_dispatch_rejection_from_building() {
        let mut req = request();
        req.transition(MintStatus::Failed).unwrap();
        assert_eq!(req.status, MintStatus::Failed);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut req = request();
        req.transition(MintStatus::Submitted).unwrap();
        req.transition(MintStatus::Failed).unwrap();
        let err = req.transition(MintStatus::Submitted).unwrap_err();
        assert!(matches!(err, MinterError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_no_skip_to_confirmed() {
        let mut req = request();
        assert!(req.transition(MintStatus::Confirmed).is_err());
    }
}
